//! Executes parsed commands against a [`DesktopHost`] and renders the results.

use std::io::{self, Write};

use desktop_runtime::{DesktopHost, DesktopState, ItemId, WindowId};
use serde_json::json;

use crate::commands::{ShellCommand, HELP};

/// Output format for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Text,
    Json,
}

pub fn execute(
    host: &mut DesktopHost,
    command: ShellCommand,
    now_ms: u64,
    mode: OutputMode,
    out: &mut impl Write,
) -> io::Result<()> {
    match command {
        ShellCommand::Dispatch(actions) => {
            for action in actions {
                host.dispatch(action);
            }
            Ok(())
        }
        ShellCommand::ListWindows => write_windows(host.state(), mode, out),
        ShellCommand::ListItems(folder_id) => write_items(host.state(), &folder_id, mode, out),
        ShellCommand::ShowSelection => {
            let selection = &host.state().selection;
            match mode {
                OutputMode::Json => writeln!(
                    out,
                    "{}",
                    json!({
                        "container": selection.container(),
                        "selected": selection.selected_ids(),
                        "dragging": selection.drag_payload(),
                    })
                ),
                OutputMode::Text => {
                    let ids = selection
                        .selected_ids()
                        .iter()
                        .map(ItemId::as_str)
                        .collect::<Vec<_>>();
                    writeln!(out, "{}: [{}]", selection.container(), ids.join(", "))
                }
            }
        }
        ShellCommand::ShowExplorer(window_id) => write_explorer(host.state(), window_id, out),
        ShellCommand::ShowAppearance => {
            let appearance = &host.state().appearance;
            match mode {
                OutputMode::Json => writeln!(out, "{}", json!(appearance)),
                OutputMode::Text => writeln!(
                    out,
                    "wallpaper: {} ({:?}) background: {} header: {}",
                    appearance.wallpaper_image.as_deref().unwrap_or("none"),
                    appearance.wallpaper_style,
                    appearance.background_color,
                    appearance.header_color
                ),
            }
        }
        ShellCommand::Screensaver {
            kind,
            timeout_minutes,
        } => {
            host.set_screensaver(kind, timeout_minutes, now_ms);
            writeln!(out, "screensaver {kind:?} after {timeout_minutes} min")
        }
        ShellCommand::Help => writeln!(out, "{HELP}"),
        ShellCommand::Quit => Ok(()),
    }
}

fn write_windows(state: &DesktopState, mode: OutputMode, out: &mut impl Write) -> io::Result<()> {
    let ordered = state.windows.stacking_order();
    if mode == OutputMode::Json {
        return writeln!(out, "{}", json!(ordered));
    }
    if ordered.is_empty() {
        return writeln!(out, "(no windows)");
    }
    let active = state.windows.active_window_id();
    for window in ordered {
        let mut flags = Vec::new();
        if Some(window.id) == active {
            flags.push("active");
        }
        if window.minimized {
            flags.push("minimized");
        }
        if window.maximized {
            flags.push("maximized");
        }
        let rect = window.rect;
        writeln!(
            out,
            "#{} {:<20} z={:<3} {}x{}+{}+{} {}",
            window.id.0,
            window.title,
            window.z_index,
            rect.w,
            rect.h,
            rect.x,
            rect.y,
            flags.join(",")
        )?;
    }
    Ok(())
}

fn write_items(
    state: &DesktopState,
    folder_id: &ItemId,
    mode: OutputMode,
    out: &mut impl Write,
) -> io::Result<()> {
    let items = state.fs.items_in(folder_id);
    if mode == OutputMode::Json {
        return writeln!(out, "{}", json!(items));
    }
    if items.is_empty() {
        return writeln!(out, "(empty)");
    }
    for item in items {
        let selected = if state.selection.is_selected(&item.id) {
            "*"
        } else {
            " "
        };
        let position = item
            .position()
            .map(|(x, y)| format!(" @{x},{y}"))
            .unwrap_or_default();
        writeln!(
            out,
            "{selected} {} {:<16} {}{position}",
            item.icon, item.id, item.name
        )?;
    }
    Ok(())
}

fn write_explorer(state: &DesktopState, window_id: WindowId, out: &mut impl Write) -> io::Result<()> {
    let Some(view) = state.explorer(window_id) else {
        return writeln!(out, "window #{} is not an explorer", window_id.0);
    };
    let folder = view.current_folder();
    let name = state
        .fs
        .item(folder)
        .map_or(folder.as_str(), |item| item.name.as_str());
    writeln!(
        out,
        "{name} [back: {}, up: {}]",
        view.can_go_back(),
        view.can_go_up(&state.fs)
    )
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use desktop_runtime::{AppId, DesktopAction, DesktopConfig};
    use platform_host::MemoryPrefsStore;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::commands::parse_command;

    fn host() -> DesktopHost {
        DesktopHost::boot(
            &DesktopConfig::default(),
            Rc::new(MemoryPrefsStore::default()),
            0,
        )
    }

    fn run(host: &mut DesktopHost, line: &str, mode: OutputMode) -> String {
        let mut out = Vec::new();
        let command = parse_command(line).expect("valid command");
        execute(host, command, 0, mode, &mut out).expect("write output");
        String::from_utf8(out).expect("utf8 output")
    }

    #[test]
    fn lists_desktop_items_with_selection_marker() {
        let mut host = host();
        run(&mut host, "click desktop readme", OutputMode::Text);
        let listing = run(&mut host, "ls", OutputMode::Text);

        let lines = listing.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 3);
        assert!(lines[2].starts_with("* "));
        assert!(lines[2].contains("ReadMe.txt @20,200"));
    }

    #[test]
    fn window_listing_marks_active_window() {
        let mut host = host();
        host.dispatch(DesktopAction::OpenApp {
            app_id: AppId::Solitaire,
        });
        host.dispatch(DesktopAction::OpenApp {
            app_id: AppId::Notepad,
        });

        let listing = run(&mut host, "windows", OutputMode::Text);
        let lines = listing.lines().collect::<Vec<_>>();
        assert!(lines[0].starts_with("#1 Solitaire"));
        assert!(lines[1].starts_with("#2 ReadMe.txt"));
        assert!(lines[1].ends_with("active"));
    }

    #[test]
    fn json_listing_is_machine_readable() {
        let mut host = host();
        let listing = run(&mut host, "ls games", OutputMode::Json);
        let value: serde_json::Value = serde_json::from_str(&listing).expect("json");
        assert_eq!(value[0]["id"], "mine_shortcut");
        assert_eq!(value[1]["appId"], "solitaire");
    }

    #[test]
    fn appearance_reflects_scheme_and_wallpaper_commands() {
        let mut host = host();
        run(&mut host, "wallpaper azul.jpg tile #123456", OutputMode::Text);
        assert_eq!(
            run(&mut host, "appearance", OutputMode::Text),
            "wallpaper: azul.jpg (Tile) background: #123456 header: #000080\n"
        );

        run(&mut host, "scheme eggplant", OutputMode::Text);
        let listing = run(&mut host, "appearance", OutputMode::Json);
        let value: serde_json::Value = serde_json::from_str(&listing).expect("json");
        assert_eq!(value["wallpaper_image"], serde_json::Value::Null);
        assert_eq!(value["background_color"], "#400040");
        assert_eq!(value["header_color"], "#800080");
    }

    #[test]
    fn explorer_reports_location() {
        let mut host = host();
        run(&mut host, "open explorer", OutputMode::Text);
        run(&mut host, "cd 1 games", OutputMode::Text);
        assert_eq!(
            run(&mut host, "explorer 1", OutputMode::Text),
            "Games [back: true, up: true]\n"
        );
        assert_eq!(
            run(&mut host, "explorer 7", OutputMode::Text),
            "window #7 is not an explorer\n"
        );
    }
}
