//! Line-oriented command language for driving the desktop from a terminal.

use desktop_runtime::{
    appearance::is_hex_color, apps::AppId, color_scheme, DesktopAction, ItemId, ItemKind,
    PointerPosition, PointerTarget, ScreenSaverKind, WallpaperStyle, WindowId,
};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("`{command}` is missing <{argument}>")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("`{0}` is not a number")]
    InvalidNumber(String),
    #[error("unknown app `{0}`")]
    UnknownApp(String),
    #[error("unknown screensaver `{0}`")]
    UnknownScreenSaver(String),
    #[error("`{0}` is not a #rrggbb color")]
    InvalidColor(String),
    #[error("unknown wallpaper style `{0}` (tile|center|stretch)")]
    UnknownWallpaperStyle(String),
    #[error("unknown color scheme `{0}`")]
    UnknownScheme(String),
}

/// A parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    /// Reducer actions applied in order.
    Dispatch(Vec<DesktopAction>),
    ListWindows,
    ListItems(ItemId),
    ShowSelection,
    ShowExplorer(WindowId),
    ShowAppearance,
    Screensaver {
        kind: ScreenSaverKind,
        timeout_minutes: u32,
    },
    Help,
    Quit,
}

pub const HELP: &str = "\
windows                          list open windows (paint order)
open <app>                       open explorer|minesweeper|solitaire|notepad|display_properties
open-item <item> [window]        activate an item, optionally from an explorer window
close|focus|min|restore|max|taskbar <window>
move <window> <x> <y>            set window position
size <window> <w> <h>            set window size
start                            toggle the start menu
ls [folder]                      list items in a folder (default desktop)
mkdir|touch <parent> <name...>   create a folder or file
rm <item...>                     delete items
mv <folder> <item...>            reparent items
pos <item> <x> <y>               set icon position
click <container> <item> [+]     select an item; `+` adds to the selection
band <container> <x1> <y1> <x2> <y2>
                                 rubber-band select
ctx <container> <item>           right-click an item
ctx-delete <item>                context-menu delete
drag <container> <item>          start dragging icons
drop <container> <x> <y>         drop onto a positioned container
drop-folder <folder>             drop into a folder view
cancel-drag                      abandon the drag
selection                        show the selected items
cd|back|up <window> [folder]     explorer navigation
explorer <window>                show explorer location
refresh | reset                  clear selection | restore the seed tree
screensaver <kind> [minutes]     none|blank|windows_logo|matrix
wallpaper <image|none> <style> <color>
                                 set wallpaper; style is tile|center|stretch
theme <header-color> <desktop-color>
scheme <name...>                 apply a named color scheme
appearance                       show wallpaper and colors
help | quit";

struct Args<'a> {
    command: &'static str,
    rest: std::slice::Iter<'a, &'a str>,
}

impl<'a> Args<'a> {
    fn next(&mut self, argument: &'static str) -> Result<&'a str, CommandError> {
        self.rest
            .next()
            .copied()
            .ok_or(CommandError::MissingArgument {
                command: self.command,
                argument,
            })
    }

    fn optional(&mut self) -> Option<&'a str> {
        self.rest.next().copied()
    }

    fn item(&mut self, argument: &'static str) -> Result<ItemId, CommandError> {
        self.next(argument).map(ItemId::from)
    }

    fn number<T: std::str::FromStr>(&mut self, argument: &'static str) -> Result<T, CommandError> {
        parse_number(self.next(argument)?)
    }

    fn window(&mut self) -> Result<WindowId, CommandError> {
        self.number("window").map(WindowId)
    }

    fn pointer(&mut self) -> Result<PointerPosition, CommandError> {
        Ok(PointerPosition::new(self.number("x")?, self.number("y")?))
    }

    fn remaining_items(&mut self, argument: &'static str) -> Result<Vec<ItemId>, CommandError> {
        let items = self.rest.by_ref().map(|raw| ItemId::from(*raw)).collect::<Vec<_>>();
        if items.is_empty() {
            return Err(CommandError::MissingArgument {
                command: self.command,
                argument,
            });
        }
        Ok(items)
    }

    fn color(&mut self, argument: &'static str) -> Result<String, CommandError> {
        let raw = self.next(argument)?;
        if !is_hex_color(raw) {
            return Err(CommandError::InvalidColor(raw.to_string()));
        }
        Ok(raw.to_string())
    }

    fn remaining_text(&mut self, argument: &'static str) -> Result<String, CommandError> {
        let text = self.rest.by_ref().copied().collect::<Vec<_>>().join(" ");
        if text.is_empty() {
            return Err(CommandError::MissingArgument {
                command: self.command,
                argument,
            });
        }
        Ok(text)
    }
}

fn parse_number<T: std::str::FromStr>(raw: &str) -> Result<T, CommandError> {
    raw.parse()
        .map_err(|_| CommandError::InvalidNumber(raw.to_string()))
}

fn one(action: DesktopAction) -> ShellCommand {
    ShellCommand::Dispatch(vec![action])
}

fn parse_screensaver(raw: &str) -> Result<ScreenSaverKind, CommandError> {
    match raw {
        "none" => Ok(ScreenSaverKind::None),
        "blank" => Ok(ScreenSaverKind::Blank),
        "windows_logo" => Ok(ScreenSaverKind::WindowsLogo),
        "matrix" => Ok(ScreenSaverKind::Matrix),
        other => Err(CommandError::UnknownScreenSaver(other.to_string())),
    }
}

/// Parses one input line.
///
/// # Errors
///
/// Returns a [`CommandError`] describing the first problem found.
pub fn parse_command(line: &str) -> Result<ShellCommand, CommandError> {
    let words = line.split_whitespace().collect::<Vec<_>>();
    let Some((&head, tail)) = words.split_first() else {
        return Err(CommandError::Empty);
    };
    let command = COMMAND_NAMES
        .iter()
        .copied()
        .find(|name| *name == head)
        .ok_or_else(|| CommandError::Unknown(head.to_string()))?;
    let mut args = Args {
        command,
        rest: tail.iter(),
    };

    let parsed = match command {
        "windows" => ShellCommand::ListWindows,
        "open" => {
            let raw = args.next("app")?;
            let app_id =
                AppId::from_canonical(raw).ok_or_else(|| CommandError::UnknownApp(raw.into()))?;
            one(DesktopAction::OpenApp { app_id })
        }
        "open-item" => {
            let item_id = args.item("item")?;
            let from_window = args
                .optional()
                .map(|raw| parse_number(raw).map(WindowId))
                .transpose()?;
            one(DesktopAction::OpenItem {
                item_id,
                from_window,
            })
        }
        "close" => one(DesktopAction::CloseWindow {
            window_id: args.window()?,
        }),
        "focus" => one(DesktopAction::FocusWindow {
            window_id: args.window()?,
        }),
        "min" => one(DesktopAction::MinimizeWindow {
            window_id: args.window()?,
        }),
        "restore" => one(DesktopAction::RestoreWindow {
            window_id: args.window()?,
        }),
        "max" => one(DesktopAction::ToggleMaximize {
            window_id: args.window()?,
        }),
        "taskbar" => one(DesktopAction::ToggleTaskbarWindow {
            window_id: args.window()?,
        }),
        "move" => {
            let window_id = args.window()?;
            one(DesktopAction::SetWindowPosition {
                window_id,
                x: args.number("x")?,
                y: args.number("y")?,
            })
        }
        "size" => {
            let window_id = args.window()?;
            one(DesktopAction::SetWindowSize {
                window_id,
                width: args.number("w")?,
                height: args.number("h")?,
            })
        }
        "start" => one(DesktopAction::ToggleStartMenu),
        "ls" => ShellCommand::ListItems(args.optional().map_or_else(ItemId::desktop, ItemId::from)),
        "mkdir" | "touch" => {
            let parent_id = args.item("parent")?;
            one(DesktopAction::CreateItem {
                parent_id,
                kind: if command == "mkdir" {
                    ItemKind::Folder
                } else {
                    ItemKind::File
                },
                name: args.remaining_text("name")?,
            })
        }
        "rm" => one(DesktopAction::DeleteItems {
            item_ids: args.remaining_items("item")?,
        }),
        "mv" => {
            let new_parent_id = args.item("folder")?;
            one(DesktopAction::MoveItems {
                item_ids: args.remaining_items("item")?,
                new_parent_id,
            })
        }
        "pos" => {
            let item_id = args.item("item")?;
            one(DesktopAction::SetItemPosition {
                item_id,
                x: args.number("x")?,
                y: args.number("y")?,
            })
        }
        "click" => {
            let container = args.item("container")?;
            let item_id = args.item("item")?;
            one(DesktopAction::ClickItem {
                container,
                item_id,
                additive: args.optional() == Some("+"),
            })
        }
        "band" => {
            let container = args.item("container")?;
            let anchor = args.pointer()?;
            let release = args.pointer()?;
            ShellCommand::Dispatch(vec![
                DesktopAction::PointerDown {
                    container,
                    target: PointerTarget::EmptySpace,
                    pointer: anchor,
                },
                DesktopAction::PointerMove { pointer: release },
                DesktopAction::PointerUp,
            ])
        }
        "ctx" => {
            let container = args.item("container")?;
            one(DesktopAction::ContextMenuItem {
                container,
                item_id: args.item("item")?,
            })
        }
        "ctx-delete" => one(DesktopAction::DeleteFromContextMenu {
            item_id: args.item("item")?,
        }),
        "drag" => {
            let container = args.item("container")?;
            one(DesktopAction::BeginItemDrag {
                container,
                item_id: args.item("item")?,
            })
        }
        "drop" => {
            let container = args.item("container")?;
            one(DesktopAction::DropOnContainer {
                container,
                pointer: args.pointer()?,
            })
        }
        "drop-folder" => one(DesktopAction::DropOnFolder {
            folder_id: args.item("folder")?,
        }),
        "cancel-drag" => one(DesktopAction::CancelItemDrag),
        "selection" => ShellCommand::ShowSelection,
        "cd" => {
            let window_id = args.window()?;
            one(DesktopAction::ExplorerNavigate {
                window_id,
                folder_id: args.item("folder")?,
            })
        }
        "back" => one(DesktopAction::ExplorerBack {
            window_id: args.window()?,
        }),
        "up" => one(DesktopAction::ExplorerUp {
            window_id: args.window()?,
        }),
        "explorer" => ShellCommand::ShowExplorer(args.window()?),
        "refresh" => one(DesktopAction::RefreshDesktop),
        "reset" => one(DesktopAction::ResetFileSystem),
        "screensaver" => {
            let kind = parse_screensaver(args.next("kind")?)?;
            let timeout_minutes = args
                .optional()
                .map(parse_number::<u32>)
                .transpose()?
                .unwrap_or(1);
            ShellCommand::Screensaver {
                kind,
                timeout_minutes,
            }
        }
        "wallpaper" => {
            let image = Some(args.next("image")?)
                .filter(|raw| *raw != "none")
                .map(str::to_string);
            let raw_style = args.next("style")?;
            let style = WallpaperStyle::parse(raw_style)
                .ok_or_else(|| CommandError::UnknownWallpaperStyle(raw_style.to_string()))?;
            one(DesktopAction::SetWallpaper {
                image,
                style,
                color: args.color("color")?,
            })
        }
        "theme" => {
            let header_color = args.color("header-color")?;
            one(DesktopAction::SetTheme {
                header_color,
                desktop_color: args.color("desktop-color")?,
            })
        }
        "scheme" => {
            let name = args.remaining_text("name")?;
            let scheme = color_scheme(&name).ok_or(CommandError::UnknownScheme(name))?;
            one(DesktopAction::ApplyColorScheme { scheme })
        }
        "appearance" => ShellCommand::ShowAppearance,
        "help" => ShellCommand::Help,
        "quit" => ShellCommand::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(parsed)
}

const COMMAND_NAMES: &[&str] = &[
    "windows",
    "open",
    "open-item",
    "close",
    "focus",
    "min",
    "restore",
    "max",
    "taskbar",
    "move",
    "size",
    "start",
    "ls",
    "mkdir",
    "touch",
    "rm",
    "mv",
    "pos",
    "click",
    "band",
    "ctx",
    "ctx-delete",
    "drag",
    "drop",
    "drop-folder",
    "cancel-drag",
    "selection",
    "cd",
    "back",
    "up",
    "explorer",
    "refresh",
    "reset",
    "screensaver",
    "wallpaper",
    "theme",
    "scheme",
    "appearance",
    "help",
    "quit",
];

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_window_commands() {
        assert_eq!(
            parse_command("open notepad"),
            Ok(one(DesktopAction::OpenApp {
                app_id: AppId::Notepad
            }))
        );
        assert_eq!(
            parse_command("  move 3 10 -20 "),
            Ok(one(DesktopAction::SetWindowPosition {
                window_id: WindowId(3),
                x: 10,
                y: -20
            }))
        );
        assert_eq!(parse_command("windows"), Ok(ShellCommand::ListWindows));
    }

    #[test]
    fn parses_file_system_commands() {
        assert_eq!(
            parse_command("mkdir desktop My Stuff"),
            Ok(one(DesktopAction::CreateItem {
                parent_id: ItemId::desktop(),
                kind: ItemKind::Folder,
                name: "My Stuff".to_string()
            }))
        );
        assert_eq!(
            parse_command("mv games readme recycle_bin"),
            Ok(one(DesktopAction::MoveItems {
                item_ids: vec!["readme".into(), "recycle_bin".into()],
                new_parent_id: "games".into()
            }))
        );
        assert_eq!(
            parse_command("ls"),
            Ok(ShellCommand::ListItems(ItemId::desktop()))
        );
    }

    #[test]
    fn band_expands_to_pointer_sequence() {
        let Ok(ShellCommand::Dispatch(actions)) = parse_command("band desktop 100 100 50 50") else {
            panic!("expected dispatch");
        };
        assert_eq!(actions.len(), 3);
        assert_eq!(actions[2], DesktopAction::PointerUp);
    }

    #[test]
    fn additive_click_uses_plus_marker() {
        assert_eq!(
            parse_command("click desktop readme +"),
            Ok(one(DesktopAction::ClickItem {
                container: ItemId::desktop(),
                item_id: "readme".into(),
                additive: true
            }))
        );
    }

    #[test]
    fn reports_parse_errors() {
        assert_eq!(parse_command("   "), Err(CommandError::Empty));
        assert_eq!(
            parse_command("format c:"),
            Err(CommandError::Unknown("format".into()))
        );
        assert_eq!(
            parse_command("close"),
            Err(CommandError::MissingArgument {
                command: "close",
                argument: "window"
            })
        );
        assert_eq!(
            parse_command("close two"),
            Err(CommandError::InvalidNumber("two".into()))
        );
        assert_eq!(
            parse_command("open paint"),
            Err(CommandError::UnknownApp("paint".into()))
        );
        assert_eq!(
            parse_command("rm"),
            Err(CommandError::MissingArgument {
                command: "rm",
                argument: "item"
            })
        );
    }

    #[test]
    fn every_listed_command_has_a_parser() {
        for name in COMMAND_NAMES {
            assert!(
                !matches!(parse_command(name), Err(CommandError::Unknown(_))),
                "{name} is listed but not parsed"
            );
        }
        assert_eq!(parse_command("quit"), Ok(ShellCommand::Quit));
        assert_ne!(parse_command("appearance"), Ok(ShellCommand::Quit));
    }

    #[test]
    fn parses_display_properties_commands() {
        assert_eq!(
            parse_command("wallpaper none stretch #008080"),
            Ok(one(DesktopAction::SetWallpaper {
                image: None,
                style: WallpaperStyle::Stretch,
                color: "#008080".to_string()
            }))
        );
        assert_eq!(
            parse_command("theme #800080 #400040"),
            Ok(one(DesktopAction::SetTheme {
                header_color: "#800080".to_string(),
                desktop_color: "#400040".to_string()
            }))
        );
        assert_eq!(
            parse_command("scheme high contrast black"),
            Ok(one(DesktopAction::ApplyColorScheme {
                scheme: color_scheme("High Contrast Black").expect("scheme")
            }))
        );
        assert_eq!(
            parse_command("wallpaper bliss.png diagonal #fff"),
            Err(CommandError::UnknownWallpaperStyle("diagonal".into()))
        );
        assert_eq!(
            parse_command("theme navy #400040"),
            Err(CommandError::InvalidColor("navy".into()))
        );
        assert_eq!(
            parse_command("scheme Solarized"),
            Err(CommandError::UnknownScheme("Solarized".into()))
        );
    }

    #[test]
    fn screensaver_defaults_to_one_minute() {
        assert_eq!(
            parse_command("screensaver matrix"),
            Ok(ShellCommand::Screensaver {
                kind: ScreenSaverKind::Matrix,
                timeout_minutes: 1
            })
        );
        assert_eq!(
            parse_command("screensaver toasters"),
            Err(CommandError::UnknownScreenSaver("toasters".into()))
        );
    }
}
