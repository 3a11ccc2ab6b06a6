//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use tracing::{debug, info};

use crate::{
    appearance::{ColorScheme, WallpaperStyle},
    apps::{app_descriptor, app_descriptor_by_canonical, AppId},
    explorer::ExplorerView,
    interaction::{plan_folder_drop, plan_positioned_drop, DropPlan, PointerTarget},
    model::{
        DesktopState, DragSession, FileSystemItem, InteractionState, ItemId, ItemKind,
        PointerPosition, PositionUpdate, ResizeEdge, ResizeSession, WindowId,
    },
    window_manager::{resize_rect, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH},
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Open a new window for a catalog entry.
    OpenApp {
        app_id: AppId,
    },
    /// Activate (double-click) a file-system item.
    ///
    /// Folders navigate `from_window` when it is an Explorer window, otherwise they open a new
    /// Explorer rooted at the folder. Application shortcuts open their app. Plain files are inert.
    OpenItem {
        item_id: ItemId,
        from_window: Option<WindowId>,
    },
    CloseWindow {
        window_id: WindowId,
    },
    /// Focus (and raise) a window by id.
    FocusWindow {
        window_id: WindowId,
    },
    MinimizeWindow {
        window_id: WindowId,
    },
    /// Un-minimize and raise a window.
    RestoreWindow {
        window_id: WindowId,
    },
    /// Maximize into the screen work area, or return to the saved geometry.
    ToggleMaximize {
        window_id: WindowId,
    },
    /// Taskbar button press: restore when minimized or inactive, otherwise minimize.
    ToggleTaskbarWindow {
        window_id: WindowId,
    },
    SetWindowPosition {
        window_id: WindowId,
        x: i32,
        y: i32,
    },
    SetWindowSize {
        window_id: WindowId,
        width: i32,
        height: i32,
    },
    /// Begin dragging a window by its title bar.
    BeginMove {
        window_id: WindowId,
        pointer: PointerPosition,
    },
    UpdateMove {
        pointer: PointerPosition,
    },
    /// Commit the previewed drag geometry.
    EndMove,
    BeginResize {
        window_id: WindowId,
        edge: ResizeEdge,
        pointer: PointerPosition,
    },
    UpdateResize {
        pointer: PointerPosition,
    },
    /// Commit the previewed resize geometry.
    EndResize,
    ToggleStartMenu,
    CloseStartMenu,
    /// Pointer pressed inside `container` over `target`.
    PointerDown {
        container: ItemId,
        target: PointerTarget,
        pointer: PointerPosition,
    },
    PointerMove {
        pointer: PointerPosition,
    },
    PointerUp,
    /// Left click on an icon; `additive` when a multi-select modifier is held.
    ClickItem {
        container: ItemId,
        item_id: ItemId,
        additive: bool,
    },
    /// Right click on an icon before the context menu opens.
    ContextMenuItem {
        container: ItemId,
        item_id: ItemId,
    },
    /// Context-menu "Delete" on `item_id`; applies to the whole selection when it is part of a group.
    DeleteFromContextMenu {
        item_id: ItemId,
    },
    BeginItemDrag {
        container: ItemId,
        item_id: ItemId,
    },
    /// Drop the dragged icons onto a positioned container at `pointer`.
    DropOnContainer {
        container: ItemId,
        pointer: PointerPosition,
    },
    /// Drop the dragged icons into a flow-layout folder view.
    DropOnFolder {
        folder_id: ItemId,
    },
    CancelItemDrag,
    CreateItem {
        parent_id: ItemId,
        kind: ItemKind,
        name: String,
    },
    DeleteItems {
        item_ids: Vec<ItemId>,
    },
    MoveItems {
        item_ids: Vec<ItemId>,
        new_parent_id: ItemId,
    },
    SetItemPosition {
        item_id: ItemId,
        x: i32,
        y: i32,
    },
    BatchSetPosition {
        updates: Vec<PositionUpdate>,
    },
    /// Desktop "Refresh": clears the selection.
    RefreshDesktop,
    /// Restore the seed tree.
    ResetFileSystem,
    /// Replace the item set with previously persisted items.
    HydrateFileSystem {
        items: Vec<FileSystemItem>,
    },
    ExplorerNavigate {
        window_id: WindowId,
        folder_id: ItemId,
    },
    ExplorerBack {
        window_id: WindowId,
    },
    ExplorerUp {
        window_id: WindowId,
    },
    /// Display Properties "Background": image (or none), layout and background color.
    SetWallpaper {
        image: Option<String>,
        style: WallpaperStyle,
        color: String,
    },
    /// Display Properties "Appearance": title-bar and desktop colors.
    SetTheme {
        header_color: String,
        desktop_color: String,
    },
    ApplyColorScheme {
        scheme: ColorScheme,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the shell host to execute.
pub enum RuntimeEffect {
    /// Persist the current file-system item set.
    PersistFileSystem,
    /// Play a named UI sound effect.
    PlaySound(&'static str),
}

/// Applies a [`DesktopAction`] to the desktop runtime state and collects resulting side effects.
///
/// This function is the single transition engine coordinating the window manager, the virtual
/// file system, and the selection engine. Every action is total: references to windows or items
/// that no longer exist leave the state unchanged.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Vec<RuntimeEffect> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::OpenApp { app_id } => {
            open_app(state, app_id, None);
        }
        DesktopAction::OpenItem {
            item_id,
            from_window,
        } => open_item(state, &item_id, from_window),
        DesktopAction::CloseWindow { window_id } => {
            state.windows.close(window_id);
            state.explorers.remove(&window_id);
            cancel_sessions_for(interaction, window_id);
        }
        DesktopAction::FocusWindow { window_id } => {
            if state
                .windows
                .window(window_id)
                .is_some_and(|window| !window.minimized)
            {
                state.windows.focus(window_id);
                state.start_menu_open = false;
            } else {
                debug!(window_id = window_id.0, "ignoring focus of unknown or minimized window");
            }
        }
        DesktopAction::MinimizeWindow { window_id } => {
            state.windows.minimize(window_id);
            cancel_sessions_for(interaction, window_id);
        }
        DesktopAction::RestoreWindow { window_id } => state.windows.restore(window_id),
        DesktopAction::ToggleMaximize { window_id } => {
            state
                .windows
                .toggle_maximize(window_id, state.screen.work_area());
            cancel_sessions_for(interaction, window_id);
        }
        DesktopAction::ToggleTaskbarWindow { window_id } => {
            state.windows.toggle_taskbar_window(window_id);
        }
        DesktopAction::SetWindowPosition { window_id, x, y } => {
            state.windows.set_position(window_id, x, y);
        }
        DesktopAction::SetWindowSize {
            window_id,
            width,
            height,
        } => state.windows.set_size(window_id, width, height),
        DesktopAction::BeginMove { window_id, pointer } => {
            let Some(window) = state.windows.window(window_id) else {
                debug!(window_id = window_id.0, "ignoring move of unknown window");
                return effects;
            };
            if window.maximized || window.minimized {
                return effects;
            }
            let rect_start = window.rect;
            state.windows.focus(window_id);
            state.start_menu_open = false;
            interaction.dragging = Some(DragSession {
                window_id,
                pointer_start: pointer,
                rect_start,
                preview: rect_start,
            });
        }
        DesktopAction::UpdateMove { pointer } => {
            if let Some(session) = interaction.dragging.as_mut() {
                let dx = pointer.x - session.pointer_start.x;
                let dy = pointer.y - session.pointer_start.y;
                session.preview = session.rect_start.offset(dx, dy);
            }
        }
        DesktopAction::EndMove => {
            if let Some(session) = interaction.dragging.take() {
                state.windows.set_position(
                    session.window_id,
                    session.preview.x,
                    session.preview.y,
                );
            }
        }
        DesktopAction::BeginResize {
            window_id,
            edge,
            pointer,
        } => {
            let Some(window) = state.windows.window(window_id) else {
                debug!(window_id = window_id.0, "ignoring resize of unknown window");
                return effects;
            };
            if window.maximized || window.minimized || !window.resizable {
                return effects;
            }
            let rect_start = window.rect;
            state.windows.focus(window_id);
            state.start_menu_open = false;
            interaction.resizing = Some(ResizeSession {
                window_id,
                edge,
                pointer_start: pointer,
                rect_start,
                preview: rect_start,
            });
        }
        DesktopAction::UpdateResize { pointer } => {
            if let Some(session) = interaction.resizing.as_mut() {
                let dx = pointer.x - session.pointer_start.x;
                let dy = pointer.y - session.pointer_start.y;
                session.preview = resize_rect(session.rect_start, session.edge, dx, dy)
                    .clamped_min(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT);
            }
        }
        DesktopAction::EndResize => {
            if let Some(session) = interaction.resizing.take() {
                let rect = session.preview;
                state.windows.set_position(session.window_id, rect.x, rect.y);
                state.windows.set_size(session.window_id, rect.w, rect.h);
            }
        }
        DesktopAction::ToggleStartMenu => {
            state.start_menu_open = !state.start_menu_open;
        }
        DesktopAction::CloseStartMenu => {
            state.start_menu_open = false;
        }
        DesktopAction::PointerDown {
            container,
            target,
            pointer,
        } => {
            if !matches!(target, PointerTarget::StartMenu | PointerTarget::Taskbar) {
                state.start_menu_open = false;
            }
            if !matches!(target, PointerTarget::EmptySpace) {
                effects.push(RuntimeEffect::PlaySound("click"));
            }
            state.selection.pointer_down(&container, &target, pointer);
        }
        DesktopAction::PointerMove { pointer } => {
            if state.selection.is_selecting() {
                let container = state.selection.container().clone();
                let items = state.fs.items_in(&container);
                state.selection.pointer_move(pointer, items);
            }
        }
        DesktopAction::PointerUp => {
            state.selection.pointer_up();
        }
        DesktopAction::ClickItem {
            container,
            item_id,
            additive,
        } => {
            state
                .selection
                .click_item(&state.fs, &container, &item_id, additive);
        }
        DesktopAction::ContextMenuItem { container, item_id } => {
            state
                .selection
                .select_for_context_menu(&state.fs, &container, &item_id);
        }
        DesktopAction::DeleteFromContextMenu { item_id } => {
            let targets = state.selection.context_targets(&item_id);
            delete_existing(state, targets, &mut effects);
        }
        DesktopAction::BeginItemDrag { container, item_id } => {
            state.selection.begin_drag(&state.fs, &container, &item_id);
        }
        DesktopAction::DropOnContainer { container, pointer } => {
            let payload = state.selection.take_drag();
            let plan = plan_positioned_drop(&state.fs, payload.as_ref(), pointer, &container);
            apply_drop(state, plan, &mut effects);
        }
        DesktopAction::DropOnFolder { folder_id } => {
            let payload = state.selection.take_drag();
            let plan = plan_folder_drop(&state.fs, payload.as_ref(), &folder_id);
            apply_drop(state, plan, &mut effects);
        }
        DesktopAction::CancelItemDrag => {
            state.selection.take_drag();
        }
        DesktopAction::CreateItem {
            parent_id,
            kind,
            name,
        } => {
            state.fs.create(&parent_id, kind, &name);
            after_fs_mutation(state, &mut effects);
        }
        DesktopAction::DeleteItems { item_ids } => delete_existing(state, item_ids, &mut effects),
        DesktopAction::MoveItems {
            item_ids,
            new_parent_id,
        } => {
            let movable = item_ids
                .into_iter()
                .filter(|item_id| {
                    let allowed = state.fs.contains(item_id)
                        && !state.fs.would_create_cycle(item_id, &new_parent_id);
                    if !allowed {
                        debug!(item_id = %item_id, parent_id = %new_parent_id, "skipping move");
                    }
                    allowed
                })
                .collect::<Vec<_>>();
            if !movable.is_empty() {
                state.fs.move_items(&movable, &new_parent_id);
                after_fs_mutation(state, &mut effects);
            }
        }
        DesktopAction::SetItemPosition { item_id, x, y } => {
            state.fs.set_position(&item_id, x, y);
            after_fs_mutation(state, &mut effects);
        }
        DesktopAction::BatchSetPosition { updates } => {
            state.fs.batch_set_position(&updates);
            after_fs_mutation(state, &mut effects);
        }
        DesktopAction::RefreshDesktop => state.selection.clear_selection(),
        DesktopAction::ResetFileSystem => {
            info!("resetting file system to seed tree");
            state.fs.reset();
            state.selection.reset();
            effects.push(RuntimeEffect::PersistFileSystem);
        }
        DesktopAction::HydrateFileSystem { items } => {
            debug!(count = items.len(), "hydrating file system");
            state.fs.replace_all(items);
            state.selection.reset();
        }
        DesktopAction::ExplorerNavigate {
            window_id,
            folder_id,
        } => {
            if let Some(view) = state.explorers.get_mut(&window_id) {
                view.navigate(folder_id);
                state.selection.clear_selection();
            }
        }
        DesktopAction::ExplorerBack { window_id } => {
            if let Some(view) = state.explorers.get_mut(&window_id) {
                if view.back() {
                    state.selection.clear_selection();
                }
            }
        }
        DesktopAction::ExplorerUp { window_id } => {
            if let Some(view) = state.explorers.get_mut(&window_id) {
                if view.up(&state.fs) {
                    state.selection.clear_selection();
                }
            }
        }
        DesktopAction::SetWallpaper {
            image,
            style,
            color,
        } => state.appearance.set_wallpaper(image, style, color),
        DesktopAction::SetTheme {
            header_color,
            desktop_color,
        } => state.appearance.set_theme(header_color, desktop_color),
        DesktopAction::ApplyColorScheme { scheme } => state.appearance.apply_scheme(scheme),
    }

    effects
}

fn open_app(state: &mut DesktopState, app_id: AppId, folder_id: Option<ItemId>) -> WindowId {
    let window_id = state.windows.open(app_descriptor(app_id));
    if app_id == AppId::Explorer {
        let view = folder_id.map(ExplorerView::rooted_at).unwrap_or_default();
        state.explorers.insert(window_id, view);
    }
    state.start_menu_open = false;
    state.selection.clear_selection();
    window_id
}

fn open_item(state: &mut DesktopState, item_id: &ItemId, from_window: Option<WindowId>) {
    let Some(item) = state.fs.item(item_id) else {
        debug!(item_id = %item_id, "ignoring open of unknown item");
        return;
    };
    match item.kind {
        ItemKind::Folder => {
            if let Some(view) = from_window.and_then(|id| state.explorers.get_mut(&id)) {
                view.navigate(item_id.clone());
                state.selection.clear_selection();
            } else {
                open_app(state, AppId::Explorer, Some(item_id.clone()));
            }
        }
        ItemKind::App => {
            let Some(app) = item.app_id.as_deref().and_then(app_descriptor_by_canonical) else {
                debug!(item_id = %item_id, "shortcut does not name a known app");
                return;
            };
            open_app(state, app.app_id, None);
        }
        ItemKind::File => {}
    }
}

fn apply_drop(state: &mut DesktopState, plan: Option<DropPlan>, effects: &mut Vec<RuntimeEffect>) {
    let Some(plan) = plan.filter(|plan| !plan.is_empty()) else {
        return;
    };
    if !plan.reparent.is_empty() {
        state.fs.move_items(&plan.reparent, &plan.destination);
    }
    state.fs.batch_set_position(&plan.positions);
    after_fs_mutation(state, effects);
}

fn delete_existing(
    state: &mut DesktopState,
    mut item_ids: Vec<ItemId>,
    effects: &mut Vec<RuntimeEffect>,
) {
    item_ids.retain(|item_id| state.fs.contains(item_id));
    if item_ids.is_empty() {
        debug!("ignoring delete of unknown items");
        return;
    }
    state.fs.delete_items(&item_ids);
    after_fs_mutation(state, effects);
}

fn after_fs_mutation(state: &mut DesktopState, effects: &mut Vec<RuntimeEffect>) {
    state.selection.prune(&state.fs);
    effects.push(RuntimeEffect::PersistFileSystem);
}

fn cancel_sessions_for(interaction: &mut InteractionState, window_id: WindowId) {
    if interaction
        .dragging
        .as_ref()
        .is_some_and(|session| session.window_id == window_id)
    {
        interaction.dragging = None;
    }
    if interaction
        .resizing
        .as_ref()
        .is_some_and(|session| session.window_id == window_id)
    {
        interaction.resizing = None;
    }
}
