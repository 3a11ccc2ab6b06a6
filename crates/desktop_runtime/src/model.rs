//! Core data types shared by the window manager, file system, and interaction engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    appearance::Appearance, apps::AppId, explorer::ExplorerView, interaction::SelectionEngine,
    vfs::VirtualFileSystem, window_manager::WindowManager,
};

pub const DEFAULT_WINDOW_WIDTH: i32 = 400;
pub const DEFAULT_WINDOW_HEIGHT: i32 = 300;
/// Vertical space reserved for the taskbar below the maximize work area.
pub const TASKBAR_HEIGHT: i32 = 30;

/// Sentinel parent of top-level containers. No item carries this id.
pub const ROOT_FOLDER_ID: &str = "root";
pub const DESKTOP_FOLDER_ID: &str = "desktop";
pub const MY_COMPUTER_FOLDER_ID: &str = "my_computer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn root() -> Self {
        Self::new(ROOT_FOLDER_ID)
    }

    pub fn desktop() -> Self {
        Self::new(DESKTOP_FOLDER_ID)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == ROOT_FOLDER_ID
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    pub fn clamped_min(self, min_w: i32, min_h: i32) -> Self {
        Self {
            w: self.w.max(min_w),
            h: self.h.max(min_h),
            ..self
        }
    }
}

impl Default for WindowRect {
    fn default() -> Self {
        Self {
            x: 50,
            y: 50,
            w: DEFAULT_WINDOW_WIDTH,
            h: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

/// Desktop viewport used to derive the maximize work area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenLayout {
    pub width: i32,
    pub height: i32,
    pub taskbar_height: i32,
}

impl ScreenLayout {
    /// Full viewport minus the bottom taskbar reservation.
    pub fn work_area(self) -> WindowRect {
        WindowRect {
            x: 0,
            y: 0,
            w: self.width,
            h: (self.height - self.taskbar_height).max(0),
        }
    }
}

impl Default for ScreenLayout {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            taskbar_height: TASKBAR_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub app_id: AppId,
    pub title: String,
    pub rect: WindowRect,
    /// Geometry saved on maximize; present only while `maximized` is true.
    pub restore_rect: Option<WindowRect>,
    pub z_index: u32,
    pub minimized: bool,
    pub maximized: bool,
    pub resizable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Folder,
    File,
    /// Application shortcut; the item's `app_id` names the catalog entry.
    App,
}

impl ItemKind {
    pub fn default_icon(self) -> &'static str {
        match self {
            Self::Folder => "📁",
            Self::File | Self::App => "📄",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSystemItem {
    pub id: ItemId,
    pub parent_id: ItemId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
}

impl FileSystemItem {
    pub fn position(&self) -> Option<(i32, i32)> {
        Some((self.x?, self.y?))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionUpdate {
    pub id: ItemId,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

impl PointerPosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeEdge {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

/// In-progress title-bar drag of a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub window_id: WindowId,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
    /// Geometry shown while dragging; committed on release.
    pub preview: WindowRect,
}

/// In-progress edge/corner resize of a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeSession {
    pub window_id: WindowId,
    pub edge: ResizeEdge,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
    pub preview: WindowRect,
}

/// Transient window gesture state owned by the gesture layer, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub dragging: Option<DragSession>,
    pub resizing: Option<ResizeSession>,
}

/// Complete runtime state reduced by [`crate::reducer::reduce_desktop`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DesktopState {
    pub windows: WindowManager,
    pub fs: VirtualFileSystem,
    pub selection: SelectionEngine,
    /// Navigation state for each open Explorer window.
    pub explorers: BTreeMap<WindowId, ExplorerView>,
    pub start_menu_open: bool,
    pub screen: ScreenLayout,
    pub appearance: Appearance,
}

impl DesktopState {
    pub fn with_screen(screen: ScreenLayout) -> Self {
        Self {
            screen,
            ..Self::default()
        }
    }

    /// Icons rendered on the desktop surface.
    pub fn desktop_items(&self) -> Vec<&FileSystemItem> {
        self.fs.items_in(&ItemId::desktop())
    }

    pub fn explorer(&self, window_id: WindowId) -> Option<&ExplorerView> {
        self.explorers.get(&window_id)
    }
}
