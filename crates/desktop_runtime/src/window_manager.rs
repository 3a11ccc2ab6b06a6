//! Window lifecycle, stacking order, focus, and maximize/restore state.
//!
//! Every operation is total: an id that does not name an open window is ignored, so a stale
//! reference (for example a close racing another close) never produces an undefined transition.

use tracing::debug;

use crate::{
    apps::AppDescriptor,
    model::{
        ResizeEdge, WindowId, WindowRecord, WindowRect, DEFAULT_WINDOW_HEIGHT,
        DEFAULT_WINDOW_WIDTH,
    },
};

/// Base offset of the first cascaded window.
pub const CASCADE_ORIGIN: i32 = 50;
/// Per-window cascade step.
pub const CASCADE_STEP: i32 = 30;
/// Cascade offsets wrap at this bound instead of drifting off-screen.
pub const CASCADE_WRAP: i32 = 300;
/// Geometry used when un-maximizing a window with no saved geometry.
pub const FALLBACK_RESTORE_RECT: WindowRect = WindowRect {
    x: 50,
    y: 50,
    w: 400,
    h: 300,
};
/// Smallest geometry a resize gesture may produce.
pub const MIN_WINDOW_WIDTH: i32 = 120;
pub const MIN_WINDOW_HEIGHT: i32 = 80;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WindowManager {
    next_window_id: u64,
    windows: Vec<WindowRecord>,
    active_window_id: Option<WindowId>,
}

impl WindowManager {
    pub fn new() -> Self {
        Self {
            next_window_id: 1,
            windows: Vec::new(),
            active_window_id: None,
        }
    }

    /// Open windows in creation order. Use `z_index` for paint order.
    pub fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    pub fn window(&self, window_id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == window_id)
    }

    pub fn active_window_id(&self) -> Option<WindowId> {
        self.active_window_id
    }

    /// Window with the highest `z_index`, regardless of minimized state.
    pub fn top_window_id(&self) -> Option<WindowId> {
        self.windows.iter().max_by_key(|w| w.z_index).map(|w| w.id)
    }

    /// Windows sorted bottom-to-top for painting.
    pub fn stacking_order(&self) -> Vec<&WindowRecord> {
        let mut ordered = self.windows.iter().collect::<Vec<_>>();
        ordered.sort_by_key(|w| w.z_index);
        ordered
    }

    fn max_z_index(&self) -> u32 {
        self.windows.iter().map(|w| w.z_index).max().unwrap_or(0)
    }

    fn next_window_id(&mut self) -> WindowId {
        if self.next_window_id == 0 {
            self.next_window_id = 1;
        }
        let id = WindowId(self.next_window_id);
        self.next_window_id = self.next_window_id.saturating_add(1);
        id
    }

    fn find_window_mut(&mut self, window_id: WindowId) -> Option<&mut WindowRecord> {
        let found = self.windows.iter_mut().find(|w| w.id == window_id);
        if found.is_none() {
            debug!(window_id = window_id.0, "ignoring operation on unknown window");
        }
        found
    }

    /// Opens a new window for a catalog entry and makes it active.
    pub fn open(&mut self, app: &AppDescriptor) -> WindowId {
        let window_id = self.next_window_id();
        let stagger = (self.windows.len() as i32 * CASCADE_STEP) % CASCADE_WRAP;
        let record = WindowRecord {
            id: window_id,
            app_id: app.app_id,
            title: app.title.to_string(),
            rect: WindowRect {
                x: CASCADE_ORIGIN + stagger,
                y: CASCADE_ORIGIN + stagger,
                w: app.preferred_width.unwrap_or(DEFAULT_WINDOW_WIDTH),
                h: app.preferred_height.unwrap_or(DEFAULT_WINDOW_HEIGHT),
            },
            restore_rect: None,
            z_index: self.max_z_index() + 1,
            minimized: false,
            maximized: false,
            resizable: app.resizable,
        };
        debug!(
            window_id = window_id.0,
            app = app.app_id.canonical_id(),
            z_index = record.z_index,
            "window opened"
        );
        self.windows.push(record);
        self.active_window_id = Some(window_id);
        window_id
    }

    /// Removes a window. Closing the active window leaves no window active.
    pub fn close(&mut self, window_id: WindowId) {
        let before_len = self.windows.len();
        self.windows.retain(|w| w.id != window_id);
        if self.windows.len() == before_len {
            debug!(window_id = window_id.0, "ignoring close of unknown window");
            return;
        }
        if self.active_window_id == Some(window_id) {
            self.active_window_id = None;
        }
    }

    pub fn minimize(&mut self, window_id: WindowId) {
        let Some(window) = self.find_window_mut(window_id) else {
            return;
        };
        window.minimized = true;
        if self.active_window_id == Some(window_id) {
            self.active_window_id = None;
        }
    }

    /// Un-minimizes a window and brings it to the front as the active window.
    pub fn restore(&mut self, window_id: WindowId) {
        let z_index = self.max_z_index() + 1;
        let Some(window) = self.find_window_mut(window_id) else {
            return;
        };
        window.minimized = false;
        window.z_index = z_index;
        self.active_window_id = Some(window_id);
    }

    /// Raises a window to a fresh top `z_index` and makes it active.
    ///
    /// Minimized windows cannot become active; focusing one is ignored. Use [`Self::restore`].
    pub fn focus(&mut self, window_id: WindowId) {
        let z_index = self.max_z_index() + 1;
        let Some(window) = self.find_window_mut(window_id) else {
            return;
        };
        if window.minimized {
            debug!(window_id = window_id.0, "ignoring focus of minimized window");
            return;
        }
        window.z_index = z_index;
        self.active_window_id = Some(window_id);
    }

    /// Flips between maximized (filling `work_area`) and the saved pre-maximize geometry.
    pub fn toggle_maximize(&mut self, window_id: WindowId, work_area: WindowRect) {
        let Some(window) = self.find_window_mut(window_id) else {
            return;
        };
        if window.maximized {
            window.rect = window.restore_rect.take().unwrap_or(FALLBACK_RESTORE_RECT);
            window.maximized = false;
            return;
        }
        window.restore_rect = Some(window.rect);
        window.rect = work_area;
        window.maximized = true;
        self.focus(window_id);
    }

    pub fn set_position(&mut self, window_id: WindowId, x: i32, y: i32) {
        if let Some(window) = self.find_window_mut(window_id) {
            window.rect.x = x;
            window.rect.y = y;
        }
    }

    pub fn set_size(&mut self, window_id: WindowId, width: i32, height: i32) {
        if let Some(window) = self.find_window_mut(window_id) {
            window.rect.w = width;
            window.rect.h = height;
        }
    }

    /// Taskbar button behavior: restore when minimized or inactive, otherwise minimize.
    pub fn toggle_taskbar_window(&mut self, window_id: WindowId) {
        let Some(window) = self.window(window_id) else {
            debug!(window_id = window_id.0, "ignoring taskbar toggle of unknown window");
            return;
        };
        let is_active = self.active_window_id == Some(window_id);
        if window.minimized || !is_active {
            self.restore(window_id);
        } else {
            self.minimize(window_id);
        }
    }
}

/// Applies resize deltas for a given edge/corner drag.
pub fn resize_rect(start: WindowRect, edge: ResizeEdge, dx: i32, dy: i32) -> WindowRect {
    match edge {
        ResizeEdge::East => WindowRect {
            w: start.w + dx,
            ..start
        },
        ResizeEdge::West => WindowRect {
            x: start.x + dx,
            w: start.w - dx,
            ..start
        },
        ResizeEdge::South => WindowRect {
            h: start.h + dy,
            ..start
        },
        ResizeEdge::North => WindowRect {
            y: start.y + dy,
            h: start.h - dy,
            ..start
        },
        ResizeEdge::NorthEast => WindowRect {
            y: start.y + dy,
            h: start.h - dy,
            w: start.w + dx,
            ..start
        },
        ResizeEdge::NorthWest => WindowRect {
            x: start.x + dx,
            y: start.y + dy,
            w: start.w - dx,
            h: start.h - dy,
        },
        ResizeEdge::SouthEast => WindowRect {
            w: start.w + dx,
            h: start.h + dy,
            ..start
        },
        ResizeEdge::SouthWest => WindowRect {
            x: start.x + dx,
            w: start.w - dx,
            h: start.h + dy,
            ..start
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::apps::{app_descriptor, AppId};

    const WORK_AREA: WindowRect = WindowRect {
        x: 0,
        y: 0,
        w: 1024,
        h: 738,
    };

    fn open(wm: &mut WindowManager, app_id: AppId) -> WindowId {
        wm.open(app_descriptor(app_id))
    }

    #[test]
    fn first_window_gets_z_index_one_and_catalog_geometry() {
        let mut wm = WindowManager::new();
        let win = open(&mut wm, AppId::Explorer);

        let record = wm.window(win).expect("window");
        assert_eq!(record.z_index, 1);
        assert_eq!(
            record.rect,
            WindowRect {
                x: 50,
                y: 50,
                w: 600,
                h: 400
            }
        );
        assert_eq!(record.title, "File Explorer");
        assert_eq!(wm.active_window_id(), Some(win));
    }

    #[test]
    fn cascade_wraps_after_ten_windows() {
        let mut wm = WindowManager::new();
        let ids = (0..11)
            .map(|_| open(&mut wm, AppId::Minesweeper))
            .collect::<Vec<_>>();

        assert_eq!(wm.window(ids[1]).unwrap().rect.x, 80);
        assert_eq!(wm.window(ids[9]).unwrap().rect.x, 320);
        assert_eq!(wm.window(ids[10]).unwrap().rect.x, 50);
    }

    #[test]
    fn close_of_active_window_leaves_nothing_active() {
        let mut wm = WindowManager::new();
        let first = open(&mut wm, AppId::Notepad);
        let second = open(&mut wm, AppId::Notepad);

        wm.close(second);
        assert_eq!(wm.active_window_id(), None);
        assert!(wm.window(second).is_none());
        assert!(wm.window(first).is_some());

        wm.close(second);
        assert_eq!(wm.windows().len(), 1);
    }

    #[test]
    fn close_of_inactive_window_keeps_active_reference() {
        let mut wm = WindowManager::new();
        let first = open(&mut wm, AppId::Notepad);
        let second = open(&mut wm, AppId::Solitaire);

        wm.close(first);
        assert_eq!(wm.active_window_id(), Some(second));
    }

    #[test]
    fn minimize_is_idempotent_and_restore_raises() {
        let mut wm = WindowManager::new();
        let first = open(&mut wm, AppId::Notepad);
        let second = open(&mut wm, AppId::Solitaire);

        wm.minimize(first);
        wm.minimize(first);
        assert!(wm.window(first).unwrap().minimized);
        assert_eq!(wm.active_window_id(), Some(second));

        wm.restore(first);
        let record = wm.window(first).unwrap();
        assert!(!record.minimized);
        assert_eq!(record.z_index, 3);
        assert_eq!(wm.active_window_id(), Some(first));
        assert_eq!(wm.top_window_id(), Some(first));
    }

    #[test]
    fn minimizing_active_window_clears_active() {
        let mut wm = WindowManager::new();
        let win = open(&mut wm, AppId::Notepad);
        wm.minimize(win);
        assert_eq!(wm.active_window_id(), None);
    }

    #[test]
    fn focus_always_bumps_to_a_new_maximum() {
        let mut wm = WindowManager::new();
        let first = open(&mut wm, AppId::Explorer);
        let _second = open(&mut wm, AppId::Notepad);

        wm.focus(first);
        assert_eq!(wm.window(first).unwrap().z_index, 3);
        wm.focus(first);
        assert_eq!(wm.window(first).unwrap().z_index, 4);
        assert_eq!(wm.active_window_id(), Some(first));
    }

    #[test]
    fn focus_of_minimized_window_is_ignored() {
        let mut wm = WindowManager::new();
        let first = open(&mut wm, AppId::Explorer);
        let second = open(&mut wm, AppId::Notepad);
        wm.minimize(first);

        wm.focus(first);
        assert_eq!(wm.active_window_id(), Some(second));
        assert_eq!(wm.window(first).unwrap().z_index, 1);
    }

    #[test]
    fn toggle_maximize_round_trips_geometry() {
        let mut wm = WindowManager::new();
        let win = open(&mut wm, AppId::Solitaire);
        wm.set_position(win, 123, 45);
        let before = wm.window(win).unwrap().rect;

        wm.toggle_maximize(win, WORK_AREA);
        let maximized = wm.window(win).unwrap();
        assert!(maximized.maximized);
        assert_eq!(maximized.rect, WORK_AREA);
        assert_eq!(maximized.restore_rect, Some(before));

        wm.toggle_maximize(win, WORK_AREA);
        let restored = wm.window(win).unwrap();
        assert!(!restored.maximized);
        assert_eq!(restored.rect, before);
        assert_eq!(restored.restore_rect, None);
    }

    #[test]
    fn unmaximize_without_saved_geometry_uses_fallback() {
        let mut wm = WindowManager::new();
        let win = open(&mut wm, AppId::Solitaire);
        wm.toggle_maximize(win, WORK_AREA);
        wm.windows
            .iter_mut()
            .find(|w| w.id == win)
            .expect("window")
            .restore_rect = None;

        wm.toggle_maximize(win, WORK_AREA);
        assert_eq!(wm.window(win).unwrap().rect, FALLBACK_RESTORE_RECT);
    }

    #[test]
    fn maximize_focuses_the_window() {
        let mut wm = WindowManager::new();
        let first = open(&mut wm, AppId::Explorer);
        let _second = open(&mut wm, AppId::Notepad);

        wm.toggle_maximize(first, WORK_AREA);
        assert_eq!(wm.active_window_id(), Some(first));
        assert_eq!(wm.top_window_id(), Some(first));
    }

    #[test]
    fn taskbar_toggle_minimizes_active_and_restores_otherwise() {
        let mut wm = WindowManager::new();
        let first = open(&mut wm, AppId::Explorer);
        let second = open(&mut wm, AppId::Notepad);

        wm.toggle_taskbar_window(second);
        assert!(wm.window(second).unwrap().minimized);

        wm.toggle_taskbar_window(second);
        assert!(!wm.window(second).unwrap().minimized);
        assert_eq!(wm.active_window_id(), Some(second));

        wm.toggle_taskbar_window(first);
        assert_eq!(wm.active_window_id(), Some(first));
        assert!(!wm.window(first).unwrap().minimized);
    }

    #[test]
    fn operations_on_unknown_ids_are_noops() {
        let mut wm = WindowManager::new();
        let win = open(&mut wm, AppId::Notepad);
        let before = wm.clone();
        let ghost = WindowId(99);

        wm.close(ghost);
        wm.minimize(ghost);
        wm.restore(ghost);
        wm.focus(ghost);
        wm.toggle_maximize(ghost, WORK_AREA);
        wm.set_position(ghost, 1, 1);
        wm.set_size(ghost, 1, 1);
        wm.toggle_taskbar_window(ghost);

        assert_eq!(wm, before);
        assert_eq!(wm.active_window_id(), Some(win));
    }

    #[test]
    fn resize_rect_moves_origin_for_west_and_north_edges() {
        let start = WindowRect {
            x: 100,
            y: 100,
            w: 300,
            h: 200,
        };
        assert_eq!(
            resize_rect(start, ResizeEdge::NorthWest, 20, 10),
            WindowRect {
                x: 120,
                y: 110,
                w: 280,
                h: 190
            }
        );
        assert_eq!(
            resize_rect(start, ResizeEdge::SouthEast, 20, 10),
            WindowRect {
                x: 100,
                y: 100,
                w: 320,
                h: 210
            }
        );
    }
}
