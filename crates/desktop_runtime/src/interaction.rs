//! Pointer-driven icon selection and drag-and-drop placement.
//!
//! The engine owns only the current selection and the in-progress gesture. It reads item
//! geometry from the [`VirtualFileSystem`] and produces [`DropPlan`]s that the reducer applies
//! through the file system's own operations.

use serde::Serialize;
use tracing::debug;

use crate::{
    model::{FileSystemItem, ItemId, PointerPosition, PositionUpdate, WindowId},
    vfs::VirtualFileSystem,
};

/// Logical footprint of an icon on a positioned container.
pub const ICON_CELL_SIZE: i32 = 80;
/// Pointer offset subtracted before snapping so the icon centers on the pointer.
pub const ICON_HALF_CELL: i32 = ICON_CELL_SIZE / 2;
/// Margin added back after flooring to the grid.
pub const GRID_MARGIN: i32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectionBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl SelectionBox {
    /// Normalizes two corners so drag direction does not matter.
    pub fn from_corners(anchor: PointerPosition, current: PointerPosition) -> Self {
        Self {
            x: anchor.x.min(current.x),
            y: anchor.y.min(current.y),
            width: (current.x - anchor.x).abs(),
            height: (current.y - anchor.y).abs(),
        }
    }

    /// Open-interval overlap test against an icon footprint anchored at `(x, y)`.
    pub fn overlaps_icon(&self, x: i32, y: i32) -> bool {
        x < self.x + self.width
            && x + ICON_CELL_SIZE > self.x
            && y < self.y + self.height
            && y + ICON_CELL_SIZE > self.y
    }
}

/// What a pointer-down landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerTarget {
    EmptySpace,
    Icon(ItemId),
    Window(WindowId),
    Taskbar,
    StartMenu,
}

/// Items carried by an icon drag. The leader is the icon the gesture started on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DragPayload {
    pub item_ids: Vec<ItemId>,
    pub leader_id: ItemId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Gesture {
    Idle,
    Selecting {
        anchor: PointerPosition,
        selection_box: Option<SelectionBox>,
    },
    Dragging(DragPayload),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEngine {
    container: ItemId,
    selected: Vec<ItemId>,
    gesture: Gesture,
}

impl Default for SelectionEngine {
    fn default() -> Self {
        Self {
            container: ItemId::desktop(),
            selected: Vec::new(),
            gesture: Gesture::Idle,
        }
    }
}

impl SelectionEngine {
    /// Container the current selection belongs to.
    pub fn container(&self) -> &ItemId {
        &self.container
    }

    pub fn selected_ids(&self) -> &[ItemId] {
        &self.selected
    }

    pub fn is_selected(&self, item_id: &ItemId) -> bool {
        self.selected.contains(item_id)
    }

    pub fn is_selecting(&self) -> bool {
        matches!(self.gesture, Gesture::Selecting { .. })
    }

    pub fn selection_box(&self) -> Option<SelectionBox> {
        match &self.gesture {
            Gesture::Selecting { selection_box, .. } => *selection_box,
            _ => None,
        }
    }

    pub fn drag_payload(&self) -> Option<&DragPayload> {
        match &self.gesture {
            Gesture::Dragging(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Switches to `container`, dropping any selection that belonged elsewhere.
    pub fn enter_container(&mut self, container: &ItemId) {
        if &self.container != container {
            self.container = container.clone();
            self.selected.clear();
        }
    }

    /// Starts a rubber band when the pointer lands on empty container space.
    ///
    /// Returns `true` when the engine entered the selecting state.
    pub fn pointer_down(
        &mut self,
        container: &ItemId,
        target: &PointerTarget,
        pointer: PointerPosition,
    ) -> bool {
        if *target != PointerTarget::EmptySpace || !matches!(self.gesture, Gesture::Idle) {
            return false;
        }
        self.enter_container(container);
        self.selected.clear();
        self.gesture = Gesture::Selecting {
            anchor: pointer,
            selection_box: None,
        };
        true
    }

    /// Recomputes the box and the selection from scratch against `items`.
    pub fn pointer_move<'a>(
        &mut self,
        pointer: PointerPosition,
        items: impl IntoIterator<Item = &'a FileSystemItem>,
    ) {
        let Gesture::Selecting {
            anchor,
            selection_box,
        } = &mut self.gesture
        else {
            return;
        };
        let next_box = SelectionBox::from_corners(*anchor, pointer);
        *selection_box = Some(next_box);
        self.selected = items
            .into_iter()
            .filter(|item| next_box.overlaps_icon(item.x.unwrap_or(0), item.y.unwrap_or(0)))
            .map(|item| item.id.clone())
            .collect();
    }

    /// Ends a rubber band, discarding the box. The selection persists.
    pub fn pointer_up(&mut self) -> bool {
        if self.is_selecting() {
            self.gesture = Gesture::Idle;
            return true;
        }
        false
    }

    /// Plain click replaces the selection; an additive click appends (never toggles off).
    ///
    /// Returns `false` without touching the selection when `item_id` is not in `container`.
    pub fn click_item(
        &mut self,
        vfs: &VirtualFileSystem,
        container: &ItemId,
        item_id: &ItemId,
        additive: bool,
    ) -> bool {
        if !is_member(vfs, container, item_id) {
            debug!(item_id = %item_id, container = %container, "ignoring click outside container");
            return false;
        }
        self.enter_container(container);
        if additive {
            if !self.selected.contains(item_id) {
                self.selected.push(item_id.clone());
            }
        } else {
            self.selected = vec![item_id.clone()];
        }
        true
    }

    /// Right-click on an unselected item selects only that item.
    pub fn select_for_context_menu(
        &mut self,
        vfs: &VirtualFileSystem,
        container: &ItemId,
        item_id: &ItemId,
    ) -> bool {
        if !is_member(vfs, container, item_id) {
            debug!(item_id = %item_id, container = %container, "ignoring context menu outside container");
            return false;
        }
        self.enter_container(container);
        if !self.selected.contains(item_id) {
            self.selected = vec![item_id.clone()];
        }
        true
    }

    /// Items a context-menu action on `item_id` applies to.
    pub fn context_targets(&self, item_id: &ItemId) -> Vec<ItemId> {
        if self.selected.contains(item_id) && self.selected.len() > 1 {
            self.selected.clone()
        } else {
            vec![item_id.clone()]
        }
    }

    /// Starts dragging from `item_id`: the whole selection when it is selected, else just it.
    pub fn begin_drag(
        &mut self,
        vfs: &VirtualFileSystem,
        container: &ItemId,
        item_id: &ItemId,
    ) -> Option<DragPayload> {
        if !is_member(vfs, container, item_id) {
            debug!(item_id = %item_id, container = %container, "ignoring drag outside container");
            return None;
        }
        self.enter_container(container);
        if !self.selected.contains(item_id) {
            self.selected = vec![item_id.clone()];
        }
        let payload = DragPayload {
            item_ids: self.selected.clone(),
            leader_id: item_id.clone(),
        };
        self.gesture = Gesture::Dragging(payload.clone());
        Some(payload)
    }

    /// Ends a drag gesture and hands back its payload, if one was in flight.
    pub fn take_drag(&mut self) -> Option<DragPayload> {
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Dragging(payload) => Some(payload),
            other => {
                self.gesture = other;
                None
            }
        }
    }

    /// Drops selected ids that no longer exist or no longer live in the selection's container.
    pub fn prune(&mut self, vfs: &VirtualFileSystem) {
        let container = &self.container;
        self.selected
            .retain(|item_id| is_member(vfs, container, item_id));
    }

    /// Resets to the idle desktop state with nothing selected.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn is_member(vfs: &VirtualFileSystem, container: &ItemId, item_id: &ItemId) -> bool {
    vfs.item(item_id)
        .is_some_and(|item| &item.parent_id == container)
}

/// Mutations produced by a drop, applied in order: reparent, then reposition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropPlan {
    pub destination: ItemId,
    pub reparent: Vec<ItemId>,
    pub positions: Vec<PositionUpdate>,
}

impl DropPlan {
    pub fn is_empty(&self) -> bool {
        self.reparent.is_empty() && self.positions.is_empty()
    }
}

/// Snaps a drop pointer to the icon grid: `floor((p - 40) / 80) * 80 + 20` on each axis.
pub fn snap_to_grid(pointer: PointerPosition) -> (i32, i32) {
    let snap = |raw: i32| (raw - ICON_HALF_CELL).div_euclid(ICON_CELL_SIZE) * ICON_CELL_SIZE + GRID_MARGIN;
    (snap(pointer.x), snap(pointer.y))
}

/// Plans a drop onto a positioned container such as the desktop.
///
/// The leader lands on the snapped cell and every other dragged item keeps its offset from the
/// leader. Items outside `container` are reparented into it first and land on the leader's
/// cell. Missing coordinates of items already in `container` count as 0.
pub fn plan_positioned_drop(
    vfs: &VirtualFileSystem,
    payload: Option<&DragPayload>,
    pointer: PointerPosition,
    container: &ItemId,
) -> Option<DropPlan> {
    let Some(payload) = payload.filter(|payload| !payload.item_ids.is_empty()) else {
        debug!("ignoring drop without drag payload");
        return None;
    };
    let Some(leader) = vfs.item(&payload.leader_id) else {
        debug!(leader_id = %payload.leader_id, "ignoring drop with unknown leader");
        return None;
    };

    let (snap_x, snap_y) = snap_to_grid(pointer);
    let prior_position = |item: &FileSystemItem| {
        (&item.parent_id == container).then(|| (item.x.unwrap_or(0), item.y.unwrap_or(0)))
    };
    let (leader_x, leader_y) = prior_position(leader).unwrap_or((snap_x, snap_y));
    let (dx, dy) = (snap_x - leader_x, snap_y - leader_y);

    let mut plan = DropPlan {
        destination: container.clone(),
        reparent: Vec::new(),
        positions: Vec::new(),
    };
    for item_id in &payload.item_ids {
        let Some(item) = vfs.item(item_id) else {
            continue;
        };
        if vfs.would_create_cycle(item_id, container) {
            continue;
        }
        let (x, y) = match prior_position(item) {
            Some((x, y)) => (x + dx, y + dy),
            None => (snap_x, snap_y),
        };
        if &item.parent_id != container {
            plan.reparent.push(item_id.clone());
        }
        plan.positions.push(PositionUpdate {
            id: item_id.clone(),
            x,
            y,
        });
    }
    Some(plan)
}

/// Plans a drop into a flow-layout folder view: reparent only, positions untouched.
pub fn plan_folder_drop(
    vfs: &VirtualFileSystem,
    payload: Option<&DragPayload>,
    folder_id: &ItemId,
) -> Option<DropPlan> {
    let Some(payload) = payload else {
        debug!("ignoring folder drop without drag payload");
        return None;
    };
    let reparent = payload
        .item_ids
        .iter()
        .filter(|item_id| {
            vfs.item(item_id)
                .is_some_and(|item| &item.parent_id != folder_id)
                && !vfs.would_create_cycle(item_id, folder_id)
        })
        .cloned()
        .collect();
    Some(DropPlan {
        destination: folder_id.clone(),
        reparent,
        positions: Vec::new(),
    })
}
