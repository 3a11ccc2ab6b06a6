//! In-memory virtual file system backing desktop icons and folder views.
//!
//! Items form a parent-referencing forest under the `root` sentinel. The store is a permissive
//! mutator: `move_items` does not check that the destination exists or is a folder, and
//! `delete_items` does not cascade to descendants. Callers that need stricter behavior use
//! [`VirtualFileSystem::would_create_cycle`] before mutating.

use std::collections::HashSet;

use tracing::debug;
use uuid::Uuid;

use crate::model::{FileSystemItem, ItemId, ItemKind, PositionUpdate};

/// Coordinates given to newly created items.
pub const DEFAULT_ITEM_POSITION: (i32, i32) = (20, 20);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualFileSystem {
    items: Vec<FileSystemItem>,
}

impl Default for VirtualFileSystem {
    fn default() -> Self {
        Self::with_items(seed_items())
    }
}

impl VirtualFileSystem {
    pub fn with_items(items: Vec<FileSystemItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[FileSystemItem] {
        &self.items
    }

    pub fn item(&self, item_id: &ItemId) -> Option<&FileSystemItem> {
        self.items.iter().find(|item| &item.id == item_id)
    }

    pub fn contains(&self, item_id: &ItemId) -> bool {
        self.item(item_id).is_some()
    }

    /// Items whose parent is `folder_id`, in insertion order.
    pub fn items_in(&self, folder_id: &ItemId) -> Vec<&FileSystemItem> {
        self.items
            .iter()
            .filter(|item| &item.parent_id == folder_id)
            .collect()
    }

    /// Appends a new item with a fresh id, default icon, and default coordinates.
    pub fn create(&mut self, parent_id: &ItemId, kind: ItemKind, name: &str) -> ItemId {
        let id = ItemId::new(Uuid::new_v4().to_string());
        let (x, y) = DEFAULT_ITEM_POSITION;
        self.items.push(FileSystemItem {
            id: id.clone(),
            parent_id: parent_id.clone(),
            name: name.to_string(),
            kind,
            icon: kind.default_icon().to_string(),
            app_id: None,
            content: None,
            x: Some(x),
            y: Some(y),
        });
        debug!(item_id = %id, parent_id = %parent_id, ?kind, "item created");
        id
    }

    /// Reparents every listed item to `new_parent_id`, regardless of its current parent.
    pub fn move_items(&mut self, item_ids: &[ItemId], new_parent_id: &ItemId) {
        let targets = item_ids.iter().collect::<HashSet<_>>();
        for item in self.items.iter_mut().filter(|item| targets.contains(&item.id)) {
            item.parent_id = new_parent_id.clone();
        }
    }

    pub fn set_position(&mut self, item_id: &ItemId, x: i32, y: i32) {
        match self.items.iter_mut().find(|item| &item.id == item_id) {
            Some(item) => {
                item.x = Some(x);
                item.y = Some(y);
            }
            None => debug!(item_id = %item_id, "ignoring position update of unknown item"),
        }
    }

    /// Applies each update to its matching item. Items without an update are untouched.
    ///
    /// When an id appears more than once, the first update wins.
    pub fn batch_set_position(&mut self, updates: &[PositionUpdate]) {
        for item in &mut self.items {
            if let Some(update) = updates.iter().find(|update| update.id == item.id) {
                item.x = Some(update.x);
                item.y = Some(update.y);
            }
        }
    }

    /// Removes exactly the listed items. Children of a deleted folder are left in place.
    pub fn delete_items(&mut self, item_ids: &[ItemId]) {
        let targets = item_ids.iter().collect::<HashSet<_>>();
        self.items.retain(|item| !targets.contains(&item.id));
    }

    /// Returns `true` when `ancestor` appears on the parent chain of `item_id`.
    pub fn is_ancestor(&self, ancestor: &ItemId, item_id: &ItemId) -> bool {
        let mut seen = HashSet::new();
        let mut current = self.item(item_id).map(|item| &item.parent_id);
        while let Some(parent_id) = current {
            if parent_id == ancestor {
                return true;
            }
            if !seen.insert(parent_id) {
                return false;
            }
            current = self.item(parent_id).map(|item| &item.parent_id);
        }
        false
    }

    /// Returns `true` when reparenting `item_id` under `new_parent_id` would break the forest.
    pub fn would_create_cycle(&self, item_id: &ItemId, new_parent_id: &ItemId) -> bool {
        item_id == new_parent_id || self.is_ancestor(item_id, new_parent_id)
    }

    /// Restores the seed tree.
    pub fn reset(&mut self) {
        self.items = seed_items();
    }

    pub fn replace_all(&mut self, items: Vec<FileSystemItem>) {
        self.items = items;
    }
}

fn folder(
    id: &str,
    parent_id: &str,
    name: &str,
    icon: &str,
    at: Option<(i32, i32)>,
) -> FileSystemItem {
    FileSystemItem {
        id: ItemId::new(id),
        parent_id: ItemId::new(parent_id),
        name: name.to_string(),
        kind: ItemKind::Folder,
        icon: icon.to_string(),
        app_id: None,
        content: None,
        x: at.map(|(x, _)| x),
        y: at.map(|(_, y)| y),
    }
}

fn shortcut(
    id: &str,
    parent_id: &str,
    name: &str,
    app_id: &str,
    icon: &str,
    at: Option<(i32, i32)>,
) -> FileSystemItem {
    FileSystemItem {
        kind: ItemKind::App,
        app_id: Some(app_id.to_string()),
        ..folder(id, parent_id, name, icon, at)
    }
}

/// Initial tree used on first boot and by [`VirtualFileSystem::reset`].
pub fn seed_items() -> Vec<FileSystemItem> {
    vec![
        folder("desktop", "root", "Desktop", "💻", None),
        folder("my_computer", "desktop", "My Computer", "🖥️", Some((20, 20))),
        folder("recycle_bin", "desktop", "Recycle Bin", "🗑️", Some((20, 110))),
        shortcut("readme", "desktop", "ReadMe.txt", "notepad", "📝", Some((20, 200))),
        folder("c_drive", "my_computer", "Local Disk (C:)", "💾", None),
        folder("program_files", "c_drive", "Program Files", "📁", None),
        folder("windows", "c_drive", "Windows", "📁", None),
        folder("games", "c_drive", "Games", "🎮", None),
        shortcut("mine_shortcut", "games", "Minesweeper", "minesweeper", "💣", None),
        shortcut("sol_shortcut", "games", "Solitaire", "solitaire", "🃏", None),
    ]
}
