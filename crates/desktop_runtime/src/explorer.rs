//! Per-window folder navigation for Explorer windows.

use crate::{
    model::{ItemId, MY_COMPUTER_FOLDER_ID},
    vfs::VirtualFileSystem,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerView {
    history: Vec<ItemId>,
    cursor: usize,
}

impl Default for ExplorerView {
    fn default() -> Self {
        Self::rooted_at(ItemId::new(MY_COMPUTER_FOLDER_ID))
    }
}

impl ExplorerView {
    pub fn rooted_at(folder_id: ItemId) -> Self {
        Self {
            history: vec![folder_id],
            cursor: 0,
        }
    }

    pub fn current_folder(&self) -> &ItemId {
        &self.history[self.cursor]
    }

    /// Pushes `folder_id`, discarding anything forward of the cursor.
    pub fn navigate(&mut self, folder_id: ItemId) {
        if self.current_folder() == &folder_id {
            return;
        }
        self.history.truncate(self.cursor + 1);
        self.history.push(folder_id);
        self.cursor = self.history.len() - 1;
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.cursor -= 1;
        true
    }

    fn parent_of_current<'a>(&self, vfs: &'a VirtualFileSystem) -> Option<&'a ItemId> {
        if self.current_folder().as_str() == MY_COMPUTER_FOLDER_ID {
            return None;
        }
        vfs.item(self.current_folder())
            .map(|item| &item.parent_id)
            .filter(|parent_id| !parent_id.is_root())
    }

    pub fn can_go_up(&self, vfs: &VirtualFileSystem) -> bool {
        self.parent_of_current(vfs).is_some()
    }

    /// Navigates to the parent folder. "My Computer" is the top of the hierarchy, as is any
    /// folder sitting directly under the root.
    pub fn up(&mut self, vfs: &VirtualFileSystem) -> bool {
        let Some(parent_id) = self.parent_of_current(vfs).cloned() else {
            return false;
        };
        self.navigate(parent_id);
        true
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn navigate_then_back_returns_to_previous_folder() {
        let mut view = ExplorerView::default();
        view.navigate("c_drive".into());
        view.navigate("games".into());

        assert!(view.back());
        assert_eq!(view.current_folder(), &ItemId::from("c_drive"));
        assert!(view.back());
        assert!(!view.back());
        assert_eq!(view.current_folder(), &ItemId::from("my_computer"));
    }

    #[test]
    fn navigate_after_back_truncates_forward_history() {
        let mut view = ExplorerView::default();
        view.navigate("c_drive".into());
        view.navigate("games".into());
        view.back();
        view.navigate("windows".into());

        assert!(view.back());
        assert_eq!(view.current_folder(), &ItemId::from("c_drive"));
        view.navigate("games".into());
        assert!(view.back());
        assert!(view.back());
        assert!(!view.can_go_back());
    }

    #[test]
    fn up_stops_at_my_computer() {
        let vfs = VirtualFileSystem::default();
        let mut view = ExplorerView::rooted_at("games".into());

        assert!(view.up(&vfs));
        assert_eq!(view.current_folder(), &ItemId::from("c_drive"));
        assert!(view.up(&vfs));
        assert_eq!(view.current_folder(), &ItemId::from("my_computer"));
        assert!(!view.can_go_up(&vfs));
        assert!(!view.up(&vfs));
    }

    #[test]
    fn up_stops_below_root() {
        let vfs = VirtualFileSystem::default();
        let mut view = ExplorerView::rooted_at("recycle_bin".into());

        assert!(view.up(&vfs));
        assert_eq!(view.current_folder(), &ItemId::desktop());
        assert!(!view.can_go_up(&vfs));
    }

    #[test]
    fn up_from_deleted_folder_is_noop() {
        let mut vfs = VirtualFileSystem::default();
        vfs.delete_items(&["games".into()]);
        let mut view = ExplorerView::rooted_at("games".into());
        assert!(!view.up(&vfs));
    }
}
