//! File-system persistence through the host [`PrefsStore`].

use platform_host::PrefsStore;
use thiserror::Error;
use tracing::debug;

use crate::{model::FileSystemItem, vfs::VirtualFileSystem};

/// Fixed key the item list is stored under.
pub const FILE_SYSTEM_KEY: &str = "retro-os-filesystem";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("preference store failed: {0}")]
    Store(String),
    #[error("failed to encode file system: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("stored file system is malformed: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Loads the persisted item list, or `None` when nothing has been stored yet.
///
/// # Errors
///
/// Returns [`PersistenceError::Store`] when the store fails and [`PersistenceError::Decode`]
/// when the stored payload is not a valid item list.
pub async fn load_file_system<S: PrefsStore + ?Sized>(
    store: &S,
) -> Result<Option<Vec<FileSystemItem>>, PersistenceError> {
    let Some(raw) = store
        .load_pref(FILE_SYSTEM_KEY)
        .await
        .map_err(PersistenceError::Store)?
    else {
        return Ok(None);
    };
    let items: Vec<FileSystemItem> =
        serde_json::from_str(&raw).map_err(PersistenceError::Decode)?;
    debug!(count = items.len(), "loaded persisted file system");
    Ok(Some(items))
}

/// Writes the full item list, replacing any previous value.
///
/// # Errors
///
/// Returns [`PersistenceError::Encode`] or [`PersistenceError::Store`] on failure.
pub async fn persist_file_system<S: PrefsStore + ?Sized>(
    store: &S,
    fs: &VirtualFileSystem,
) -> Result<(), PersistenceError> {
    let raw = serde_json::to_string(fs.items()).map_err(PersistenceError::Encode)?;
    store
        .save_pref(FILE_SYSTEM_KEY, &raw)
        .await
        .map_err(PersistenceError::Store)
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use platform_host::{MemoryPrefsStore, NoopPrefsStore};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{ItemId, ItemKind};

    #[test]
    fn empty_store_loads_none() {
        let store = MemoryPrefsStore::default();
        assert!(block_on(load_file_system(&store)).unwrap().is_none());
        assert!(block_on(load_file_system(&NoopPrefsStore)).unwrap().is_none());
    }

    #[test]
    fn persisted_items_load_back_unchanged() {
        let store = MemoryPrefsStore::default();
        let mut fs = VirtualFileSystem::default();
        let created = fs.create(&ItemId::desktop(), ItemKind::Folder, "New Folder");

        block_on(persist_file_system(&store, &fs)).expect("persist");
        let loaded = block_on(load_file_system(&store))
            .expect("load")
            .expect("stored items");

        assert_eq!(loaded, fs.items());
        assert!(loaded.iter().any(|item| item.id == created));
    }

    #[test]
    fn stored_payload_uses_camel_case_array() {
        let store = MemoryPrefsStore::default();
        block_on(persist_file_system(&store, &VirtualFileSystem::default())).expect("persist");

        let raw = store.raw(FILE_SYSTEM_KEY).expect("raw payload");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(value[0]["id"], "desktop");
        assert_eq!(value[0]["parentId"], "root");
        assert_eq!(value[0]["type"], "folder");
    }

    #[test]
    fn malformed_payload_is_a_decode_error() {
        let store = MemoryPrefsStore::default();
        block_on(store.save_pref(FILE_SYSTEM_KEY, "{\"not\":\"a list\"}")).expect("seed");

        let err = block_on(load_file_system(&store)).expect_err("decode error");
        assert!(matches!(err, PersistenceError::Decode(_)));
    }
}
