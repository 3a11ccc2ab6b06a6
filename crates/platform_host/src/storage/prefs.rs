//! Key/value preference storage contracts and adapters.
//!
//! Values are stored as raw JSON text per key. The desktop runtime keeps its durable virtual
//! file system under a single key, so every adapter here only needs whole-value reads and
//! writes.

use std::{
    cell::RefCell,
    collections::{BTreeMap, HashMap},
    fs,
    future::Future,
    path::{Path, PathBuf},
    pin::Pin,
    rc::Rc,
};

/// File name used by [`FilePrefsStore`] inside its root directory.
pub const PREFS_FILE_NAME: &str = "prefs.json";

/// Object-safe boxed future used by [`PrefsStore`] async methods.
pub type PrefsStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for preference values (JSON stored as text per key).
pub trait PrefsStore {
    /// Loads a raw JSON string for a preference key.
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>>;

    /// Saves a raw JSON string for a preference key.
    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>>;

    /// Deletes a preference key.
    fn delete_pref<'a>(&'a self, key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op preference store for hosts without durable storage.
pub struct NoopPrefsStore;

impl PrefsStore for NoopPrefsStore {
    fn load_pref<'a>(
        &'a self,
        _key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async { Ok(None) })
    }

    fn save_pref<'a>(
        &'a self,
        _key: &'a str,
        _raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn delete_pref<'a>(&'a self, _key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory preference store keyed by string.
///
/// Clones share the same backing map.
pub struct MemoryPrefsStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryPrefsStore {
    /// Returns the raw value currently stored for `key`, bypassing the async contract.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key).cloned()
    }
}

impl PrefsStore for MemoryPrefsStore {
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async move { Ok(self.inner.borrow().get(key).cloned()) })
    }

    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner
                .borrow_mut()
                .insert(key.to_string(), raw_json.to_string());
            Ok(())
        })
    }

    fn delete_pref<'a>(&'a self, key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner.borrow_mut().remove(key);
            Ok(())
        })
    }
}

type PrefMap = BTreeMap<String, String>;

fn load_pref_map(path: &Path) -> Result<PrefMap, String> {
    if !path.exists() {
        return Ok(PrefMap::new());
    }
    let raw = fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
    if raw.trim().is_empty() {
        return Ok(PrefMap::new());
    }
    serde_json::from_str(&raw)
        .map_err(|err| format!("failed to parse prefs map {}: {err}", path.display()))
}

fn save_pref_map(path: &Path, map: &PrefMap) -> Result<(), String> {
    let serialized = serde_json::to_string_pretty(map)
        .map_err(|err| format!("failed to serialize prefs map: {err}"))?;
    fs::write(path, serialized).map_err(|err| format!("failed to write {}: {err}", path.display()))
}

fn validate_key(key: &str) -> Result<(), String> {
    if key.is_empty() {
        Err("preference key must not be empty".to_string())
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone)]
/// Preference store backed by a single JSON map file inside a root directory.
pub struct FilePrefsStore {
    file: PathBuf,
}

impl FilePrefsStore {
    /// Creates a file-backed store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error when the root directory cannot be created.
    pub fn from_root(root: impl AsRef<Path>) -> Result<Self, String> {
        let root = root.as_ref();
        fs::create_dir_all(root)
            .map_err(|err| format!("failed to create prefs dir {}: {err}", root.display()))?;
        Ok(Self {
            file: root.join(PREFS_FILE_NAME),
        })
    }

    /// Path of the backing JSON map file.
    pub fn file(&self) -> &Path {
        &self.file
    }

    fn load(&self, key: &str) -> Result<Option<String>, String> {
        validate_key(key)?;
        let map = load_pref_map(&self.file)?;
        Ok(map.get(key).cloned())
    }

    fn save(&self, key: &str, raw_json: &str) -> Result<(), String> {
        validate_key(key)?;
        let mut map = load_pref_map(&self.file)?;
        map.insert(key.to_string(), raw_json.to_string());
        save_pref_map(&self.file, &map)
    }

    fn delete(&self, key: &str) -> Result<(), String> {
        validate_key(key)?;
        let mut map = load_pref_map(&self.file)?;
        map.remove(key);
        save_pref_map(&self.file, &map)
    }
}

impl PrefsStore for FilePrefsStore {
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async move { self.load(key) })
    }

    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async move { self.save(key, raw_json) })
    }

    fn delete_pref<'a>(&'a self, key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async move { self.delete(key) })
    }
}
