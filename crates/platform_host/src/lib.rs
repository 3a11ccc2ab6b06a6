//! Typed host-domain contracts shared by the desktop runtime and its shell hosts.
//!
//! This crate is the storage boundary for the desktop runtime. It exposes the preference store
//! contract used for durable desktop state, in-memory and file-backed adapters, and the time
//! helpers used by shell timers. Concrete composition happens in the host binary.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod storage;
pub mod time;

pub use storage::prefs::{
    FilePrefsStore, MemoryPrefsStore, NoopPrefsStore, PrefsStore, PrefsStoreFuture,
    PREFS_FILE_NAME,
};
pub use time::unix_time_ms_now;
