//! Persistence contracts and adapters.

pub mod prefs;
