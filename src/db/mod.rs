//! Persistence module
//!
//! Preferences survive restarts in a small SQLite key/value store with
//! browser `localStorage` semantics.

pub mod sqlite;

pub use sqlite::LocalStorage;
