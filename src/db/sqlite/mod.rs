//! SQLite-backed local storage

mod connection;
mod local_storage;
mod migrations;

use crate::error::Result;
use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::Path;

/// Persistent string key/value store
pub struct LocalStorage {
    conn: Mutex<Connection>,
}

impl LocalStorage {
    /// Open (or create) the store at `path`
    pub fn open(path: &Path) -> Result<Self> {
        let conn = connection::create_connection(path)?;
        Self::with_connection(conn)
    }

    /// Volatile store; nothing survives the process
    pub fn in_memory() -> Result<Self> {
        let conn = connection::create_memory_connection()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        let storage = Self {
            conn: Mutex::new(conn),
        };

        // Run migrations
        storage.run_migrations()?;

        Ok(storage)
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn.lock();
        migrations::run_migrations(&conn)
    }

    /// Read an item
    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock();
        local_storage::get_item(&conn, key)
    }

    /// Insert or overwrite an item
    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock();
        local_storage::set_item(&conn, key, value)
    }

    /// Remove an item
    pub fn remove_item(&self, key: &str) -> Result<bool> {
        let conn = self.conn.lock();
        local_storage::remove_item(&conn, key)
    }
}
