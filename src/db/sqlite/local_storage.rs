//! Key/value item access

use crate::error::Result;
use rusqlite::{Connection, OptionalExtension};

/// Read an item
pub fn get_item(conn: &Connection, key: &str) -> Result<Option<String>> {
    let value = conn
        .query_row(
            "SELECT value FROM local_storage WHERE key = ?1",
            [key],
            |row| row.get(0),
        )
        .optional()?;

    Ok(value)
}

/// Insert or overwrite an item
pub fn set_item(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO local_storage (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET
           value = excluded.value,
           updated_at = datetime('now')",
        rusqlite::params![key, value],
    )?;

    Ok(())
}

/// Remove an item, returning whether it existed
pub fn remove_item(conn: &Connection, key: &str) -> Result<bool> {
    let rows = conn.execute("DELETE FROM local_storage WHERE key = ?1", [key])?;
    Ok(rows > 0)
}
