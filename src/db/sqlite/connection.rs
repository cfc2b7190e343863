//! SQLite connection utilities

use rusqlite::Connection;
use std::path::Path;

/// Create a new SQLite connection
pub fn create_connection(path: &Path) -> rusqlite::Result<Connection> {
    let conn = Connection::open(path)?;

    // Enable WAL mode for better concurrent access
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

    Ok(conn)
}

/// Create an in-memory connection (tests, `--data-dir` unavailable)
pub fn create_memory_connection() -> rusqlite::Result<Connection> {
    Connection::open_in_memory()
}
