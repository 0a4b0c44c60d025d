//! PRAGMA configuration applied to every SQLite connection.
//!
//! WAL mode, NORMAL sync, 5s busy_timeout, foreign_keys ON.

use rusqlite::Connection;

use causeway_core::errors::CausewayResult;

use crate::to_storage_err;

/// Apply all performance and safety pragmas to a write connection.
pub fn apply_pragmas(conn: &Connection) -> CausewayResult<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        PRAGMA foreign_keys = ON;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Pragmas for read connections: same timeouts, foreign keys for
/// consistency of any PRAGMA-level checks.
pub fn apply_read_pragmas(conn: &Connection) -> CausewayResult<()> {
    conn.execute_batch(
        "
        PRAGMA busy_timeout = 5000;
        PRAGMA foreign_keys = ON;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
