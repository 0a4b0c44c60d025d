//! The single write connection. All mutations go through here, serialized
//! behind a mutex; WAL mode keeps readers unblocked.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use causeway_core::errors::{CausewayError, CausewayResult, StorageError};

use super::pragmas::apply_pragmas;
use crate::to_storage_err;

/// Owns the one connection allowed to write.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open the write connection for the given database file.
    pub fn open(path: &Path) -> CausewayResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory write connection (for testing).
    pub fn open_in_memory() -> CausewayResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Execute a closure with the write connection.
    pub fn with_conn_sync<F, T>(&self, f: F) -> CausewayResult<T>
    where
        F: FnOnce(&Connection) -> CausewayResult<T>,
    {
        let guard = self.conn.lock().map_err(|e| {
            CausewayError::Storage(StorageError::PoolPoisoned {
                reason: e.to_string(),
            })
        })?;
        f(&guard)
    }
}
