use serde::{Deserialize, Serialize};

use crate::constants;

/// Dual-store synchronizer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Rows per relational page during a full resync.
    pub batch_size: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            batch_size: constants::RESYNC_BATCH_SIZE,
        }
    }
}
