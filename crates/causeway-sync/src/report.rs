//! Per-type write counters for sync runs.

use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Counts of objects written to the graph mirror during a sync run.
///
/// Addition is associative, so reports from paginated passes or parallel
/// batch runs combine into one total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    pub event_nodes: usize,
    pub entity_nodes: usize,
    pub involves_edges: usize,
    pub causes_edges: usize,
}

impl Add for SyncReport {
    type Output = SyncReport;

    fn add(self, other: SyncReport) -> SyncReport {
        SyncReport {
            event_nodes: self.event_nodes + other.event_nodes,
            entity_nodes: self.entity_nodes + other.entity_nodes,
            involves_edges: self.involves_edges + other.involves_edges,
            causes_edges: self.causes_edges + other.causes_edges,
        }
    }
}

impl AddAssign for SyncReport {
    fn add_assign(&mut self, other: SyncReport) {
        *self = *self + other;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addition_is_associative() {
        let a = SyncReport {
            event_nodes: 1,
            entity_nodes: 2,
            involves_edges: 3,
            causes_edges: 4,
        };
        let b = SyncReport {
            event_nodes: 10,
            ..SyncReport::default()
        };
        let c = SyncReport {
            causes_edges: 7,
            ..SyncReport::default()
        };
        assert_eq!((a + b) + c, a + (b + c));
    }
}
