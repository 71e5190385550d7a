//! Aggregate board statistics.

use serde::{Deserialize, Serialize};

/// Counts over the whole task collection.
///
/// `overdue` counts tasks whose `due_date` is in the past and whose status is
/// not `completed`. All counts are zero on an empty board.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskStats {
    pub total: u64,
    pub todo: u64,
    pub in_progress: u64,
    pub completed: u64,
    pub overdue: u64,
}
