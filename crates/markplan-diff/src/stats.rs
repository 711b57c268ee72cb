//! Statistics aggregation over a finished edit script.

use markplan_types::{DiffStatistics, Operation};

/// Tally per-kind counts in one pass over the ordered operations.
pub fn tally_operations(operations: &[Operation]) -> DiffStatistics {
    let mut stats = DiffStatistics::default();
    for op in operations {
        stats.total += 1;
        match op {
            Operation::Create { is_folder, .. } => {
                stats.create += 1;
                if *is_folder {
                    stats.new_folders += 1;
                } else {
                    stats.new_bookmarks += 1;
                }
            }
            Operation::Move { .. } => stats.moves += 1,
            Operation::Edit { .. } => stats.edit += 1,
            Operation::Delete { .. } => stats.delete += 1,
        }
    }
    stats
}
