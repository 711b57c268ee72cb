//! Reconciliation engine for markplan.
//!
//! Given the last-known-persisted bookmark tree and a proposed target tree,
//! [`calculate_diff`] computes the minimal safe edit script that converges
//! the live store on the proposal: no delete-and-recreate of surviving
//! nodes, and no ghost moves from sibling index renumbering.
//!
//! The computation is a pure, synchronous pipeline over already-materialized
//! trees: index both trees, detect raw per-id operations, filter move
//! candidates through the renumbering heuristic, schedule the survivors
//! into application order, and tally statistics. Inputs are never mutated
//! or retained, and no state is shared between calls, so concurrent
//! independent invocations need no locking.
//!
//! # Key Types
//!
//! - [`calculate_diff`] -- The engine entry point
//! - [`apply_diff`] -- Reference in-memory application of an edit script
//! - [`validate_tree`] -- Opt-in invariant pre-check for untrusted inputs
//! - [`IndexedNode`] / [`index_tree`] -- Flattened id-keyed tree view
//! - [`MoveCandidate`] / [`DetectedOps`] -- Intermediate detection output

pub mod apply;
pub mod detect;
pub mod error;
pub mod index;
pub mod reconcile;
pub mod schedule;
pub mod stats;
pub mod validate;

pub use apply::apply_diff;
pub use detect::{detect_operations, DetectedOps, MoveCandidate};
pub use error::{ValidateError, ValidateResult};
pub use index::{index_tree, IndexedNode};
pub use reconcile::reconcile_moves;
pub use schedule::schedule_operations;
pub use stats::tally_operations;
pub use validate::validate_tree;

use tracing::debug;

use markplan_types::{BookmarkNode, DiffResult};

/// Compute the edit script that turns `original` into `proposal`.
///
/// Both trees are read-only inputs for this one call. The returned
/// operations are ordered for application (deletes, then moves, then edits,
/// then creates, folders before bookmarks within each class) and the
/// statistics are derived from that final list.
///
/// Ids are assumed stable across both trees; an id present in only one of
/// them is planned as a delete or create accordingly. Malformed input is
/// tolerated best-effort (see [`index_tree`]); run [`validate_tree`] first
/// when the trees come from an untrusted producer.
pub fn calculate_diff(original: &BookmarkNode, proposal: &BookmarkNode) -> DiffResult {
    let original_map = index_tree(original);
    let proposal_map = index_tree(proposal);

    let detected = detect_operations(&original_map, &proposal_map);
    let candidates = detected.move_candidates.len();
    let moves = reconcile_moves(detected.move_candidates);

    let operations =
        schedule_operations(detected.deletes, moves, detected.edits, detected.creates);
    let statistics = tally_operations(&operations);

    debug!(
        original_nodes = original_map.len(),
        proposal_nodes = proposal_map.len(),
        move_candidates = candidates,
        total = statistics.total,
        deletes = statistics.delete,
        moves = statistics.moves,
        edits = statistics.edit,
        creates = statistics.create,
        "diff computed"
    );

    DiffResult {
        operations,
        statistics,
    }
}
