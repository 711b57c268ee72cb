//! Operation scheduling: impose the total application order.
//!
//! Deletes run before moves so identifiers are freed and transient
//! duplicates cannot arise; moves run before edits and creates so that
//! destination folders exist before content is placed; within a kind,
//! folders come before bookmarks because a bookmark's destination folder
//! must already exist. Beyond those two keys the sort is stable, so the
//! deterministic detection order is preserved.

use markplan_types::Operation;

/// Merge the four operation classes into one application-ordered script.
pub fn schedule_operations(
    deletes: Vec<Operation>,
    moves: Vec<Operation>,
    edits: Vec<Operation>,
    creates: Vec<Operation>,
) -> Vec<Operation> {
    let mut operations = deletes;
    operations.extend(moves);
    operations.extend(edits);
    operations.extend(creates);

    // Stable: equal keys keep their relative input order.
    operations.sort_by_key(|op| (op.kind().rank(), !op.is_folder()));
    operations
}
