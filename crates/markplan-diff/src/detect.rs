//! Operation detection: compare two indexed trees and emit raw operations.
//!
//! Deletes, creates, and edits emitted here are final. Moves are emitted as
//! *candidates*: same-parent candidates still have to survive the
//! renumbering filter in [`reconcile`](crate::reconcile) before they become
//! operations.

use std::collections::BTreeMap;

use markplan_types::{NodeId, Operation};

use crate::index::IndexedNode;

/// A provisional move, before renumbering-artifact filtering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveCandidate {
    pub node_id: NodeId,
    pub title: String,
    pub is_folder: bool,
    pub from_parent_id: Option<NodeId>,
    pub to_parent_id: Option<NodeId>,
    pub from_index: u32,
    pub to_index: u32,
    /// `false` means the candidate crossed folders and is unconditionally
    /// genuine; `true` means it is subject to filtering.
    pub is_same_parent: bool,
}

impl MoveCandidate {
    /// Signed index displacement within the destination folder.
    pub fn delta(&self) -> i64 {
        i64::from(self.to_index) - i64::from(self.from_index)
    }

    /// Finalize the candidate into a `Move` operation.
    pub fn into_operation(self) -> Operation {
        Operation::Move {
            node_id: self.node_id,
            title: self.title,
            is_folder: self.is_folder,
            from_parent_id: self.from_parent_id,
            to_parent_id: self.to_parent_id,
            from_index: self.from_index,
            to_index: self.to_index,
            is_same_parent: self.is_same_parent,
        }
    }
}

/// Raw detection output, grouped by class.
#[derive(Clone, Debug, Default)]
pub struct DetectedOps {
    pub deletes: Vec<Operation>,
    pub creates: Vec<Operation>,
    pub edits: Vec<Operation>,
    pub move_candidates: Vec<MoveCandidate>,
}

/// Compare the two id-keyed maps and classify every id.
///
/// - Ids only in `original` become deletes, described by their last-known
///   state.
/// - Ids only in `proposal` become creates, described entirely by the
///   proposal node (index defaults to 0 if the position is unknown).
/// - Ids in both may yield an edit (title/url changed), a move candidate
///   (position changed), or both independently.
pub fn detect_operations(
    original: &BTreeMap<NodeId, IndexedNode<'_>>,
    proposal: &BTreeMap<NodeId, IndexedNode<'_>>,
) -> DetectedOps {
    let mut detected = DetectedOps::default();

    for (id, old) in original {
        if !proposal.contains_key(id) {
            detected.deletes.push(Operation::Delete {
                node_id: id.clone(),
                title: old.title().to_string(),
                is_folder: old.is_folder(),
                parent_id: old.parent_id.clone(),
            });
        }
    }

    for (id, new) in proposal {
        let Some(old) = original.get(id) else {
            detected.creates.push(Operation::Create {
                node_id: id.clone(),
                title: new.title().to_string(),
                is_folder: new.is_folder(),
                url: new.url().map(str::to_string),
                parent_id: new.parent_id.clone(),
                index: new.index.unwrap_or(0),
            });
            continue;
        };

        if old.title() != new.title() || old.url() != new.url() {
            detected.edits.push(Operation::Edit {
                node_id: id.clone(),
                title: new.title().to_string(),
                is_folder: new.is_folder(),
                old_title: old.title().to_string(),
                new_title: new.title().to_string(),
                old_url: old.url().map(str::to_string),
                new_url: new.url().map(str::to_string),
            });
        }

        // Position change is judged independently of content change.
        if old.parent_id != new.parent_id {
            detected.move_candidates.push(MoveCandidate {
                node_id: id.clone(),
                title: new.title().to_string(),
                is_folder: new.is_folder(),
                from_parent_id: old.parent_id.clone(),
                to_parent_id: new.parent_id.clone(),
                from_index: old.index.unwrap_or(0),
                to_index: new.index.unwrap_or(0),
                is_same_parent: false,
            });
        } else if old.index != new.index {
            detected.move_candidates.push(MoveCandidate {
                node_id: id.clone(),
                title: new.title().to_string(),
                is_folder: new.is_folder(),
                from_parent_id: old.parent_id.clone(),
                to_parent_id: new.parent_id.clone(),
                from_index: old.index.unwrap_or(0),
                to_index: new.index.unwrap_or(0),
                is_same_parent: true,
            });
        }
    }

    detected
}
