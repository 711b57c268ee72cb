//! Opt-in input validation.
//!
//! The engine tolerates malformed trees (duplicate ids resolve to
//! last-indexed-wins, stale back-references are ignored), so validation is
//! never required. Callers that receive trees from untrusted producers can
//! run [`validate_tree`] first to get a hard failure instead of best-effort
//! behavior.

use std::collections::BTreeSet;

use markplan_types::{BookmarkNode, NodeId};

use crate::error::{ValidateError, ValidateResult};

/// Check one tree against the input invariants, returning the first
/// violation found in depth-first pre-order.
///
/// Checked invariants:
/// - ids are unique within the snapshot;
/// - no node carries both a url and a children list;
/// - a recorded `parent_id` back-reference, when present, names the folder
///   that actually contains the node (an absent back-reference is fine, the
///   engine derives positions from structure).
pub fn validate_tree(root: &BookmarkNode) -> ValidateResult<()> {
    let mut seen: BTreeSet<NodeId> = BTreeSet::new();
    let mut stack: Vec<(&BookmarkNode, Option<&NodeId>)> = vec![(root, None)];

    while let Some((node, container)) = stack.pop() {
        if !seen.insert(node.id.clone()) {
            return Err(ValidateError::DuplicateId(node.id.clone()));
        }
        if node.url.is_some() && node.children.is_some() {
            return Err(ValidateError::BookmarkWithChildren(node.id.clone()));
        }
        if let (Some(recorded), Some(actual)) = (node.parent_id.as_ref(), container) {
            if recorded != actual {
                return Err(ValidateError::ParentMismatch {
                    node: node.id.clone(),
                    recorded: recorded.clone(),
                    actual: actual.clone(),
                });
            }
        }
        for child in node.children().iter().rev() {
            stack.push((child, Some(&node.id)));
        }
    }

    Ok(())
}
