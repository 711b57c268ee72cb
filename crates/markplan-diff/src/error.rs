//! Error types for the diff crate.
//!
//! The diff itself is infallible on well-formed input; these errors are
//! produced only by the opt-in [`validate_tree`](crate::validate_tree)
//! pre-check for callers with untrusted input provenance.

use markplan_types::NodeId;

/// Invariant violations detectable in a single input tree.
#[derive(Debug, thiserror::Error)]
pub enum ValidateError {
    /// Two nodes in one snapshot share an id.
    #[error("duplicate node id in tree: {0}")]
    DuplicateId(NodeId),

    /// A node carries both a url and a children list.
    #[error("node {0} is a bookmark (has url) but carries children")]
    BookmarkWithChildren(NodeId),

    /// A node's recorded parent back-reference disagrees with the folder
    /// that actually contains it.
    #[error("node {node} records parent {recorded} but lives under {actual}")]
    ParentMismatch {
        node: NodeId,
        recorded: NodeId,
        actual: NodeId,
    },
}

/// Convenience alias for validation results.
pub type ValidateResult<T> = Result<T, ValidateError>;
