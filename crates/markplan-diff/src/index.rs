//! Tree indexing: flatten a bookmark tree into an id-keyed map.
//!
//! The map is the input shape for operation detection. It is keyed by a
//! `BTreeMap` so every downstream pass iterates in a fixed id order,
//! which keeps the whole diff deterministic for a given input pair.

use std::collections::BTreeMap;

use tracing::warn;

use markplan_types::{BookmarkNode, NodeId};

/// A node as seen by the indexer: a borrow plus its effective position.
///
/// `parent_id` and `index` are derived from the traversal (the containing
/// folder and the child slot), not read from the node's own back-reference
/// fields, which may be stale or absent. The tree structure is authoritative
/// because ownership flows through `children`. Both are `None` only for the
/// root.
#[derive(Clone, Debug)]
pub struct IndexedNode<'a> {
    /// The underlying node.
    pub node: &'a BookmarkNode,
    /// Id of the containing folder; `None` for the root.
    pub parent_id: Option<NodeId>,
    /// Zero-based slot within the containing folder; `None` for the root.
    pub index: Option<u32>,
}

impl<'a> IndexedNode<'a> {
    /// The node's id.
    pub fn id(&self) -> &NodeId {
        &self.node.id
    }

    /// The node's display title.
    pub fn title(&self) -> &str {
        &self.node.title
    }

    /// The node's url, if it is a bookmark.
    pub fn url(&self) -> Option<&str> {
        self.node.url.as_deref()
    }

    /// Whether the node is a folder.
    pub fn is_folder(&self) -> bool {
        self.node.is_folder()
    }
}

/// Flatten `root` into an id-keyed map by depth-first pre-order traversal.
///
/// The root itself is included. Traversal uses an explicit stack, so tree
/// depth is bounded only by heap, never by the call stack.
///
/// Duplicate ids violate the input invariant; the later-visited node wins
/// and a warning is logged. Callers who need a hard failure instead should
/// run [`validate_tree`](crate::validate_tree) first.
pub fn index_tree(root: &BookmarkNode) -> BTreeMap<NodeId, IndexedNode<'_>> {
    let mut map = BTreeMap::new();
    let mut stack: Vec<(&BookmarkNode, Option<NodeId>, Option<u32>)> = vec![(root, None, None)];

    while let Some((node, parent_id, index)) = stack.pop() {
        // Children pushed in reverse so they pop in document order.
        for (i, child) in node.children().iter().enumerate().rev() {
            stack.push((child, Some(node.id.clone()), Some(i as u32)));
        }

        let entry = IndexedNode {
            node,
            parent_id,
            index,
        };
        if let Some(previous) = map.insert(node.id.clone(), entry) {
            warn!(id = %previous.id(), "duplicate node id while indexing; keeping later occurrence");
        }
    }

    map
}
