//! The bookmark tree model.
//!
//! A tree is a single [`BookmarkNode`] root with recursively nested
//! `children`. A node with no `url` is a folder; a node with a `url` is a
//! bookmark (leaf). The tree owns its nodes through `children`; `parent_id`
//! and `index` are back-references describing where a node sits, not
//! ownership relations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque stable identifier for a bookmark node.
///
/// Ids are assigned by the host bookmark store and are stable across tree
/// snapshots: the same id in the original and proposed trees refers to the
/// same underlying node. The engine never interprets the contents, it only
/// compares ids for equality and orders them for deterministic iteration.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a node id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A tree entity, either a folder (container) or a bookmark (leaf).
///
/// The `url` field is what distinguishes the two: folders have none.
/// `children` is present (possibly empty) for folders; a folder whose
/// `children` is `None` is tolerated and treated as having zero children.
///
/// `parent_id` and `index` describe the node's position as recorded by the
/// host store. They may be stale or absent; the diff engine derives the
/// effective position from the tree structure itself during indexing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkNode {
    /// Stable identifier, unique within one tree snapshot.
    pub id: NodeId,
    /// Display text.
    pub title: String,
    /// Target URL; present only for bookmarks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Back-reference to the containing folder's id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<NodeId>,
    /// Zero-based position among siblings sharing the same parent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    /// Ordered child nodes, owned by this node. Present only for folders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<BookmarkNode>>,
}

impl BookmarkNode {
    /// Create a folder with the given children.
    pub fn folder(id: impl Into<NodeId>, title: impl Into<String>, children: Vec<BookmarkNode>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: None,
            parent_id: None,
            index: None,
            children: Some(children),
        }
    }

    /// Create a bookmark (leaf) pointing at `url`.
    pub fn bookmark(id: impl Into<NodeId>, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: Some(url.into()),
            parent_id: None,
            index: None,
            children: None,
        }
    }

    /// Returns `true` if this node is a folder (no `url`).
    pub fn is_folder(&self) -> bool {
        self.url.is_none()
    }

    /// The node's children, treating an absent list as empty.
    pub fn children(&self) -> &[BookmarkNode] {
        self.children.as_deref().unwrap_or(&[])
    }
}

/// The derived drop would recurse through `children`, so a deep enough
/// chain would exhaust the call stack. Descendants are drained into a
/// worklist instead; every node popped here has already had its own
/// children taken, so its drop is shallow.
impl Drop for BookmarkNode {
    fn drop(&mut self) {
        let mut pending = self.children.take().unwrap_or_default();
        while let Some(mut node) = pending.pop() {
            if let Some(children) = node.children.take() {
                pending.extend(children);
            }
        }
    }
}
