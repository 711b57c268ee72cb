//! The edit script vocabulary: operations, their ordering, and statistics.

use serde::{Deserialize, Serialize};

use crate::node::NodeId;

/// One atomic intended mutation in the edit script.
///
/// Operations are planning artifacts: the engine emits them, the downstream
/// operation applier maps each one onto a single native store call. Parent
/// ids are `None` only for a tree root, which in practice is never the
/// subject of an operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    /// Bring a new node into existence under `parent_id` at `index`.
    Create {
        node_id: NodeId,
        title: String,
        is_folder: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
        parent_id: Option<NodeId>,
        index: u32,
    },
    /// Relocate an existing node, across folders or within one.
    Move {
        node_id: NodeId,
        title: String,
        is_folder: bool,
        from_parent_id: Option<NodeId>,
        to_parent_id: Option<NodeId>,
        from_index: u32,
        to_index: u32,
        /// `true` when the move is a reorder within a single folder.
        is_same_parent: bool,
    },
    /// Rewrite a node's title and/or url in place.
    Edit {
        node_id: NodeId,
        title: String,
        is_folder: bool,
        old_title: String,
        new_title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        old_url: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        new_url: Option<String>,
    },
    /// Remove a node (and, for folders, its subtree) from the store.
    Delete {
        node_id: NodeId,
        title: String,
        is_folder: bool,
        parent_id: Option<NodeId>,
    },
}

impl Operation {
    /// The operation's kind, used as the primary scheduling key.
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Create { .. } => OperationKind::Create,
            Operation::Move { .. } => OperationKind::Move,
            Operation::Edit { .. } => OperationKind::Edit,
            Operation::Delete { .. } => OperationKind::Delete,
        }
    }

    /// The id of the node this operation targets.
    pub fn node_id(&self) -> &NodeId {
        match self {
            Operation::Create { node_id, .. }
            | Operation::Move { node_id, .. }
            | Operation::Edit { node_id, .. }
            | Operation::Delete { node_id, .. } => node_id,
        }
    }

    /// Whether the targeted node is a folder.
    pub fn is_folder(&self) -> bool {
        match self {
            Operation::Create { is_folder, .. }
            | Operation::Move { is_folder, .. }
            | Operation::Edit { is_folder, .. }
            | Operation::Delete { is_folder, .. } => *is_folder,
        }
    }
}

/// Classification of operations by application order.
///
/// Deletes run first to free identifiers and avoid transient duplicates,
/// moves next so destination folders exist before content lands in them,
/// then edits, then creates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Delete,
    Move,
    Edit,
    Create,
}

impl OperationKind {
    /// Fixed application rank: delete(1) < move(2) < edit(3) < create(4).
    pub fn rank(self) -> u8 {
        match self {
            OperationKind::Delete => 1,
            OperationKind::Move => 2,
            OperationKind::Edit => 3,
            OperationKind::Create => 4,
        }
    }
}

/// Per-kind tallies over a finished edit script.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStatistics {
    /// Total number of operations.
    pub total: usize,
    /// Number of `Create` operations.
    pub create: usize,
    /// Number of `Move` operations.
    #[serde(rename = "move")]
    pub moves: usize,
    /// Number of `Edit` operations.
    pub edit: usize,
    /// Number of `Delete` operations.
    pub delete: usize,
    /// Creates targeting folders.
    pub new_folders: usize,
    /// Creates targeting bookmarks.
    pub new_bookmarks: usize,
}

/// The engine's output: an ordered edit script plus its statistics.
///
/// Created fresh per call and owned by the caller; nothing is cached or
/// shared between invocations.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    /// Operations in application order (see [`OperationKind`]).
    pub operations: Vec<Operation>,
    /// Per-kind tallies derived from `operations`.
    pub statistics: DiffStatistics,
}

impl DiffResult {
    /// Returns `true` if the trees were already identical.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }
}
