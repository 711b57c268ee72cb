//! Foundation types for the markplan reconciliation engine.
//!
//! This crate defines the vocabulary shared between the diff engine and its
//! collaborators: the tree model handed in by tree acquisition, and the edit
//! script handed out to the operation applier.
//!
//! # Key Types
//!
//! - [`NodeId`] -- Opaque stable identifier for a bookmark node
//! - [`BookmarkNode`] -- A tree entity, either a folder or a bookmark
//! - [`Operation`] -- One atomic intended mutation in the edit script
//! - [`OperationKind`] -- Application-order classification of operations
//! - [`DiffResult`] / [`DiffStatistics`] -- The engine's output

pub mod node;
pub mod op;

pub use node::{BookmarkNode, NodeId};
pub use op::{DiffResult, DiffStatistics, Operation, OperationKind};
