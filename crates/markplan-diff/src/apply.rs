//! Reference application of an edit script to an in-memory tree.
//!
//! This is not the native-store applier (that collaborator owns retries,
//! partial-failure policy, and real mutation calls). It exists to make the
//! round-trip law concrete: applying [`calculate_diff`]'s output to the
//! original tree yields a tree equivalent to the proposal. Hosts can also
//! use it to preview the post-apply tree without touching the store.
//!
//! Internally the tree is held as an arena keyed by id, so nodes are
//! addressed rather than owned through pointers and no phase recurses.
//!
//! [`calculate_diff`]: crate::calculate_diff

use std::collections::{BTreeMap, BTreeSet};

use markplan_types::{BookmarkNode, NodeId, Operation};

/// Apply `operations` to a copy of `original` and return the result.
///
/// Deletes, edits, and record creation happen in script order. Placement is
/// different: every `to_index`/`index` in the script refers to the *final*
/// arrangement of a folder, not to whatever intermediate state an earlier
/// insertion left behind, so all moved nodes are detached first and then
/// moves and creates are inserted together in ascending destination order.
/// Inserting at absolute final indices in ascending order only ever shifts
/// positions later than the insertion point, which is what makes the
/// script's indices line up. Indices are clamped to the current child
/// count, and operations referencing unknown ids or parents are skipped.
pub fn apply_diff(original: &BookmarkNode, operations: &[Operation]) -> BookmarkNode {
    let mut arena = Arena::from_tree(original);
    let mut placements: Vec<(NodeId, Option<NodeId>, u32)> = Vec::new();

    for op in operations {
        match op {
            Operation::Delete { node_id, .. } => {
                arena.detach(node_id);
            }
            Operation::Move {
                node_id,
                to_parent_id,
                to_index,
                ..
            } => {
                arena.detach(node_id);
                placements.push((node_id.clone(), to_parent_id.clone(), *to_index));
            }
            Operation::Edit {
                node_id,
                new_title,
                new_url,
                ..
            } => {
                if let Some(rec) = arena.nodes.get_mut(node_id) {
                    rec.title = new_title.clone();
                    rec.url = new_url.clone();
                }
            }
            Operation::Create {
                node_id,
                title,
                is_folder,
                url,
                parent_id,
                index,
            } => {
                arena.nodes.insert(
                    node_id.clone(),
                    NodeRec {
                        title: title.clone(),
                        url: url.clone(),
                        is_folder: *is_folder,
                        children: Vec::new(),
                    },
                );
                placements.push((node_id.clone(), parent_id.clone(), *index));
            }
        }
    }

    placements.sort_by(|a, b| (&a.1, a.2).cmp(&(&b.1, b.2)));
    for (node_id, parent_id, index) in &placements {
        arena.attach(node_id, parent_id.as_ref(), *index);
    }

    arena.into_tree()
}

struct NodeRec {
    title: String,
    url: Option<String>,
    is_folder: bool,
    children: Vec<NodeId>,
}

struct Arena {
    nodes: BTreeMap<NodeId, NodeRec>,
    root: NodeId,
}

impl Arena {
    fn from_tree(root: &BookmarkNode) -> Self {
        let mut nodes = BTreeMap::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            nodes.insert(
                node.id.clone(),
                NodeRec {
                    title: node.title.clone(),
                    url: node.url.clone(),
                    is_folder: node.is_folder(),
                    children: node.children().iter().map(|c| c.id.clone()).collect(),
                },
            );
            stack.extend(node.children());
        }
        Self {
            nodes,
            root: root.id.clone(),
        }
    }

    /// Remove `id` from whichever child list holds it. The record itself
    /// stays in the arena so a later attach can re-home it.
    fn detach(&mut self, id: &NodeId) {
        for rec in self.nodes.values_mut() {
            if let Some(pos) = rec.children.iter().position(|c| c == id) {
                rec.children.remove(pos);
                return;
            }
        }
    }

    /// Insert `id` into `parent`'s child list at `index`, clamped to the
    /// current length. Unknown ids and parents are ignored.
    fn attach(&mut self, id: &NodeId, parent: Option<&NodeId>, index: u32) {
        let Some(parent) = parent else { return };
        if !self.nodes.contains_key(id) {
            return;
        }
        if let Some(rec) = self.nodes.get_mut(parent) {
            let at = (index as usize).min(rec.children.len());
            rec.children.insert(at, id.clone());
        }
    }

    /// Rebuild the nested tree from the arena, root-reachable nodes only.
    /// Back-references (`parent_id`, `index`) are filled in from the final
    /// structure.
    fn into_tree(self) -> BookmarkNode {
        let mut built: BTreeMap<NodeId, BookmarkNode> = BTreeMap::new();
        let mut scheduled: BTreeSet<NodeId> = BTreeSet::new();
        let mut stack: Vec<(NodeId, bool)> = vec![(self.root.clone(), false)];
        scheduled.insert(self.root.clone());

        while let Some((id, expanded)) = stack.pop() {
            let Some(rec) = self.nodes.get(&id) else {
                continue;
            };
            if !expanded {
                stack.push((id.clone(), true));
                for child in rec.children.iter().rev() {
                    // A pathological op sequence could splice a node under
                    // its own descendant; scheduling each id once cuts any
                    // such cycle instead of looping.
                    if scheduled.insert(child.clone()) {
                        stack.push((child.clone(), false));
                    }
                }
            } else {
                let mut children: Vec<BookmarkNode> = rec
                    .children
                    .iter()
                    .filter_map(|cid| built.remove(cid))
                    .collect();
                for (i, child) in children.iter_mut().enumerate() {
                    child.parent_id = Some(id.clone());
                    child.index = Some(i as u32);
                }
                built.insert(
                    id.clone(),
                    BookmarkNode {
                        id,
                        title: rec.title.clone(),
                        url: rec.url.clone(),
                        parent_id: None,
                        index: None,
                        children: rec.is_folder.then_some(children),
                    },
                );
            }
        }

        let root = self.root;
        built
            .remove(&root)
            .unwrap_or_else(|| BookmarkNode::folder(root, "", vec![]))
    }
}
