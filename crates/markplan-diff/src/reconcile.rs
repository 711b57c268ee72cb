//! Move reconciliation: separate genuine reorders from renumbering noise.
//!
//! Inserting or removing one node shifts every later sibling's index by one.
//! A naive index comparison therefore reports a "move" for each of them even
//! though their relative order never changed. This pass suppresses those
//! ghost moves.
//!
//! The filter works per folder: when a folder has more than one same-parent
//! candidate and every candidate shifted by the *same* signed amount, the
//! whole group is classified as a renumbering artifact and dropped. An
//! intentional reorder necessarily perturbs the relative order of the nodes
//! between the old and new position, producing non-uniform deltas, so mixed
//! deltas (or a lone candidate) are kept as genuine moves.
//!
//! This is a heuristic: a reorder whose deltas happen to coincide for every
//! member of a group is indistinguishable from a renumbering shift and will
//! be suppressed. See the property tests at the bottom of this module.

use std::collections::BTreeMap;

use tracing::debug;

use markplan_types::{NodeId, Operation};

use crate::detect::MoveCandidate;

/// Filter move candidates down to genuine moves, in deterministic order:
/// cross-parent moves first, then surviving same-parent groups by folder id.
pub fn reconcile_moves(candidates: Vec<MoveCandidate>) -> Vec<Operation> {
    let mut kept: Vec<MoveCandidate> = Vec::new();
    let mut groups: BTreeMap<Option<NodeId>, Vec<MoveCandidate>> = BTreeMap::new();

    for candidate in candidates {
        if !candidate.is_same_parent {
            kept.push(candidate);
            continue;
        }
        // A zero delta means the index never changed; detection should not
        // have produced such a candidate, but guard against it anyway.
        if candidate.delta() == 0 {
            continue;
        }
        groups
            .entry(candidate.to_parent_id.clone())
            .or_default()
            .push(candidate);
    }

    for (parent_id, group) in groups {
        if is_renumbering_artifact(&group) {
            debug!(
                parent = %parent_id.as_ref().map(NodeId::as_str).unwrap_or("<root>"),
                suppressed = group.len(),
                delta = group[0].delta(),
                "uniform sibling shift classified as renumbering artifact"
            );
            continue;
        }
        kept.extend(group);
    }

    kept.into_iter().map(MoveCandidate::into_operation).collect()
}

/// A group is an artifact only when it has more than one member and every
/// member shifted by an identical signed delta. A singleton gives no basis
/// to infer renumbering and is always treated as genuine.
fn is_renumbering_artifact(group: &[MoveCandidate]) -> bool {
    if group.len() <= 1 {
        return false;
    }
    let first = group[0].delta();
    group.iter().all(|c| c.delta() == first)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: &str, from: u32, to: u32, same_parent: bool) -> MoveCandidate {
        MoveCandidate {
            node_id: NodeId::new(id),
            title: id.to_string(),
            is_folder: false,
            from_parent_id: Some(NodeId::new("p")),
            to_parent_id: Some(NodeId::new("p")),
            from_index: from,
            to_index: to,
            is_same_parent: same_parent,
        }
    }

    fn moved_ids(ops: &[Operation]) -> Vec<String> {
        ops.iter().map(|op| op.node_id().as_str().to_string()).collect()
    }

    #[test]
    fn uniform_shift_group_is_suppressed() {
        // B and C both shifted down by one: an insertion happened above them.
        let ops = reconcile_moves(vec![
            candidate("b", 1, 2, true),
            candidate("c", 2, 3, true),
        ]);
        assert!(ops.is_empty());
    }

    #[test]
    fn non_uniform_group_is_kept_whole() {
        // A swap: deltas +1 and -1.
        let ops = reconcile_moves(vec![
            candidate("b", 1, 2, true),
            candidate("c", 2, 1, true),
        ]);
        assert_eq!(moved_ids(&ops), vec!["b", "c"]);
    }

    #[test]
    fn singleton_is_always_genuine() {
        let ops = reconcile_moves(vec![candidate("b", 0, 3, true)]);
        assert_eq!(moved_ids(&ops), vec!["b"]);
    }

    #[test]
    fn cross_parent_moves_bypass_the_filter() {
        let mut cross = candidate("x", 0, 0, false);
        cross.from_parent_id = Some(NodeId::new("a"));
        cross.to_parent_id = Some(NodeId::new("b"));
        // Even a zero delta passes through when parents differ.
        let ops = reconcile_moves(vec![cross]);
        assert_eq!(moved_ids(&ops), vec!["x"]);
    }

    #[test]
    fn zero_delta_same_parent_candidate_is_discarded() {
        let ops = reconcile_moves(vec![
            candidate("a", 2, 2, true),
            candidate("b", 1, 0, true),
        ]);
        // The defensive guard drops "a" before grouping, leaving a genuine
        // singleton.
        assert_eq!(moved_ids(&ops), vec!["b"]);
    }

    #[test]
    fn groups_are_judged_per_folder() {
        // Folder p: uniform shift (artifact). Folder q: lone move (genuine).
        let mut in_q = candidate("z", 0, 2, true);
        in_q.from_parent_id = Some(NodeId::new("q"));
        in_q.to_parent_id = Some(NodeId::new("q"));
        let ops = reconcile_moves(vec![
            candidate("b", 1, 2, true),
            candidate("c", 2, 3, true),
            in_q,
        ]);
        assert_eq!(moved_ids(&ops), vec!["z"]);
    }

    #[test]
    fn cross_parent_precede_same_parent_in_output() {
        let mut cross = candidate("x", 4, 0, false);
        cross.from_parent_id = Some(NodeId::new("a"));
        let ops = reconcile_moves(vec![
            candidate("b", 0, 3, true),
            cross,
        ]);
        assert_eq!(moved_ids(&ops), vec!["x", "b"]);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Any same-parent group with two or more members and one shared
            /// delta is suppressed, regardless of group size or magnitude.
            /// This pins the known heuristic limitation: an adversarial
            /// reorder with coinciding deltas is indistinguishable from
            /// renumbering and is dropped too.
            #[test]
            fn uniform_groups_of_any_size_are_suppressed(
                size in 2usize..12,
                base in 0u32..50,
                delta in 1i64..8,
            ) {
                let group: Vec<MoveCandidate> = (0..size)
                    .map(|i| {
                        let from = base + (i as u32) * 10;
                        let to = (i64::from(from) + delta) as u32;
                        candidate(&format!("n{i}"), from, to, true)
                    })
                    .collect();
                prop_assert!(reconcile_moves(group).is_empty());
            }

            /// Breaking the uniformity of a single member keeps the whole
            /// group.
            #[test]
            fn one_divergent_delta_keeps_the_group(
                size in 3usize..12,
                delta in 1i64..8,
            ) {
                let mut group: Vec<MoveCandidate> = (0..size)
                    .map(|i| {
                        let from = (i as u32) * 10;
                        let to = (i64::from(from) + delta) as u32;
                        candidate(&format!("n{i}"), from, to, true)
                    })
                    .collect();
                // Push the last member one slot further than the rest.
                group[size - 1].to_index += 1;
                let ops = reconcile_moves(group);
                prop_assert_eq!(ops.len(), size);
            }

            /// Singletons survive for every delta magnitude and sign.
            #[test]
            fn singletons_survive_any_delta(from in 0u32..100, to in 0u32..100) {
                prop_assume!(from != to);
                let ops = reconcile_moves(vec![candidate("n", from, to, true)]);
                prop_assert_eq!(ops.len(), 1);
            }
        }
    }
}
