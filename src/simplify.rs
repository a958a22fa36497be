//! Dominance-based removal of redundant unary operators.
//!
//! Operator o1 dominates o2 (at a distinct position) iff:
//! 1. eff(o1) = eff(o2), and
//! 2. pre(o1) ⊆ pre(o2) (not necessarily strict), and
//! 3. cost(o1) <= cost(o2), and
//! 4. either 2. or 3. is strict, or o1's position precedes o2's.
//!
//! This is a strict partial order; any dominated operator is removed and
//! never changes relaxed reachability. For operators sharing preconditions
//! and effect the order is total (cost, then position), which lets a single
//! key map capture exact-duplicate domination. Strict-subset domination is
//! tested by enumerating all 2^k - 1 strict subsets of an operator's
//! precondition set, but only up to [`MAX_PRECONDITIONS_TO_TEST`]
//! preconditions; beyond the bound the operator is kept as-is.

use crate::arena::IndexArena;
use crate::ops::{OpId, UnaryOperator};
use crate::props::PropId;
use hashbrown::HashMap;
use rustc_hash::FxHasher;
use smallvec::SmallVec;
use std::hash::BuildHasherDefault;

/// Upper bound on precondition count for the subset-enumeration test.
///
/// The test costs 2^k lookups for k preconditions, so operators above this
/// bound skip it and may retain avoidable redundancy. Do not raise without
/// re-deriving the worst-case construction cost.
pub const MAX_PRECONDITIONS_TO_TEST: usize = 5;

type Preconditions = SmallVec<[PropId; 8]>;
type Key = (Preconditions, PropId);
/// (cost, position); lexicographic order picks the dominating element
/// among operators sharing a key.
type Value = (i32, u32);
type DominanceMap = HashMap<Key, Value, BuildHasherDefault<FxHasher>>;

/// Remove every dominated operator from `operators`, preserving the
/// survivors' relative order and renumbering `operator_no` densely.
/// Returns the number of operators removed.
///
/// Requires every operator's precondition sequence to be sorted and
/// duplicate-free (the ingestor's invariant); subset keys are generated
/// in that same order so lookups match.
pub fn simplify(
    operators: &mut Vec<UnaryOperator>,
    preconditions: &IndexArena<PropId>,
) -> usize {
    if cfg!(debug_assertions) {
        for op in operators.iter() {
            let pre = preconditions.get(op.preconditions);
            debug_assert!(pre.windows(2).all(|w| w[0] < w[1]));
        }
    }

    let index = build_dominance_map(operators, preconditions);
    let dominated: Vec<bool> = operators
        .iter()
        .enumerate()
        .map(|(position, op)| is_dominated(op, position as u32, preconditions, &index))
        .collect();

    let before = operators.len();
    let mut survivors = Vec::with_capacity(before);
    for (position, mut op) in std::mem::take(operators).into_iter().enumerate() {
        if dominated[position] {
            continue;
        }
        op.operator_no = OpId::new(survivors.len() as u32);
        survivors.push(op);
    }
    *operators = survivors;
    before - operators.len()
}

/// Map each (preconditions, effect) key to the lexicographically smallest
/// (cost, position) among the operators carrying it. Operators above the
/// precondition bound still participate: the exact-key test applies to
/// them even though the subset test does not.
fn build_dominance_map(
    operators: &[UnaryOperator],
    preconditions: &IndexArena<PropId>,
) -> DominanceMap {
    let mut index =
        DominanceMap::with_capacity_and_hasher(operators.len(), Default::default());
    for (position, op) in operators.iter().enumerate() {
        let key: Key = (
            SmallVec::from_slice(preconditions.get(op.preconditions)),
            op.effect,
        );
        let value: Value = (op.base_cost, position as u32);
        index
            .entry(key)
            .and_modify(|existing| {
                if value < *existing {
                    *existing = value;
                }
            })
            .or_insert(value);
    }
    index
}

fn is_dominated(
    op: &UnaryOperator,
    position: u32,
    preconditions: &IndexArena<PropId>,
    index: &DominanceMap,
) -> bool {
    let precondition = preconditions.get(op.preconditions);

    // Exact-key case first: among operators with identical preconditions
    // and effect the order is total, so op survives only if the map entry
    // for its own key is op itself. This also covers zero-precondition
    // operators, whose only subset is tested here.
    let own_key: Key = (SmallVec::from_slice(precondition), op.effect);
    if index[&own_key].1 != position {
        return true;
    }

    // Subset enumeration is exponential in the precondition count.
    if op.num_preconditions as usize > MAX_PRECONDITIONS_TO_TEST {
        return false;
    }

    // Every strict subset keeps conditions 1. and 2., and strictness gives
    // 4a., so only the cost check remains per hit.
    let mut subset_key: Key = (SmallVec::new(), op.effect);
    let strict_subsets = (1u32 << precondition.len()) - 1;
    for mask in 0..strict_subsets {
        subset_key.0.clear();
        for (bit, &prop) in precondition.iter().enumerate() {
            if mask & (1 << bit) != 0 {
                subset_key.0.push(prop);
            }
        }
        if let Some(&(dominator_cost, _)) = index.get(&subset_key) {
            if dominator_cost <= op.base_cost {
                return true;
            }
        }
    }
    false
}
