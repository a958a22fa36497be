//! Cross-reference builder: inverts the precondition relation.
//!
//! One pass over the final operator list accumulates, per proposition, the
//! ids of the operators requiring it; each accumulated list is then flushed
//! into its own arena sequence and the occurrence count cached on the
//! proposition. The propagation algorithm walks these lists read-only to
//! drive its fact/operator fixpoint.

use crate::arena::IndexArena;
use crate::ops::{OpId, UnaryOperator};
use crate::props::{PropId, Proposition};

/// Fill `precondition_of` and `num_precondition_occurrences` for every
/// proposition from the surviving operators.
///
/// Expects `operators` to already carry dense, renumbered `operator_no`
/// values (post-simplification).
pub fn cross_reference(
    operators: &[UnaryOperator],
    preconditions: &IndexArena<PropId>,
    propositions: &mut [Proposition],
    precondition_of: &mut IndexArena<OpId>,
) {
    let mut accumulators: Vec<Vec<OpId>> = vec![Vec::new(); propositions.len()];
    for op in operators {
        for &precond in preconditions.get(op.preconditions) {
            accumulators[precond.index()].push(op.operator_no);
        }
    }

    for (prop, ops) in propositions.iter_mut().zip(&accumulators) {
        prop.precondition_of = precondition_of.append_from_iter(ops.iter().copied());
        prop.num_precondition_occurrences = ops.len() as i32;
    }
}
