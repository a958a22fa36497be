//! Unary operators and their construction from parsed blocks.
//!
//! Each parsed block becomes one unary operator: a single effect
//! proposition, a sorted-unique conjunctive precondition set stored in the
//! shared arena, and a non-negative base cost. Condition names resolve
//! through the proposition space, so names matching task-native facts keep
//! their native ids and unknown names are synthesized (unless synthesis is
//! disabled, in which case resolution failure is a typed error).

use crate::arena::{ArenaHandle, IndexArena};
use crate::parser::ParsedOperator;
use crate::props::{PropId, PropSpace};
use smallvec::SmallVec;
use std::fmt;

/// Dense unary-operator identifier: the operator's position in the final
/// operator sequence. This is the external reference the cross-reference
/// index and the propagation algorithm use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OpId(u32);

impl OpId {
    pub(crate) fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw u32 value (for debugging/display).
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Index into the dense operator array.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One ground relaxed action: single effect, conjunctive preconditions,
/// non-negative cost.
#[derive(Debug, Clone)]
pub struct UnaryOperator {
    /// Effect proposition.
    pub effect: PropId,
    /// Non-negative base cost.
    pub base_cost: i32,
    /// Cached length of the precondition sequence.
    pub num_preconditions: u32,
    /// Handle to the sorted-unique precondition id sequence.
    pub preconditions: ArenaHandle,
    /// Position in the operator sequence; renumbered densely after
    /// simplification.
    pub operator_no: OpId,
}

/// How ingestion resolves condition names with no matching known
/// proposition.
#[derive(Debug, Clone, Copy)]
pub struct IngestOptions {
    /// Synthesize a fresh proposition for unknown names. Default true;
    /// when false, an unknown name is an error.
    pub synthesize: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self { synthesize: true }
    }
}

/// Resolution failure during ingestion. Only reachable with synthesis
/// disabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    UnresolvableCondition { name: String, block: usize },
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestError::UnresolvableCondition { name, block } => write!(
                f,
                "condition {:?} in operator block {} matches no known proposition \
                 and synthesis is disabled",
                name, block
            ),
        }
    }
}

impl std::error::Error for IngestError {}

/// Build one unary operator per parsed block.
///
/// Precondition id lists are sorted ascending and deduplicated before
/// storage; duplicate names in a block are semantically redundant and must
/// not multiply the subset-enumeration cost later.
pub fn build_unary_operators(
    parsed: &[ParsedOperator],
    space: &mut PropSpace,
    preconditions: &mut IndexArena<PropId>,
    options: IngestOptions,
) -> Result<Vec<UnaryOperator>, IngestError> {
    let mut operators = Vec::with_capacity(parsed.len());
    for (block, op) in parsed.iter().enumerate() {
        debug_assert!(op.cost >= 0, "negative cost escaped the parser");

        let mut precondition_props: SmallVec<[PropId; 8]> =
            SmallVec::with_capacity(op.preconditions.len());
        for name in &op.preconditions {
            precondition_props.push(resolve(space, name, block, options)?);
        }
        precondition_props.sort_unstable();
        precondition_props.dedup();

        let effect = resolve(space, &op.effect, block, options)?;
        let handle = preconditions.append(&precondition_props);
        operators.push(UnaryOperator {
            effect,
            base_cost: op.cost,
            num_preconditions: precondition_props.len() as u32,
            preconditions: handle,
            operator_no: OpId(block as u32),
        });
    }
    Ok(operators)
}

fn resolve(
    space: &mut PropSpace,
    name: &str,
    block: usize,
    options: IngestOptions,
) -> Result<PropId, IngestError> {
    if options.synthesize {
        Ok(space.resolve_or_create(name))
    } else {
        space
            .lookup(name)
            .ok_or_else(|| IngestError::UnresolvableCondition {
                name: name.to_string(),
                block,
            })
    }
}
