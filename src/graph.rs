//! Graph construction orchestrator and the immutable result.
//!
//! `RelaxationGraph::build` runs the strictly-forward pipeline once per
//! heuristic instantiation: validate the task, parse the operator source,
//! populate the proposition space, build unary operators, mark goals,
//! simplify away dominated operators, and cross-reference. The result is
//! the compact structure a cost-propagation algorithm traverses on every
//! expanded search state; after `build` returns nothing here is mutated
//! except the per-search scratch fields on [`Proposition`], which belong
//! to that algorithm.

use crate::arena::IndexArena;
use crate::ops::{self, IngestError, IngestOptions, OpId, UnaryOperator};
use crate::parser::{self, SourceError};
use crate::props::{PropId, PropSpace, Proposition};
use crate::simplify::simplify;
use crate::stats::BuildStats;
use crate::task::{Task, TaskError};
use crate::trace::{debug, info};
use crate::xref::cross_reference;
use std::fmt;
use std::io::BufRead;
use std::path::Path;
use std::time::Instant;

/// Any fatal construction failure. Construction is never retried; the
/// heuristic instantiation aborts.
#[derive(Debug)]
pub enum BuildError {
    Task(TaskError),
    Source(SourceError),
    Ingest(IngestError),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::Task(e) => write!(f, "invalid task: {}", e),
            BuildError::Source(e) => write!(f, "operator source error: {}", e),
            BuildError::Ingest(e) => write!(f, "operator ingestion error: {}", e),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::Task(e) => Some(e),
            BuildError::Source(e) => Some(e),
            BuildError::Ingest(e) => Some(e),
        }
    }
}

impl From<TaskError> for BuildError {
    fn from(e: TaskError) -> Self {
        BuildError::Task(e)
    }
}

impl From<SourceError> for BuildError {
    fn from(e: SourceError) -> Self {
        BuildError::Source(e)
    }
}

impl From<IngestError> for BuildError {
    fn from(e: IngestError) -> Self {
        BuildError::Ingest(e)
    }
}

/// The constructed proposition / unary-operator graph.
///
/// Owned by the heuristic instance that built it. All structure is
/// immutable after construction and safe to read from multiple search
/// workers; mutable access exists only for the propagation scratch fields
/// and requires a unique borrow as usual.
#[derive(Debug)]
pub struct RelaxationGraph {
    space: PropSpace,
    propositions: Vec<Proposition>,
    operators: Vec<UnaryOperator>,
    preconditions: IndexArena<PropId>,
    precondition_of: IndexArena<OpId>,
    goal_props: Vec<PropId>,
    dead_ends_reliable: bool,
    stats: BuildStats,
}

impl RelaxationGraph {
    /// Build from a task and an operator-description reader, synthesizing
    /// propositions for unknown condition names.
    pub fn build<R: BufRead>(task: &Task, source: R) -> Result<Self, BuildError> {
        Self::build_with(task, source, IngestOptions::default())
    }

    /// Build, reading the operator description from a file. A file that
    /// cannot be opened fails construction; there is no silent fallback to
    /// an empty operator set.
    pub fn build_from_path<P: AsRef<Path>>(task: &Task, path: P) -> Result<Self, BuildError> {
        let parsed = parser::parse_operators_from_path(path)?;
        Self::from_parsed(task, parsed, IngestOptions::default())
    }

    /// Build with explicit ingestion options.
    pub fn build_with<R: BufRead>(
        task: &Task,
        source: R,
        options: IngestOptions,
    ) -> Result<Self, BuildError> {
        let parsed = parser::parse_operators(source)?;
        Self::from_parsed(task, parsed, options)
    }

    fn from_parsed(
        task: &Task,
        parsed: Vec<parser::ParsedOperator>,
        options: IngestOptions,
    ) -> Result<Self, BuildError> {
        task.validate()?;

        let mut stats = BuildStats {
            parsed_operators: parsed.len(),
            ..BuildStats::default()
        };

        let mut space = PropSpace::from_task(task);
        let mut preconditions = IndexArena::new();
        let mut operators =
            ops::build_unary_operators(&parsed, &mut space, &mut preconditions, options)?;
        stats.built_operators = operators.len();
        stats.synthesized_propositions = space.num_synthesized();
        debug!(
            operators = operators.len(),
            synthesized = space.num_synthesized(),
            "built unary operators"
        );

        // The proposition array is sized after ingestion: synthesis has
        // finished by now, so the space's total is final.
        let mut propositions = vec![Proposition::new(); space.total()];

        let mut goal_props = Vec::with_capacity(task.goals.len());
        for &(var, value) in &task.goals {
            let prop_id = space.task_fact_id(var, value);
            propositions[prop_id.index()].is_goal = true;
            goal_props.push(prop_id);
        }

        info!(operators = operators.len(), "simplifying unary operators");
        let simplify_timer = Instant::now();
        stats.removed_operators = simplify(&mut operators, &preconditions);
        stats.simplify_time = simplify_timer.elapsed();
        info!(
            removed = stats.removed_operators,
            remaining = operators.len(),
            elapsed = ?stats.simplify_time,
            "simplified unary operators"
        );

        let mut precondition_of = IndexArena::new();
        cross_reference(
            &operators,
            &preconditions,
            &mut propositions,
            &mut precondition_of,
        );

        Ok(Self {
            dead_ends_reliable: !task.has_axioms,
            space,
            propositions,
            operators,
            preconditions,
            precondition_of,
            goal_props,
            stats,
        })
    }

    /// The dense proposition array: native facts first, then synthesized.
    pub fn propositions(&self) -> &[Proposition] {
        &self.propositions
    }

    /// Mutable access for the propagation algorithm's scratch fields.
    pub fn propositions_mut(&mut self) -> &mut [Proposition] {
        &mut self.propositions
    }

    pub fn proposition(&self, id: PropId) -> &Proposition {
        &self.propositions[id.index()]
    }

    pub fn proposition_mut(&mut self, id: PropId) -> &mut Proposition {
        &mut self.propositions[id.index()]
    }

    pub fn num_propositions(&self) -> usize {
        self.propositions.len()
    }

    /// The final operator array, dominance-free up to the subset-test
    /// bound, with dense `operator_no` ids.
    pub fn operators(&self) -> &[UnaryOperator] {
        &self.operators
    }

    pub fn operator(&self, id: OpId) -> &UnaryOperator {
        &self.operators[id.index()]
    }

    /// Sorted-unique precondition ids of one operator.
    pub fn preconditions(&self, id: OpId) -> &[PropId] {
        self.preconditions.get(self.operators[id.index()].preconditions)
    }

    /// Ids of the operators listing `prop` as a precondition.
    pub fn precondition_of(&self, prop: PropId) -> &[OpId] {
        self.precondition_of
            .get(self.propositions[prop.index()].precondition_of)
    }

    /// Goal proposition ids, in goal-condition order.
    pub fn goal_props(&self) -> &[PropId] {
        &self.goal_props
    }

    /// Id of the native fact for a (variable, value) pair.
    pub fn prop_id(&self, var: usize, value: usize) -> PropId {
        self.space.task_fact_id(var, value)
    }

    /// Resolve a condition name against the final proposition space.
    pub fn lookup(&self, name: &str) -> Option<PropId> {
        self.space.lookup(name)
    }

    /// Name of a synthesized proposition; None for native ids.
    pub fn synthesized_name(&self, id: PropId) -> Option<&str> {
        self.space.synthesized_name(id)
    }

    pub fn num_task_facts(&self) -> usize {
        self.space.num_task_facts()
    }

    pub fn num_synthesized(&self) -> usize {
        self.space.num_synthesized()
    }

    /// False iff the task has axioms: relaxed dead-end detection cannot be
    /// trusted then.
    pub fn dead_ends_reliable(&self) -> bool {
        self.dead_ends_reliable
    }

    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests;
