//! Task model consumed by graph construction.
//!
//! The planning task supplies ordered variables with finite domains, one
//! named fact per (variable, value) pair, the goal condition, and whether
//! the task has axioms. These are plain owned structs populated by the
//! host system; construction only reads them.

use std::fmt;

/// One planning variable, identified by its position in [`Task::variables`].
#[derive(Debug, Clone)]
pub struct Variable {
    /// Number of values in this variable's finite domain.
    pub domain_size: usize,
}

/// One ground fact: a (variable, value) pair with a unique display name.
#[derive(Debug, Clone)]
pub struct Fact {
    pub var: usize,
    pub value: usize,
    /// Display name, unique across the task. Used to match externally
    /// supplied operator conditions against native facts.
    pub name: String,
}

/// A planning task, as far as graph construction needs it.
#[derive(Debug, Clone, Default)]
pub struct Task {
    /// Ordered variable sequence; variable i is `variables[i]`.
    pub variables: Vec<Variable>,
    /// All facts, ordered by (var, value): facts of variable 0 first, each
    /// variable's facts ordered by value.
    pub facts: Vec<Fact>,
    /// Goal condition as (variable, value) pairs.
    pub goals: Vec<(usize, usize)>,
    /// Whether the task has conditional derived facts (axioms). Dead-end
    /// detection on the relaxed graph is unreliable when axioms exist.
    pub has_axioms: bool,
}

/// A structurally invalid task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// Fact count does not equal the sum of variable domain sizes.
    FactCountMismatch { expected: usize, found: usize },
    /// A fact names a variable or value outside the declared domains.
    FactOutOfRange { index: usize, var: usize, value: usize },
    /// A fact is not at the slot its (var, value) pair implies.
    FactOrderMismatch { index: usize, var: usize, value: usize },
    /// Two facts share a display name.
    DuplicateFactName { name: String },
    /// A goal names a variable or value outside the declared domains.
    GoalOutOfRange { var: usize, value: usize },
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskError::FactCountMismatch { expected, found } => write!(
                f,
                "task has {} facts but domain sizes sum to {}",
                found, expected
            ),
            TaskError::FactOutOfRange { index, var, value } => write!(
                f,
                "fact {} refers to out-of-range pair (var {}, value {})",
                index, var, value
            ),
            TaskError::FactOrderMismatch { index, var, value } => write!(
                f,
                "fact {} with pair (var {}, value {}) is not in (var, value) order",
                index, var, value
            ),
            TaskError::DuplicateFactName { name } => {
                write!(f, "duplicate fact name {:?}", name)
            }
            TaskError::GoalOutOfRange { var, value } => write!(
                f,
                "goal refers to out-of-range pair (var {}, value {})",
                var, value
            ),
        }
    }
}

impl std::error::Error for TaskError {}

impl Task {
    /// Total fact count implied by the variable domains.
    pub fn num_facts(&self) -> usize {
        self.variables.iter().map(|v| v.domain_size).sum()
    }

    /// Check structural consistency: one fact per (variable, value) pair in
    /// order, unique names, goals in range.
    pub fn validate(&self) -> Result<(), TaskError> {
        let expected = self.num_facts();
        if self.facts.len() != expected {
            return Err(TaskError::FactCountMismatch {
                expected,
                found: self.facts.len(),
            });
        }

        let mut slot = 0usize;
        for (index, fact) in self.facts.iter().enumerate() {
            let in_range = fact.var < self.variables.len()
                && fact.value < self.variables[fact.var].domain_size;
            if !in_range {
                return Err(TaskError::FactOutOfRange {
                    index,
                    var: fact.var,
                    value: fact.value,
                });
            }
            let expected_slot: usize = self.variables[..fact.var]
                .iter()
                .map(|v| v.domain_size)
                .sum::<usize>()
                + fact.value;
            if expected_slot != slot {
                return Err(TaskError::FactOrderMismatch {
                    index,
                    var: fact.var,
                    value: fact.value,
                });
            }
            slot += 1;
        }

        let mut seen = hashbrown::HashSet::with_capacity(self.facts.len());
        for fact in &self.facts {
            if !seen.insert(fact.name.as_str()) {
                return Err(TaskError::DuplicateFactName {
                    name: fact.name.clone(),
                });
            }
        }

        for &(var, value) in &self.goals {
            if var >= self.variables.len() || value >= self.variables[var].domain_size {
                return Err(TaskError::GoalOutOfRange { var, value });
            }
        }

        Ok(())
    }
}
