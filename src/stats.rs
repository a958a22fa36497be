//! Construction statistics.
//!
//! Construction is a one-shot sequential pass, so these are plain counters
//! filled while building and frozen with the rest of the result.

use std::fmt;
use std::time::Duration;

/// Counters and timings from one graph construction.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Operator blocks read from the source.
    pub parsed_operators: usize,
    /// Unary operators built before simplification.
    pub built_operators: usize,
    /// Operators removed as dominated.
    pub removed_operators: usize,
    /// Propositions synthesized for names absent from the task.
    pub synthesized_propositions: usize,
    /// Wall time spent in the dominance simplifier.
    pub simplify_time: Duration,
}

impl BuildStats {
    /// Operators surviving simplification.
    pub fn surviving_operators(&self) -> usize {
        self.built_operators - self.removed_operators
    }
}

impl fmt::Display for BuildStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "parsed operators:         {}", self.parsed_operators)?;
        writeln!(f, "built unary operators:    {}", self.built_operators)?;
        writeln!(f, "removed as dominated:     {}", self.removed_operators)?;
        writeln!(f, "surviving operators:      {}", self.surviving_operators())?;
        writeln!(
            f,
            "synthesized propositions: {}",
            self.synthesized_propositions
        )?;
        write!(f, "time to simplify:         {:?}", self.simplify_time)
    }
}
