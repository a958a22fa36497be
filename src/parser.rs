//! Parser for external operator descriptions.
//!
//! Format (line oriented):
//! - one line naming the effect condition
//! - zero or more lines naming precondition conditions
//! - a line containing exactly `cost`
//! - a line containing the non-negative integer cost
//! - one blank separator line before the next block
//! - the stream is terminated by a literal `end_operators` line
//!
//! The source is an explicit parameter (any `BufRead`, or a path); an
//! unreadable source is a fatal typed error, never a silent empty set.
//! A caller that wants no external operators passes a source containing
//! only `end_operators`.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Terminator line closing the operator stream.
pub const END_MARKER: &str = "end_operators";

/// Separator line between a block's preconditions and its cost.
pub const COST_MARKER: &str = "cost";

/// One operator block as read from the source. Transient: consumed by
/// unary-operator construction and discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedOperator {
    /// Name of the effect condition.
    pub effect: String,
    /// Names of the precondition conditions, in source order. May be
    /// empty (an always-applicable operator).
    pub preconditions: Vec<String>,
    /// Non-negative cost.
    pub cost: i32,
}

/// Fatal problem with the operator source.
#[derive(Debug)]
pub enum SourceError {
    /// The source could not be opened.
    Unavailable { path: PathBuf, source: io::Error },
    /// Reading from the source failed mid-stream.
    Read { source: io::Error },
    /// The stream does not follow the block format.
    Malformed {
        /// Zero-based index of the block being parsed.
        block: usize,
        expected: &'static str,
        found: String,
    },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Unavailable { path, source } => {
                write!(f, "cannot open operator source {}: {}", path.display(), source)
            }
            SourceError::Read { source } => {
                write!(f, "error reading operator source: {}", source)
            }
            SourceError::Malformed {
                block,
                expected,
                found,
            } => write!(
                f,
                "malformed operator source in block {}: expected {}, found {:?}",
                block, expected, found
            ),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceError::Unavailable { source, .. } => Some(source),
            SourceError::Read { source } => Some(source),
            SourceError::Malformed { .. } => None,
        }
    }
}

/// Parse all operator blocks from a reader, up to `end_operators`.
pub fn parse_operators<R: BufRead>(reader: R) -> Result<Vec<ParsedOperator>, SourceError> {
    let mut lines = reader.lines();
    let mut operators = Vec::new();

    loop {
        let block = operators.len();
        let line = next_line(&mut lines, block, "effect name or `end_operators`")?;
        if line == END_MARKER {
            return Ok(operators);
        }

        let effect = line;
        let mut preconditions = Vec::new();
        loop {
            let line = next_line(&mut lines, block, "precondition name or `cost`")?;
            if line == COST_MARKER {
                break;
            }
            preconditions.push(line);
        }

        let cost_line = next_line(&mut lines, block, "non-negative integer cost")?;
        let cost = parse_cost(&cost_line, block)?;

        let separator = next_line(&mut lines, block, "blank separator line")?;
        if !separator.trim().is_empty() {
            return Err(SourceError::Malformed {
                block,
                expected: "blank separator line",
                found: separator,
            });
        }

        operators.push(ParsedOperator {
            effect,
            preconditions,
            cost,
        });
    }
}

/// Open a file and parse it. Open failure is `SourceError::Unavailable`.
pub fn parse_operators_from_path<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<ParsedOperator>, SourceError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| SourceError::Unavailable {
        path: path.to_path_buf(),
        source,
    })?;
    parse_operators(BufReader::new(file))
}

fn next_line<B: BufRead>(
    lines: &mut io::Lines<B>,
    block: usize,
    expected: &'static str,
) -> Result<String, SourceError> {
    match lines.next() {
        Some(Ok(line)) => Ok(line),
        Some(Err(source)) => Err(SourceError::Read { source }),
        None => Err(SourceError::Malformed {
            block,
            expected,
            found: "end of stream".to_string(),
        }),
    }
}

fn parse_cost(line: &str, block: usize) -> Result<i32, SourceError> {
    let malformed = || SourceError::Malformed {
        block,
        expected: "non-negative integer cost",
        found: line.to_string(),
    };
    let cost: i32 = line.trim().parse().map_err(|_| malformed())?;
    if cost < 0 {
        return Err(malformed());
    }
    Ok(cost)
}

#[cfg(test)]
mod tests;
