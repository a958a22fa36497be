pub mod arena;
pub mod graph;
pub mod ops;
pub mod parser;
pub mod props;
pub mod simplify;
pub mod stats;
pub mod task;
pub mod trace;
pub mod xref;

#[cfg(test)]
pub(crate) mod test_utils;
