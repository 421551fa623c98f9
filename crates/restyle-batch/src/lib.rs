//! Batch style rewriting for directories of MDX syntax trees.
//!
//! Walks a directory of mdast JSON files and rewrites each tree in parallel.

pub mod batch;

pub use batch::{BatchConfig, BatchError, BatchResult, BatchRewriter};
