pub mod batch;
pub mod parse;
pub mod rewrite;
