//! Inline style rewriting for MDX syntax trees.
//!
//! MDX compiles JSX attributes as written, so `<Box style="color: red">` reaches
//! React as a string, which React rejects. This crate parses such strings and
//! replaces them with object expressions carrying an ESTree payload the MDX
//! compiler can consume directly.

pub mod diagnostics;
pub mod expression;
pub mod options;
pub mod rewriter;
pub mod style;

pub use diagnostics::{spawn_logger, Diagnostic, DiagnosticSink, NullSink};
pub use expression::{style_expression, style_program};
pub use options::{ElementScope, RewriteOptions};
pub use rewriter::{rewrite_styles, RewriteStats, Rewriter};
pub use style::{camel_case, parse_style, StyleDeclaration};
