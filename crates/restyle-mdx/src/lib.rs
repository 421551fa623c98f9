//! MDX syntax tree model.
//!
//! This crate provides the mdast node model used by restyle, including the MDX JSX
//! element and attribute variants, the ESTree payload attached to attribute value
//! expressions, and a pre-order visitor over the tree.

pub mod estree;
pub mod node;
pub mod visit;

pub use estree::{Estree, Expression, Program, Property, PropertyKind, SourceType, Statement};
pub use node::{
    parse_tree, to_json, Attribute, AttributeValue, ExpressionAttribute, ExpressionData,
    JsxAttribute, Node, NodeKind, TreeError, ValueExpression,
};
pub use visit::{visit_mut, NodeTest, VisitMut};
