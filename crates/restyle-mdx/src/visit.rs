//! Pre-order tree traversal.

use crate::node::{Node, NodeKind};

/// Callback invoked on matched nodes.
pub trait VisitMut {
    fn visit(&mut self, node: &mut Node);
}

impl<F: FnMut(&mut Node)> VisitMut for F {
    fn visit(&mut self, node: &mut Node) {
        self(node)
    }
}

/// Selects which nodes a visitor is called on.
#[derive(Debug, Clone, Copy)]
pub enum NodeTest<'a> {
    /// Every node
    Any,
    /// Nodes whose kind is in the list
    Kinds(&'a [NodeKind]),
}

impl<'a> NodeTest<'a> {
    pub fn kinds(kinds: &'a [NodeKind]) -> Self {
        Self::Kinds(kinds)
    }

    pub fn matches(&self, node: &Node) -> bool {
        match self {
            Self::Any => true,
            Self::Kinds(kinds) => kinds.contains(&node.kind),
        }
    }
}

/// Walk `tree` depth-first in document order, calling `visitor` on every node
/// that passes `test`.
///
/// A node is visited before its descendants, and its children are read after
/// the visitor returns. The walk uses an explicit stack so deeply nested
/// documents do not exhaust the call stack.
pub fn visit_mut<V: VisitMut + ?Sized>(tree: &mut Node, test: NodeTest<'_>, visitor: &mut V) {
    let mut stack = vec![tree];

    while let Some(node) = stack.pop() {
        if test.matches(node) {
            visitor.visit(node);
        }
        if let Some(children) = node.children.as_mut() {
            stack.extend(children.iter_mut().rev());
        }
    }
}
