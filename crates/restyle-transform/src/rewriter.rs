//! Style attribute rewriting over an mdast tree.

use restyle_mdx::{visit_mut, Attribute, AttributeValue, Node, NodeTest};
use serde_json::{json, Value};

use crate::diagnostics::{self, Diagnostic, DiagnosticSink};
use crate::expression::style_expression;
use crate::options::RewriteOptions;
use crate::style::{parse_style, StyleDeclaration};

/// Counts from a single rewrite pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteStats {
    /// Elements of the configured kinds that carried attributes
    pub elements_visited: usize,

    /// Style attributes converted to expressions
    pub attributes_rewritten: usize,
}

/// Rewrites string `style` attributes on JSX elements into object expressions.
///
/// Holds no state between passes apart from the sink.
#[derive(Debug)]
pub struct Rewriter<S> {
    options: RewriteOptions,
    sink: S,
}

impl<S: DiagnosticSink> Rewriter<S> {
    /// Create a rewriter that reports conversions to `sink`.
    pub fn new(options: RewriteOptions, sink: S) -> Self {
        Self { options, sink }
    }

    /// Consume the rewriter, returning its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Rewrite every matching attribute in `tree`, in place.
    ///
    /// Elements are visited in document order, parents before children. Within an
    /// element only the value of the style attribute changes; the attribute list
    /// keeps its length and order.
    pub fn rewrite(&mut self, tree: &mut Node) -> RewriteStats {
        let options = &self.options;
        let sink = &mut self.sink;
        let mut stats = RewriteStats::default();

        visit_mut(
            tree,
            NodeTest::kinds(options.elements.kinds()),
            &mut |node: &mut Node| {
                let Node {
                    attributes, fields, ..
                } = node;
                let Some(attributes) = attributes.as_mut() else {
                    return;
                };
                stats.elements_visited += 1;

                for attribute in attributes.iter_mut() {
                    let Some((source, declaration)) =
                        rewrite_attribute(attribute, &options.attribute)
                    else {
                        continue;
                    };
                    stats.attributes_rewritten += 1;

                    if options.diagnostics {
                        let element = fields.get("name").and_then(Value::as_str);
                        sink.emit(conversion_diagnostic(element, &source, &declaration));
                    }
                }
            },
        );

        tracing::debug!(
            "Rewrote {} style attributes across {} elements",
            stats.attributes_rewritten,
            stats.elements_visited
        );

        stats
    }
}

/// Replace a string style value with its object expression.
///
/// Returns the original string and the parsed declaration when the attribute was
/// converted. Attributes with another name, a non-string value, or an empty
/// string are left untouched.
fn rewrite_attribute(attribute: &mut Attribute, name: &str) -> Option<(String, StyleDeclaration)> {
    let Attribute::MdxJsxAttribute(attr) = attribute else {
        return None;
    };
    if attr.name != name {
        return None;
    }

    let source = match attr.value.take() {
        Some(AttributeValue::Literal(source)) if !source.is_empty() => source,
        other => {
            attr.value = other;
            return None;
        }
    };

    let declaration = parse_style(&source);
    attr.value = Some(AttributeValue::Expression(style_expression(&declaration)));

    Some((source, declaration))
}

fn conversion_diagnostic(
    element: Option<&str>,
    source: &str,
    declaration: &StyleDeclaration,
) -> Diagnostic {
    Diagnostic::new(
        "Converted style attribute to object expression",
        json!({
            "element": element,
            "source": source,
            "style": declaration,
        }),
    )
}

/// Rewrite `tree` with default options, logging diagnostics once the pass is done.
pub fn rewrite_styles(tree: &mut Node) -> RewriteStats {
    let mut rewriter = Rewriter::new(RewriteOptions::default(), Vec::<Diagnostic>::new());
    let stats = rewriter.rewrite(tree);
    diagnostics::flush(rewriter.into_sink());
    stats
}
