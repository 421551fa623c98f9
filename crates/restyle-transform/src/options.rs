//! Rewrite options.

use restyle_mdx::NodeKind;
use serde::Deserialize;

/// Which JSX element kinds have their style attribute rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementScope {
    /// Block-level elements only
    #[default]
    Flow,
    /// Block-level and inline elements
    FlowAndText,
}

const FLOW: &[NodeKind] = &[NodeKind::MdxJsxFlowElement];
const FLOW_AND_TEXT: &[NodeKind] = &[NodeKind::MdxJsxFlowElement, NodeKind::MdxJsxTextElement];

impl ElementScope {
    /// Node kinds visited under this scope.
    pub fn kinds(&self) -> &'static [NodeKind] {
        match self {
            Self::Flow => FLOW,
            Self::FlowAndText => FLOW_AND_TEXT,
        }
    }
}

/// Options for [`Rewriter`](crate::Rewriter).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RewriteOptions {
    /// Attribute holding the inline style string
    pub attribute: String,

    /// Element kinds to visit
    pub elements: ElementScope,

    /// Emit a diagnostic per rewritten attribute
    pub diagnostics: bool,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            attribute: "style".to_string(),
            elements: ElementScope::Flow,
            diagnostics: true,
        }
    }
}
