//! mdast nodes with MDX JSX extensions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::estree::Estree;

/// Node type discriminator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    Root,
    Paragraph,
    Heading,
    Text,
    /// Block-level JSX element: `<Box style="...">` on its own line
    MdxJsxFlowElement,
    /// Inline JSX element inside a paragraph
    MdxJsxTextElement,
    MdxFlowExpression,
    MdxTextExpression,
    MdxjsEsm,
    /// Any other mdast node type
    Other(String),
}

impl NodeKind {
    /// The `type` string used in serialized trees.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Root => "root",
            Self::Paragraph => "paragraph",
            Self::Heading => "heading",
            Self::Text => "text",
            Self::MdxJsxFlowElement => "mdxJsxFlowElement",
            Self::MdxJsxTextElement => "mdxJsxTextElement",
            Self::MdxFlowExpression => "mdxFlowExpression",
            Self::MdxTextExpression => "mdxTextExpression",
            Self::MdxjsEsm => "mdxjsEsm",
            Self::Other(kind) => kind,
        }
    }
}

impl From<String> for NodeKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "root" => Self::Root,
            "paragraph" => Self::Paragraph,
            "heading" => Self::Heading,
            "text" => Self::Text,
            "mdxJsxFlowElement" => Self::MdxJsxFlowElement,
            "mdxJsxTextElement" => Self::MdxJsxTextElement,
            "mdxFlowExpression" => Self::MdxFlowExpression,
            "mdxTextExpression" => Self::MdxTextExpression,
            "mdxjsEsm" => Self::MdxjsEsm,
            _ => Self::Other(kind),
        }
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Other(kind) => kind,
            known => known.as_str().to_string(),
        }
    }
}

/// A node in an mdast tree.
///
/// Only the fields restyle works with are typed. Everything else (`value`,
/// `depth`, `position`, `name`, ...) is kept in `fields` and written back as-is.
/// `attributes` is only typed on JSX elements; on other kinds (directives use a
/// plain map) it stays in `fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNode")]
pub struct Node {
    #[serde(rename = "type")]
    pub kind: NodeKind,

    /// JSX attributes (element nodes only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<Attribute>>,

    /// Child nodes (parent nodes only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Node>>,

    /// Remaining fields
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// A node as read, before `attributes` is typed.
#[derive(Deserialize)]
struct RawNode {
    #[serde(rename = "type")]
    kind: NodeKind,

    #[serde(default)]
    attributes: Option<Value>,

    #[serde(default)]
    children: Option<Vec<Node>>,

    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl TryFrom<RawNode> for Node {
    type Error = serde_json::Error;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        let mut node = Node {
            kind: raw.kind,
            attributes: None,
            children: raw.children,
            fields: raw.fields,
        };

        match raw.attributes {
            Some(attributes) if node.is_element() && !attributes.is_null() => {
                node.attributes = Some(serde_json::from_value(attributes)?);
            }
            Some(attributes) => {
                node.fields.insert("attributes".to_string(), attributes);
            }
            None => {}
        }

        Ok(node)
    }
}

impl Node {
    /// Create a node of the given kind with no fields.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            attributes: None,
            children: None,
            fields: Map::new(),
        }
    }

    /// Create a document root.
    pub fn root(children: Vec<Node>) -> Self {
        Self {
            children: Some(children),
            ..Self::new(NodeKind::Root)
        }
    }

    /// Create a paragraph.
    pub fn paragraph(children: Vec<Node>) -> Self {
        Self {
            children: Some(children),
            ..Self::new(NodeKind::Paragraph)
        }
    }

    /// Create a text node.
    pub fn text(value: impl Into<String>) -> Self {
        let mut node = Self::new(NodeKind::Text);
        node.fields
            .insert("value".to_string(), Value::String(value.into()));
        node
    }

    /// Create a block-level JSX element.
    pub fn flow_element(name: &str, attributes: Vec<Attribute>, children: Vec<Node>) -> Self {
        Self::element(NodeKind::MdxJsxFlowElement, name, attributes, children)
    }

    /// Create an inline JSX element.
    pub fn text_element(name: &str, attributes: Vec<Attribute>, children: Vec<Node>) -> Self {
        Self::element(NodeKind::MdxJsxTextElement, name, attributes, children)
    }

    fn element(kind: NodeKind, name: &str, attributes: Vec<Attribute>, children: Vec<Node>) -> Self {
        let mut node = Self {
            attributes: Some(attributes),
            children: Some(children),
            ..Self::new(kind)
        };
        node.fields
            .insert("name".to_string(), Value::String(name.to_string()));
        node
    }

    /// Check if this is a JSX element (flow or text).
    pub fn is_element(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::MdxJsxFlowElement | NodeKind::MdxJsxTextElement
        )
    }

    /// Element name. `None` for fragments and non-element nodes.
    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }
}

/// A JSX attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Attribute {
    /// `name="value"`, `name={expr}` or bare `name`
    MdxJsxAttribute(JsxAttribute),
    /// Spread: `{...props}`
    MdxJsxExpressionAttribute(ExpressionAttribute),
}

impl Attribute {
    /// Create a string-valued attribute.
    pub fn literal(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::MdxJsxAttribute(JsxAttribute {
            name: name.into(),
            value: Some(AttributeValue::Literal(value.into())),
            fields: Map::new(),
        })
    }

    /// Create an expression-valued attribute.
    pub fn expression(name: impl Into<String>, value: ValueExpression) -> Self {
        Self::MdxJsxAttribute(JsxAttribute {
            name: name.into(),
            value: Some(AttributeValue::Expression(value)),
            fields: Map::new(),
        })
    }

    /// Attribute name. Spread attributes have none.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::MdxJsxAttribute(attr) => Some(&attr.name),
            Self::MdxJsxExpressionAttribute(_) => None,
        }
    }

    /// Get the value if this is a string-valued attribute.
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::MdxJsxAttribute(JsxAttribute {
                value: Some(AttributeValue::Literal(value)),
                ..
            }) => Some(value),
            _ => None,
        }
    }

    /// Get the value if this is an expression-valued attribute.
    pub fn as_expression(&self) -> Option<&ValueExpression> {
        match self {
            Self::MdxJsxAttribute(JsxAttribute {
                value: Some(AttributeValue::Expression(value)),
                ..
            }) => Some(value),
            _ => None,
        }
    }
}

/// A named JSX attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsxAttribute {
    pub name: String,

    /// `None` for boolean attributes
    #[serde(default)]
    pub value: Option<AttributeValue>,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// A spread attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionAttribute {
    pub value: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ExpressionData>,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Value of a named attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Plain string: `style="color: red"`
    Literal(String),
    /// Embedded expression: `style={{color: "red"}}`
    Expression(ValueExpression),
}

/// An `mdxJsxAttributeValueExpression`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueExpression {
    #[serde(rename = "type")]
    kind: ValueExpressionType,

    /// Source text of the expression
    pub value: String,

    /// Compiler payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ExpressionData>,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum ValueExpressionType {
    #[serde(rename = "mdxJsxAttributeValueExpression")]
    AttributeValueExpression,
}

impl ValueExpression {
    /// Create an expression from its source text and ESTree payload.
    pub fn new(value: impl Into<String>, estree: impl Into<Estree>) -> Self {
        Self {
            kind: ValueExpressionType::AttributeValueExpression,
            value: value.into(),
            data: Some(ExpressionData {
                estree: Some(estree.into()),
                fields: Map::new(),
            }),
            fields: Map::new(),
        }
    }

    /// The ESTree payload, if any.
    pub fn estree(&self) -> Option<&Estree> {
        self.data.as_ref().and_then(|data| data.estree.as_ref())
    }
}

/// The `data` field of an expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estree: Option<Estree>,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Errors that can occur when reading or writing a tree.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    #[error("Invalid tree JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Failed to serialize tree: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Parse an mdast tree from JSON.
pub fn parse_tree(source: &str) -> Result<Node, TreeError> {
    serde_json::from_str(source).map_err(TreeError::Parse)
}

/// Serialize an mdast tree to JSON.
pub fn to_json(tree: &Node, pretty: bool) -> Result<String, TreeError> {
    let json = if pretty {
        serde_json::to_string_pretty(tree)
    } else {
        serde_json::to_string(tree)
    };
    json.map_err(TreeError::Serialize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn parses_jsx_element() {
        let source = r#"{
            "type": "root",
            "children": [{
                "type": "mdxJsxFlowElement",
                "name": "Box",
                "attributes": [
                    { "type": "mdxJsxAttribute", "name": "style", "value": "color: red" },
                    { "type": "mdxJsxAttribute", "name": "hidden", "value": null },
                    { "type": "mdxJsxExpressionAttribute", "value": "...props" }
                ],
                "children": []
            }]
        }"#;

        let tree = parse_tree(source).unwrap();
        assert_eq!(tree.kind, NodeKind::Root);

        let element = &tree.children.as_ref().unwrap()[0];
        assert!(element.is_element());
        assert_eq!(element.name(), Some("Box"));

        let attributes = element.attributes.as_ref().unwrap();
        assert_eq!(attributes.len(), 3);
        assert_eq!(attributes[0].name(), Some("style"));
        assert_eq!(attributes[0].as_literal(), Some("color: red"));
        assert_eq!(attributes[1].name(), Some("hidden"));
        assert_eq!(attributes[1].as_literal(), None);
        assert_eq!(attributes[2].name(), None);
    }

    #[test]
    fn parses_expression_value() {
        let source = r#"{
            "type": "mdxJsxAttribute",
            "name": "style",
            "value": {
                "type": "mdxJsxAttributeValueExpression",
                "value": "styles.box",
                "data": { "estree": { "type": "Program", "sourceType": "module", "body": [] } }
            }
        }"#;

        let attribute: Attribute = serde_json::from_str(source).unwrap();
        let expression = attribute.as_expression().unwrap();

        assert_eq!(expression.value, "styles.box");
        assert!(matches!(expression.estree(), Some(Estree::Raw(_))));
    }

    #[test]
    fn preserves_unknown_nodes_and_fields() {
        let value = json!({
            "type": "root",
            "children": [
                {
                    "type": "code",
                    "lang": "tsx",
                    "value": "<Box />",
                    "position": { "start": { "line": 1, "column": 1, "offset": 0 } }
                },
                {
                    "type": "mdxJsxFlowElement",
                    "name": null,
                    "attributes": [],
                    "children": []
                }
            ]
        });

        let tree = parse_tree(&value.to_string()).unwrap();
        let children = tree.children.as_ref().unwrap();
        assert_eq!(children[0].kind, NodeKind::Other("code".to_string()));
        assert_eq!(children[1].name(), None);

        let written: Value = serde_json::from_str(&to_json(&tree, false).unwrap()).unwrap();
        assert_eq!(written, value);
    }

    #[test]
    fn keeps_foreign_attributes_verbatim() {
        let shapes = [
            json!([{ "name": "style", "value": "color: red" }]),
            json!({ "style": "color: red", "id": "tip" }),
            json!([{ "type": "customAttr", "name": "style" }]),
        ];

        for attributes in shapes {
            let value = json!({
                "type": "root",
                "children": [{
                    "type": "leafDirective",
                    "name": "note",
                    "attributes": attributes.clone(),
                    "children": []
                }]
            });

            let tree = parse_tree(&value.to_string()).unwrap();
            let directive = &tree.children.as_ref().unwrap()[0];
            assert!(directive.attributes.is_none());
            assert_eq!(directive.fields.get("attributes"), Some(&attributes));

            let written: Value = serde_json::from_str(&to_json(&tree, false).unwrap()).unwrap();
            assert_eq!(written, value);
        }
    }

    #[test]
    fn rejects_malformed_jsx_attributes() {
        let source = r#"{
            "type": "mdxJsxFlowElement",
            "name": "Box",
            "attributes": { "style": "color: red" },
            "children": []
        }"#;

        assert!(matches!(parse_tree(source), Err(TreeError::Parse(_))));
    }

    #[test]
    fn node_kind_round_trips() {
        for kind in ["root", "mdxJsxFlowElement", "mdxJsxTextElement", "thematicBreak"] {
            assert_eq!(String::from(NodeKind::from(kind.to_string())), kind);
        }
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(matches!(parse_tree("{ not json"), Err(TreeError::Parse(_))));
    }
}
