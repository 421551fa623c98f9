//! ESTree expression payloads.
//!
//! Only the subset needed to describe an object literal of string properties is
//! modelled. Payloads read from an existing tree are kept as raw JSON so that
//! nodes outside this subset survive a round trip.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// An ESTree `Program` node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    #[serde(rename = "type")]
    kind: ProgramType,

    /// Module or script goal
    #[serde(rename = "sourceType")]
    pub source_type: SourceType,

    /// Top-level statements
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum ProgramType {
    Program,
}

impl Program {
    /// Create a module program from its statements.
    pub fn module(body: Vec<Statement>) -> Self {
        Self {
            kind: ProgramType::Program,
            source_type: SourceType::Module,
            body,
        }
    }
}

/// Parse goal of a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    #[default]
    Module,
}

/// A statement in a program body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Statement {
    ExpressionStatement { expression: Expression },
}

impl Statement {
    /// Wrap an expression in an expression statement.
    pub fn expression(expression: Expression) -> Self {
        Self::ExpressionStatement { expression }
    }
}

/// An expression node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Expression {
    /// Object literal: `{ a: "b" }`
    ObjectExpression { properties: Vec<Property> },
    /// Identifier reference or property key
    Identifier { name: String },
    /// String literal
    Literal { value: String },
}

impl Expression {
    pub fn object(properties: Vec<Property>) -> Self {
        Self::ObjectExpression { properties }
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        Self::Identifier { name: name.into() }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal {
            value: value.into(),
        }
    }
}

/// A property of an object expression.
///
/// Field order matches the ESTree layout expected by MDX compilers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    #[serde(rename = "type")]
    kind_tag: PropertyType,
    pub method: bool,
    pub shorthand: bool,
    pub computed: bool,
    pub kind: PropertyKind,
    pub key: Expression,
    pub value: Expression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum PropertyType {
    Property,
}

impl Property {
    /// A plain `key: value` property with an identifier key.
    pub fn init(key: impl Into<String>, value: Expression) -> Self {
        Self {
            kind_tag: PropertyType::Property,
            method: false,
            shorthand: false,
            computed: false,
            kind: PropertyKind::Init,
            key: Expression::identifier(key),
            value,
        }
    }
}

/// Property kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    Init,
}

/// The `estree` field of an expression's `data`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Estree {
    /// A program built by restyle
    Program(Program),
    /// A payload read from an existing tree, kept verbatim
    Raw(Value),
}

impl<'de> Deserialize<'de> for Estree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Estree::Raw)
    }
}

impl Estree {
    /// Get the payload as a typed program, if it fits the modelled subset.
    pub fn to_program(&self) -> Option<Program> {
        match self {
            Estree::Program(program) => Some(program.clone()),
            Estree::Raw(value) => serde_json::from_value(value.clone()).ok(),
        }
    }
}

impl From<Program> for Estree {
    fn from(program: Program) -> Self {
        Estree::Program(program)
    }
}
