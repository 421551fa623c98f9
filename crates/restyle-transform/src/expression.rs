//! Embedded expression construction for parsed styles.

use restyle_mdx::{Expression, Program, Property, Statement, ValueExpression};

use crate::style::StyleDeclaration;

/// Build the object literal program for a declaration.
///
/// The program holds a single expression statement wrapping an object
/// expression with one `init` property per declaration, in order.
pub fn style_program(declaration: &StyleDeclaration) -> Program {
    let properties = declaration
        .iter()
        .map(|(property, value)| Property::init(property, Expression::string(value)))
        .collect();

    Program::module(vec![Statement::expression(Expression::object(properties))])
}

/// Build the attribute value expression replacing a style string.
///
/// The textual `value` and the ESTree payload describe the same mapping;
/// compilers read the payload and never re-parse the text.
pub fn style_expression(declaration: &StyleDeclaration) -> ValueExpression {
    ValueExpression::new(declaration.to_json_text(), style_program(declaration))
}
