//! Style parsing command.

use anyhow::Result;
use restyle_transform::{parse_style, style_expression};
use serde_json::json;

/// Run the parse command.
pub fn run(style: &str) -> Result<()> {
    let declaration = parse_style(style);
    let expression = style_expression(&declaration);

    let report = json!({
        "style": declaration,
        "expression": expression,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
