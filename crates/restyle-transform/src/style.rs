//! Inline style string parsing.
//!
//! Parses `style="color: red; font-size: 20px"` into an ordered mapping keyed by
//! the camel-cased property name, the shape JSX expects for `style={{...}}`.

use std::borrow::Cow;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::{Captures, Regex};
use serde::Serialize;

/// Declarations parsed from an inline style string.
///
/// Keys are unique and keep the position of their first occurrence; a repeated
/// property takes the value of its last occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StyleDeclaration(IndexMap<String, String>);

impl StyleDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, overwriting any previous value.
    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.0.insert(property.into(), value.into());
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.0.get(property).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(property, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Compact JSON object text, e.g. `{"color":"red"}`.
    pub fn to_json_text(&self) -> String {
        serde_json::to_string(&self.0).expect("String map serializes to JSON")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StyleDeclaration {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut declaration = Self::new();
        for (property, value) in iter {
            declaration.insert(property, value);
        }
        declaration
    }
}

/// Parse an inline style string.
///
/// Fragments without a `:` or with an empty property or value are dropped.
/// Never fails; malformed input yields a smaller mapping.
pub fn parse_style(source: &str) -> StyleDeclaration {
    source
        .split(';')
        .filter_map(|fragment| {
            let (property, value) = fragment.split_once(':')?;
            let (property, value) = (property.trim(), value.trim());
            if property.is_empty() || value.is_empty() {
                return None;
            }
            Some((camel_case(property).into_owned(), value))
        })
        .collect()
}

/// Convert a hyphenated property name to camel case.
///
/// Every `-` followed by a lowercase ASCII letter is removed and the letter
/// upper-cased. Other hyphens are left in place, so `-webkit-box` becomes
/// `WebkitBox` and `--brand` becomes `-Brand`.
pub fn camel_case(property: &str) -> Cow<'_, str> {
    static RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"-([a-z])").expect("Invalid camel case regex"));

    RE.replace_all(property, |caps: &Captures| caps[1].to_ascii_uppercase())
}
