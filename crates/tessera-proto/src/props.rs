// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Semantic attributes of a node and their defensive accessors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Highest heading level a title may request.
const MAX_HEADING_LEVEL: u8 = 6;

/// Type-specific attributes of a [`crate::ComponentNode`].
///
/// Values stay untyped JSON; accessors interpret them per attribute and fall
/// back to defaults instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Props(Map<String, Value>);

impl Props {
    /// Empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value for `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Set `key`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no attributes are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Display text of `key`; `None` when missing or `null`.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key) {
            None | Some(Value::Null) => None,
            Some(value) => Some(display_text(value)),
        }
    }

    /// Display text of `key`, or `default` when the value is falsy
    /// (missing, `null`, `false`, `0` or the empty string).
    pub fn text_or(&self, key: &str, default: &str) -> String {
        match self.0.get(key) {
            Some(value) if is_truthy(value) => display_text(value),
            _ => default.to_owned(),
        }
    }

    /// Truthiness of `key`; missing means `false`.
    pub fn flag(&self, key: &str) -> bool {
        self.0.get(key).is_some_and(is_truthy)
    }

    /// The `class_name` override, if a non-empty one is set.
    pub fn class_name(&self) -> Option<&str> {
        self.0
            .get("class_name")
            .and_then(Value::as_str)
            .filter(|class| !class.is_empty())
    }

    /// Heading level from `level`: default 1, clamped to `1..=6`.
    ///
    /// Numeric strings are accepted (`"2"`), fractions are truncated.
    pub fn level(&self) -> u8 {
        let requested = match self.0.get("level") {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match requested {
            Some(level) if level.is_finite() && level >= 1.0 => {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let level = level.min(f64::from(MAX_HEADING_LEVEL)) as u8;
                level
            }
            _ => 1,
        }
    }

    /// Options of a `select` node, in declared order.
    pub fn options(&self) -> Vec<SelectOption> {
        match self.0.get("options") {
            Some(Value::Array(items)) => items.iter().map(SelectOption::from_value).collect(),
            _ => Vec::new(),
        }
    }

    /// Declared table columns; `Some` for any list, even an empty one.
    pub fn columns(&self) -> Option<Vec<String>> {
        match self.0.get("columns") {
            Some(Value::Array(items)) => Some(items.iter().map(display_text).collect()),
            _ => None,
        }
    }

    /// Table data rows from `data`, in order. Rows that are not objects are
    /// kept as empty rows so row parity is preserved.
    pub fn rows(&self) -> Vec<TableRow<'_>> {
        match self.0.get("data") {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| TableRow(item.as_object()))
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl From<Map<String, Value>> for Props {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// One option of a `select` node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Submitted value.
    pub value: String,
    /// Visible label.
    pub label: String,
}

impl SelectOption {
    /// Interpret a plain scalar (value and label are the same text) or an
    /// object with `value` and `label` (label falls back to value).
    pub fn from_value(raw: &Value) -> Self {
        match raw {
            Value::Object(fields) => {
                let value = fields.get("value").map(display_text).unwrap_or_default();
                let label = match fields.get("label") {
                    Some(label) if is_truthy(label) => display_text(label),
                    _ => value.clone(),
                };
                Self { value, label }
            }
            scalar => {
                let text = display_text(scalar);
                Self {
                    value: text.clone(),
                    label: text,
                }
            }
        }
    }
}

/// A borrowed table data row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableRow<'a>(Option<&'a Map<String, Value>>);

impl<'a> TableRow<'a> {
    /// Cell text for `column`; empty when the key is missing or `null`.
    pub fn cell(&self, column: &str) -> String {
        self.0
            .and_then(|row| row.get(column))
            .map(display_text)
            .unwrap_or_default()
    }

    /// The row's own keys, in the order the server sent them.
    pub fn keys(&self) -> Vec<&'a str> {
        self.0
            .map(|row| row.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

/// Text shown for a JSON value: strings verbatim, `null` empty, other
/// scalars and composites as compact JSON.
pub fn display_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Loose truthiness used for optional attributes: `null`, `false`, `0` and
/// the empty string are falsy; everything else is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
