// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Component type tags.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Rendering behavior selected by a node's wire `type` tag.
///
/// The set is closed for dispatch purposes; anything the runtime does not
/// know lands in [`ComponentKind::Unknown`] with the raw tag kept for
/// diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// Heading (`h1`..`h6`).
    Title,
    /// Plain-text paragraph.
    Text,
    /// Push button; interactive when it declares a `click` handler.
    Button,
    /// Grouping element; the only kind whose children are rendered.
    Container,
    /// Single-line text input.
    InputText,
    /// Drop-down list.
    Select,
    /// Labelled checkbox.
    Checkbox,
    /// Data table with optional declared columns.
    Table,
    /// Unrecognized tag, carried verbatim.
    Unknown(String),
}

impl ComponentKind {
    /// Map a wire tag onto a kind. Never fails.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "title" => Self::Title,
            "text" => Self::Text,
            "button" => Self::Button,
            "container" => Self::Container,
            "input_text" => Self::InputText,
            "select" => Self::Select,
            "checkbox" => Self::Checkbox,
            "table" => Self::Table,
            other => Self::Unknown(other.to_owned()),
        }
    }

    /// Wire tag for this kind.
    pub fn tag(&self) -> &str {
        match self {
            Self::Title => "title",
            Self::Text => "text",
            Self::Button => "button",
            Self::Container => "container",
            Self::InputText => "input_text",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
            Self::Table => "table",
            Self::Unknown(raw) => raw,
        }
    }

    /// Kinds that report their value on every change, with or without a
    /// declared handler.
    pub const fn is_value_control(&self) -> bool {
        matches!(self, Self::InputText | Self::Select | Self::Checkbox)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl Serialize for ComponentKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for ComponentKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Non-string tags are kept as their JSON text rather than rejected.
        Ok(match Value::deserialize(deserializer)? {
            Value::String(tag) => Self::from_tag(&tag),
            Value::Null => Self::Unknown(String::new()),
            other => Self::Unknown(other.to_string()),
        })
    }
}
