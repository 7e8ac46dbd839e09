// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! HTTP/JSON bodies exchanged with the server.
//!
//! Two operations, both `POST` with JSON:
//!
//! * [`RENDER_PATH`] — empty body → [`RenderResponse`].
//! * [`EVENT_PATH`] — [`EventRequest`] → [`EventResponse`]. A response
//!   without `component_tree` means "no UI change"; with one it always means
//!   "replace the entire UI".

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::{json_kind, null_as_default, ComponentTree, EventType};

/// Default path of the tree fetch operation.
pub const RENDER_PATH: &str = "/api/render";
/// Default path of the event operation.
pub const EVENT_PATH: &str = "/hcc";

/// Server-reported outcome.
///
/// A non-string `status` decodes as the default rather than failing the
/// whole reply.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(into = "String")]
pub enum ResponseStatus {
    /// `"success"`.
    #[default]
    Success,
    /// `"error"`: the server ran but the handler failed.
    Error,
    /// Anything else, verbatim.
    Other(String),
}

impl From<String> for ResponseStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "success" => Self::Success,
            "error" => Self::Error,
            _ => Self::Other(raw),
        }
    }
}

impl<'de> Deserialize<'de> for ResponseStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(raw) => Self::from(raw),
            other => {
                debug!(found = json_kind(&other), "status is not a string");
                Self::default()
            }
        })
    }
}

impl From<ResponseStatus> for String {
    fn from(status: ResponseStatus) -> Self {
        match status {
            ResponseStatus::Success => "success".to_owned(),
            ResponseStatus::Error => "error".to_owned(),
            ResponseStatus::Other(raw) => raw,
        }
    }
}

/// Body of a successful tree fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderResponse {
    /// Optional status; the client does not rely on it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ResponseStatus>,
    /// The page. Missing or `null` decodes as an empty tree.
    #[serde(default, deserialize_with = "null_as_default")]
    pub component_tree: ComponentTree,
}

impl RenderResponse {
    /// Successful response carrying `tree`.
    pub fn success(tree: ComponentTree) -> Self {
        Self {
            status: Some(ResponseStatus::Success),
            component_tree: tree,
        }
    }
}

/// Body posted to the event operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRequest {
    /// `click` or `input`.
    pub event_type: EventType,
    /// Element the user interacted with.
    pub element_id: String,
    /// Registered handler id (click events).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler_id: Option<String>,
    /// New control value (value-change events).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// ISO-8601 UTC timestamp of the interaction.
    #[serde(default)]
    pub timestamp: String,
}

/// Body returned by the event operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventResponse {
    /// Outcome of the server-side handler.
    #[serde(default)]
    pub status: ResponseStatus,
    /// Replacement page, if the UI must change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_tree: Option<ComponentTree>,
    /// Handler failure message (with `status: "error"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Whatever the handler returned, for diagnostics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler_result: Option<Value>,
}

impl EventResponse {
    /// Success, optionally replacing the UI.
    pub fn success(tree: Option<ComponentTree>) -> Self {
        Self {
            component_tree: tree,
            ..Self::default()
        }
    }

    /// Handler failure with a message, optionally replacing the UI.
    pub fn handler_error(message: impl Into<String>, tree: Option<ComponentTree>) -> Self {
        Self {
            status: ResponseStatus::Error,
            component_tree: tree,
            error: Some(message.into()),
            handler_result: None,
        }
    }

    /// The replacement tree, present only when the UI must change.
    pub fn replacement(&self) -> Option<&ComponentTree> {
        self.component_tree.as_ref()
    }

    /// True when the server reported a handler failure.
    pub fn is_handler_error(&self) -> bool {
        self.status == ResponseStatus::Error
    }
}
