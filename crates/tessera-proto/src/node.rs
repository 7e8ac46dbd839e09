// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! A single declarative UI description unit.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::{display_text, json_kind, lenient, ComponentKind, Props};

/// Interaction event name → opaque server handler id.
///
/// A missing entry means the element is inert for that event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Handlers(BTreeMap<String, String>);

impl Handlers {
    /// Handler id bound to `click`, if any.
    pub fn click(&self) -> Option<&str> {
        self.get("click")
    }

    /// Handler id bound to `event`.
    pub fn get(&self, event: &str) -> Option<&str> {
        self.0.get(event).map(String::as_str)
    }

    /// Bind `event` to `handler_id`.
    pub fn insert(&mut self, event: impl Into<String>, handler_id: impl Into<String>) {
        self.0.insert(event.into(), handler_id.into());
    }

    /// True when no event is bound.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for Handlers {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Null-valued bindings are dropped; non-string ids keep their JSON
        // text; anything other than a map binds nothing.
        let bindings = match Value::deserialize(deserializer)? {
            Value::Object(raw) => raw
                .into_iter()
                .filter(|(_, id)| !id.is_null())
                .map(|(event, id)| (event, display_text(&id)))
                .collect(),
            _ => BTreeMap::new(),
        };
        Ok(Self(bindings))
    }
}

/// One node of a [`crate::ComponentTree`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentNode {
    /// Element identity, unique across the whole displayed tree.
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    /// Rendering behavior (wire field `type`).
    #[serde(rename = "type", default = "missing_kind")]
    pub kind: ComponentKind,
    /// Type-specific attributes.
    #[serde(default, deserialize_with = "lenient")]
    pub props: Props,
    /// Declared interaction handlers.
    #[serde(default, skip_serializing_if = "Handlers::is_empty")]
    pub handlers: Handlers,
    /// Ordered children; only rendered for containers.
    #[serde(default, deserialize_with = "lenient_nodes", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ComponentNode>,
}

impl ComponentNode {
    /// Node with no props, handlers or children.
    pub fn new(id: impl Into<String>, kind: ComponentKind) -> Self {
        Self {
            id: id.into(),
            kind,
            props: Props::new(),
            handlers: Handlers::default(),
            children: Vec::new(),
        }
    }

    /// Builder: set one prop.
    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key, value);
        self
    }

    /// Builder: bind an event to a server handler id.
    pub fn with_handler(mut self, event: impl Into<String>, handler_id: impl Into<String>) -> Self {
        self.handlers.insert(event, handler_id);
        self
    }

    /// Builder: append a child.
    pub fn with_child(mut self, child: ComponentNode) -> Self {
        self.children.push(child);
        self
    }

    /// Builder: append several children.
    pub fn with_children(mut self, children: impl IntoIterator<Item = ComponentNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// True for a button that declares a `click` handler.
    pub fn is_interactive(&self) -> bool {
        self.kind == ComponentKind::Button && self.handlers.click().is_some()
    }

    /// Children the renderer actually descends into.
    pub fn rendered_children(&self) -> &[ComponentNode] {
        if self.kind == ComponentKind::Container {
            &self.children
        } else {
            &[]
        }
    }
}

/// Decode one entry of a node list. Entries that are not node objects
/// become an `Unknown` placeholder named after their JSON type.
pub(crate) fn decode_node(raw: Value) -> ComponentNode {
    let kind = json_kind(&raw);
    let id = raw.get("id").map(display_text).unwrap_or_default();
    serde_json::from_value(raw).unwrap_or_else(|err| {
        warn!(element_id = %id, found = kind, %err, "malformed component node");
        ComponentNode::new(id, ComponentKind::Unknown(kind.to_owned()))
    })
}

/// Decode a node list entry by entry; `null` or a non-list is empty.
pub(crate) fn lenient_nodes<'de, D>(deserializer: D) -> Result<Vec<ComponentNode>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().map(decode_node).collect(),
        Value::Null => Vec::new(),
        other => {
            warn!(found = json_kind(&other), "children is not a list");
            Vec::new()
        }
    })
}

fn missing_kind() -> ComponentKind {
    ComponentKind::Unknown(String::new())
}

fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(display_text(&Value::deserialize(deserializer)?))
}
