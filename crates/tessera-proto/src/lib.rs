// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Component tree model and wire schema for the tessera runtime.
//!
//! The server owns application state and describes the page as a
//! [`ComponentTree`]; the browser runtime materializes it and relays user
//! interactions back as [`wire::EventRequest`]s. This crate holds only data:
//! no rendering, no transport.
//!
//! # Leniency
//!
//! Server-supplied trees are decoded defensively. An unrecognized `type` tag
//! becomes [`ComponentKind::Unknown`]; `null` or a wrongly shaped value in
//! place of `props`, `handlers` or `children` decodes as empty; an entry
//! that is not a node object at all becomes an `Unknown` placeholder. One
//! malformed node never prevents the rest of a tree from loading.

mod event;
mod kind;
mod node;
mod props;
mod tree;
pub mod wire;

pub use event::{EventPayload, EventType, OutboundEvent};
pub use kind::ComponentKind;
pub use node::{ComponentNode, Handlers};
pub use props::{display_text, is_truthy, Props, SelectOption, TableRow};
pub use tree::ComponentTree;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

/// Decode an optional field where JSON `null` means "use the default".
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode a field that falls back to its default for `null` or for a
/// value of the wrong shape.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let raw = Value::deserialize(deserializer)?;
    if raw.is_null() {
        return Ok(T::default());
    }
    Ok(serde_json::from_value(raw).unwrap_or_else(|err| {
        debug!(%err, "ignoring malformed field");
        T::default()
    }))
}

/// JSON type name of `value`, for diagnostics and placeholders.
pub(crate) const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
