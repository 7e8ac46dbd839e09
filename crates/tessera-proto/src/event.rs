// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! User interactions bound for the server.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::wire::EventRequest;

/// Wire `event_type` of an outbound event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Activation of an element with a registered handler.
    Click,
    /// New value of a value-bearing control.
    Input,
    /// Any event type this runtime does not originate.
    #[serde(other)]
    Other,
}

/// What an outbound event carries.
#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    /// Server handler id registered for the element.
    Handler(String),
    /// Raw control value (text or boolean).
    Value(Value),
}

/// One interaction, stamped and ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundEvent {
    /// Id of the element the user interacted with.
    pub element_id: String,
    /// Wire event type.
    pub event_type: EventType,
    /// Handler id or value.
    pub payload: EventPayload,
    /// ISO-8601 UTC time the interaction happened.
    pub timestamp: String,
}

impl From<OutboundEvent> for EventRequest {
    fn from(event: OutboundEvent) -> Self {
        let (handler_id, value) = match event.payload {
            EventPayload::Handler(id) => (Some(id), None),
            EventPayload::Value(value) => (None, Some(value)),
        };
        Self {
            event_type: event.event_type,
            element_id: event.element_id,
            handler_id,
            value,
            timestamp: event.timestamp,
        }
    }
}
