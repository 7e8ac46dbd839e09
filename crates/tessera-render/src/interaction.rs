// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! What a rendered element reports when the user touches it.

use std::rc::Rc;

use serde_json::Value;
use tessera_proto::{EventPayload, EventType, OutboundEvent};

/// New value of a value-bearing control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Text input or select value.
    Text(String),
    /// Checkbox state.
    Checked(bool),
}

impl From<FieldValue> for Value {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Text(text) => Value::String(text),
            FieldValue::Checked(checked) => Value::Bool(checked),
        }
    }
}

/// Why the interaction fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// A button with a registered click handler was activated.
    Click {
        /// Server handler id registered for the button.
        handler_id: String,
    },
    /// A value control changed; no handler id is involved.
    Value(FieldValue),
}

/// One user interaction with a rendered element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interaction {
    /// Id of the element.
    pub element_id: String,
    /// What happened.
    pub trigger: Trigger,
}

impl Interaction {
    /// Click on a button bound to `handler_id`.
    pub fn click(element_id: impl Into<String>, handler_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            trigger: Trigger::Click {
                handler_id: handler_id.into(),
            },
        }
    }

    /// Value change of a control.
    pub fn value(element_id: impl Into<String>, value: FieldValue) -> Self {
        Self {
            element_id: element_id.into(),
            trigger: Trigger::Value(value),
        }
    }

    /// True for button activations.
    pub const fn is_click(&self) -> bool {
        matches!(self.trigger, Trigger::Click { .. })
    }

    /// Stamp into the event sent to the server. Value changes always travel
    /// as `input`.
    pub fn into_outbound(self, timestamp: String) -> OutboundEvent {
        let (event_type, payload) = match self.trigger {
            Trigger::Click { handler_id } => (EventType::Click, EventPayload::Handler(handler_id)),
            Trigger::Value(value) => (EventType::Input, EventPayload::Value(value.into())),
        };
        OutboundEvent {
            element_id: self.element_id,
            event_type,
            payload,
            timestamp,
        }
    }
}

/// Where listeners deliver interactions.
pub type EventSink = Rc<dyn Fn(Interaction)>;
