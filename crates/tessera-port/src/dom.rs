// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Native element host port.

use std::rc::Rc;

use thiserror::Error;

/// Failure reported by the element host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// The host refused to create an element.
    #[error("cannot create <{tag}>: {reason}")]
    Create {
        /// Requested tag name.
        tag: String,
        /// Host-provided reason.
        reason: String,
    },
    /// An operation on an existing element failed.
    #[error("{op} failed: {reason}")]
    Operation {
        /// Operation name (`append`, `set_attribute`, ...).
        op: &'static str,
        /// Host-provided reason.
        reason: String,
    },
    /// A listener could not be attached.
    #[error("cannot attach listener: {0}")]
    Listener(String),
}

impl DomError {
    /// Shorthand for [`DomError::Operation`].
    pub fn op(op: &'static str, reason: impl Into<String>) -> Self {
        Self::Operation {
            op,
            reason: reason.into(),
        }
    }
}

/// Live DOM property (as opposed to a markup attribute).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Property {
    /// Current `value` of an input or select.
    Value(String),
    /// `checked` state of a checkbox.
    Checked(bool),
    /// `selected` state of an option.
    Selected(bool),
}

/// Native signal a listener subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listen {
    /// Activation; the native default action is prevented first.
    Click,
    /// Every edit of a text input; reports [`Captured::Text`].
    Input,
    /// Committed change of a select; reports [`Captured::Text`].
    Change,
    /// Checkbox flip; reports [`Captured::Checked`].
    Toggle,
}

impl Listen {
    /// Name of the underlying DOM event.
    pub const fn event_name(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Input => "input",
            Self::Change | Self::Toggle => "change",
        }
    }
}

/// What the host read off the element when the signal fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Captured {
    /// The element was activated.
    Activated,
    /// Current text value.
    Text(String),
    /// Current checked state.
    Checked(bool),
}

/// Callback invoked on the UI thread when a signal fires.
pub type Listener = Rc<dyn Fn(Captured)>;

/// Element construction and lookup, implemented by the host.
///
/// All methods take `&self`; adapters use interior mutability. Text is always
/// set as plain text, never parsed as markup.
pub trait DomPort {
    /// Handle to a host element. Cloning yields another handle to the same
    /// element.
    type Element: Clone;

    /// Create a detached element.
    fn create(&self, tag: &str) -> Result<Self::Element, DomError>;

    /// Set a markup attribute.
    fn set_attribute(&self, element: &Self::Element, name: &str, value: &str)
        -> Result<(), DomError>;

    /// Set the element id.
    fn set_id(&self, element: &Self::Element, id: &str) -> Result<(), DomError> {
        self.set_attribute(element, "id", id)
    }

    /// Replace the class list.
    fn set_class(&self, element: &Self::Element, class: &str) -> Result<(), DomError> {
        self.set_attribute(element, "class", class)
    }

    /// Replace the element's content with plain text.
    fn set_text(&self, element: &Self::Element, text: &str) -> Result<(), DomError>;

    /// Set a live property.
    fn set_property(&self, element: &Self::Element, property: &Property) -> Result<(), DomError>;

    /// Append `child` as the last child of `parent`.
    fn append(&self, parent: &Self::Element, child: &Self::Element) -> Result<(), DomError>;

    /// Remove every child of `element`.
    fn clear_children(&self, element: &Self::Element) -> Result<(), DomError>;

    /// Look up an element of the host page by id.
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Show or hide an element via its inline display style.
    fn set_visible(&self, element: &Self::Element, visible: bool) -> Result<(), DomError>;

    /// Add one class token.
    fn add_class(&self, element: &Self::Element, class: &str) -> Result<(), DomError>;

    /// Remove one class token.
    fn remove_class(&self, element: &Self::Element, class: &str) -> Result<(), DomError>;

    /// Attach a listener that lives until the next [`DomPort::release_listeners`].
    fn listen(
        &self,
        element: &Self::Element,
        signal: Listen,
        listener: Listener,
    ) -> Result<(), DomError>;

    /// Attach a listener for the lifetime of the page (host-page chrome).
    fn listen_page(
        &self,
        element: &Self::Element,
        signal: Listen,
        listener: Listener,
    ) -> Result<(), DomError>;

    /// Drop every listener attached with [`DomPort::listen`].
    fn release_listeners(&self);
}
