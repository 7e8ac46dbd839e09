// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Element id → server handler id, scoped to one rendered tree.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

/// Click handlers of the currently displayed tree.
///
/// Rebuilt from scratch on every render; entries never outlive the tree that
/// produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HandlerRegistry(BTreeMap<String, String>);

impl HandlerRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every entry.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Record `element_id → handler_id`. A repeated element id overwrites the
    /// earlier entry (last wins); the replaced handler id is returned.
    pub fn register(
        &mut self,
        element_id: impl Into<String>,
        handler_id: impl Into<String>,
    ) -> Option<String> {
        let element_id = element_id.into();
        let handler_id = handler_id.into();
        let previous = self.0.insert(element_id.clone(), handler_id.clone());
        if let Some(previous) = &previous {
            warn!(
                element_id = %element_id,
                previous = %previous,
                handler_id = %handler_id,
                "duplicate element id; click handler overwritten"
            );
        }
        previous
    }

    /// Handler id registered for `element_id`.
    pub fn handler_for(&self, element_id: &str) -> Option<&str> {
        self.0.get(element_id).map(String::as_str)
    }

    /// Number of registered elements.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `(element_id, handler_id)` pairs, ordered by element id.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.0.iter().map(|(e, h)| (e.as_str(), h.as_str()))
    }

    /// Move every entry of `other` into `self` (last wins).
    pub fn absorb(&mut self, other: Self) {
        for (element_id, handler_id) in other.0 {
            self.register(element_id, handler_id);
        }
    }
}
