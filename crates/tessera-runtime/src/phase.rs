// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Controller lifecycle states.

use std::fmt;

use serde::Serialize;

/// What started a render cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderTrigger {
    /// The boot fetch.
    Initial,
    /// An event response carrying a tree.
    Event,
}

/// Lifecycle state of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Not started yet.
    #[default]
    Booting,
    /// Fetching and/or rebuilding.
    Rendering(RenderTrigger),
    /// Idle with a tree on display (possibly empty after a failed boot).
    Rendered,
    /// Startup aborted; terminal until page unload.
    Halted,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Booting => f.write_str("booting"),
            Self::Rendering(RenderTrigger::Initial) => f.write_str("rendering:initial"),
            Self::Rendering(RenderTrigger::Event) => f.write_str("rendering:event"),
            Self::Rendered => f.write_str("rendered"),
            Self::Halted => f.write_str("halted"),
        }
    }
}
