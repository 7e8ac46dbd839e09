// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Serializable view of controller state for debugging.

use serde::Serialize;
use tessera_app_core::notify::Notification;
use tessera_proto::ComponentTree;
use tessera_render::{HandlerRegistry, NodeFailure};

use crate::Phase;

/// Event sequencing counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct EpochSnapshot {
    /// Epoch of the most recently issued event request.
    pub issued: u64,
    /// Epoch whose tree is on display (0 = the boot tree).
    pub applied: u64,
    /// Event requests still awaiting a response.
    pub in_flight: usize,
}

/// Point-in-time copy of everything the controller owns.
#[derive(Debug, Clone, Serialize)]
pub struct DebugSnapshot {
    /// Lifecycle state.
    pub phase: Phase,
    /// Tree on display.
    pub tree: ComponentTree,
    /// Click handlers of that tree.
    pub handlers: HandlerRegistry,
    /// Root nodes of that tree that failed to render.
    pub failures: Vec<NodeFailure>,
    /// Sequencing counters.
    pub epochs: EpochSnapshot,
    /// Last message shown in the error banner, if still shown.
    pub error: Option<String>,
    /// Notifications currently visible.
    pub notifications: Vec<Notification>,
}
