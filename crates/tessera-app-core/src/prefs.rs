// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Saved client preferences (endpoints, stale-response policy, notifications).

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Config key the client preferences are stored under.
pub const CLIENT_PREFS_KEY: &str = "tessera.client";

/// What to do with an event response that carries a tree older than the one
/// already displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StalePolicy {
    /// Drop it; the newest issued request owns the display.
    #[default]
    Discard,
    /// Apply every tree as it arrives (last response wins).
    LastArrivalWins,
}

/// Client preferences. Every field is optional in storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientPrefs {
    /// Origin prefix for both endpoints; empty means same origin.
    pub base_url: String,
    /// Path of the tree fetch operation.
    pub render_path: String,
    /// Path of the event operation.
    pub event_path: String,
    /// Handling of out-of-order event responses.
    pub stale_responses: StalePolicy,
    /// How long a notification stays visible.
    pub notification_ttl_ms: u64,
    /// Maximum notifications kept at once.
    pub max_notifications: usize,
    /// `tracing` level for the browser console (`error`..`trace`).
    pub log_level: String,
}

impl Default for ClientPrefs {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            render_path: "/api/render".to_owned(),
            event_path: "/hcc".to_owned(),
            stale_responses: StalePolicy::Discard,
            notification_ttl_ms: 4_000,
            max_notifications: 5,
            log_level: "info".to_owned(),
        }
    }
}

impl ClientPrefs {
    /// Full URL of the tree fetch operation.
    pub fn render_url(&self) -> String {
        join(&self.base_url, &self.render_path)
    }

    /// Full URL of the event operation.
    pub fn event_url(&self) -> String {
        join(&self.base_url, &self.event_path)
    }

    /// Notification lifetime.
    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }
}

fn join(base: &str, path: &str) -> String {
    match (base.strip_suffix('/'), path.strip_prefix('/')) {
        (Some(base), Some(path)) => format!("{base}/{path}"),
        (None, None) if !base.is_empty() && !path.is_empty() => format!("{base}/{path}"),
        _ => format!("{base}{path}"),
    }
}
