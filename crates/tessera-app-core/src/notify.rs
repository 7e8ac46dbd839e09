// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Bounded notification queue with TTL + dedupe.

use std::collections::VecDeque;
use std::time::Duration;

use serde::Serialize;
use web_time::Instant;

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational note.
    Info,
    /// Something failed but the UI is still usable.
    Warn,
    /// Error requiring user awareness.
    Error,
}

impl Severity {
    /// Class list of a rendered notification of this severity.
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Info => "toast toast-info",
            Self::Warn => "toast toast-warn",
            Self::Error => "toast toast-error",
        }
    }
}

/// Identifier for a notification entry.
pub type NotificationId = u64;

#[derive(Debug, Clone)]
struct Entry {
    id: NotificationId,
    severity: Severity,
    title: String,
    body: Option<String>,
    ttl: Duration,
    created: Instant,
}

/// Rendering-friendly view of a notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    /// Stable identifier.
    pub id: NotificationId,
    /// Severity.
    pub severity: Severity,
    /// Short title line.
    pub title: String,
    /// Optional body text.
    pub body: Option<String>,
    /// 1.0 -> just created, 0.0 -> expired.
    pub progress: f32,
}

/// In-memory notification queue with TTL and dedupe window.
#[derive(Debug)]
pub struct NotificationService {
    queue: VecDeque<Entry>,
    max: usize,
    dedupe_window: Duration,
    next_id: NotificationId,
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new(5)
    }
}

impl NotificationService {
    /// Create a new queue holding at most `max` entries (at least one).
    pub fn new(max: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            max: max.max(1),
            dedupe_window: Duration::from_millis(500),
            next_id: 1,
        }
    }

    /// Push a notification, deduping identical entries pushed within the
    /// dedupe window (the existing one is refreshed instead). The oldest
    /// entry is evicted when the queue is full.
    pub fn push<S, B>(
        &mut self,
        severity: Severity,
        title: S,
        body: B,
        ttl: Duration,
        now: Instant,
    ) -> NotificationId
    where
        S: Into<String>,
        B: Into<Option<String>>,
    {
        let title = title.into();
        let body = body.into();

        if let Some(existing) = self.queue.iter_mut().find(|n| {
            n.severity == severity
                && n.title == title
                && n.body == body
                && now.saturating_duration_since(n.created) <= self.dedupe_window
        }) {
            existing.created = now;
            existing.ttl = ttl;
            return existing.id;
        }

        let id = self.next_id;
        self.next_id += 1;
        if self.queue.len() >= self.max {
            self.queue.pop_front();
        }
        self.queue.push_back(Entry {
            id,
            severity,
            title,
            body,
            ttl,
            created: now,
        });
        id
    }

    /// Drop expired entries.
    pub fn retain_visible(&mut self, now: Instant) {
        self.queue
            .retain(|n| now.saturating_duration_since(n.created) < n.ttl);
    }

    /// Render-ready notifications, oldest first.
    pub fn visible(&self, now: Instant) -> Vec<Notification> {
        self.queue
            .iter()
            .filter(|n| now.saturating_duration_since(n.created) < n.ttl)
            .map(|n| Notification {
                id: n.id,
                severity: n.severity,
                title: n.title.clone(),
                body: n.body.clone(),
                progress: 1.0
                    - (now.saturating_duration_since(n.created).as_secs_f32()
                        / n.ttl.as_secs_f32()),
            })
            .collect()
    }

    /// Title of the newest entry still visible.
    pub fn latest_title(&self, now: Instant) -> Option<&str> {
        self.queue
            .iter()
            .rev()
            .find(|n| now.saturating_duration_since(n.created) < n.ttl)
            .map(|n| n.title.as_str())
    }

    /// Number of stored entries, expired or not.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
