// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Wall-clock port.

/// Source of event timestamps.
pub trait Clock {
    /// Current time as an ISO-8601 UTC string (`2024-05-01T12:00:00.000Z`).
    fn timestamp(&self) -> String;
}
