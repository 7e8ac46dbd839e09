// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Fixed timestamp source.

use tessera_port::Clock;

/// Timestamp used by [`FixedClock::default`].
pub const FIXED_TIMESTAMP: &str = "2024-01-01T00:00:00.000Z";

/// [`Clock`] that always reports the same instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedClock(pub String);

impl Default for FixedClock {
    fn default() -> Self {
        Self(FIXED_TIMESTAMP.to_owned())
    }
}

impl Clock for FixedClock {
    fn timestamp(&self) -> String {
        self.0.clone()
    }
}
