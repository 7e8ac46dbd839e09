// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Wall clock backed by `Date`.

use tessera_port::Clock;

/// [`Clock`] reading the browser's `Date`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebClock;

impl Clock for WebClock {
    fn timestamp(&self) -> String {
        String::from(js_sys::Date::new_0().to_iso_string())
    }
}
