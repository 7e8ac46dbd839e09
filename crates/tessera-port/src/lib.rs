// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Ports between the tessera core and its host.
//!
//! The core never touches a browser API directly. It builds elements through a
//! [`DomPort`], talks to the server through a [`Transport`] and stamps events
//! with a [`Clock`]. The wasm adapters live in `tessera-web`; in-memory fakes
//! for tests live in `tessera-dry-tests`.

mod clock;
mod dom;
mod transport;

pub use clock::Clock;
pub use dom::{Captured, DomError, DomPort, Listen, Listener, Property};
pub use transport::{Transport, TransportError};
