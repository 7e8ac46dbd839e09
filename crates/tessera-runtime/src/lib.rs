// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! App controller of the tessera browser runtime.
//!
//! [`AppController`] is the sole owner of the displayed tree and the handler
//! registry. It boots against the host page, fetches the initial tree,
//! renders through a [`Renderer`](tessera_render::Renderer) and turns user
//! interactions into exactly one server round trip each:
//!
//! ```text
//! Booting ─▶ Rendering(Initial) ─▶ Rendered ─▶ Rendering(Event) ─▶ Rendered …
//!    └──(content host missing)──▶ Halted
//! ```
//!
//! Everything runs on one cooperative thread. The only suspension points are
//! the awaits on the transport; state is never borrowed across them.

mod controller;
mod diagnostics;
mod error;
pub mod host;
mod phase;
mod snapshot;

pub use controller::{AppController, UNEXPECTED_ERROR};
pub use error::BootError;
pub use phase::{Phase, RenderTrigger};
pub use snapshot::{DebugSnapshot, EpochSnapshot};
