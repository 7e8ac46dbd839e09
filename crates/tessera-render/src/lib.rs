// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Materializes a [`ComponentTree`](tessera_proto::ComponentTree) through a
//! [`DomPort`](tessera_port::DomPort).
//!
//! Every render is a full rebuild: the host is emptied, previous listeners
//! are released and a fresh [`HandlerRegistry`] is built as a side effect of
//! rendering interactive nodes. Listeners never call back into controller
//! state directly; they hand an [`Interaction`] to an [`EventSink`].

mod element;
mod interaction;
mod registry;
mod renderer;

pub use element::{capitalize_first, render_node, RenderContext};
pub use interaction::{EventSink, FieldValue, Interaction, Trigger};
pub use registry::HandlerRegistry;
pub use renderer::{FullRebuild, NodeFailure, RenderError, RenderReport, Renderer};
