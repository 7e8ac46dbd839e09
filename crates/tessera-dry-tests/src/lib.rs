// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for tessera crates.
#![forbid(unsafe_code)]
//!
//! # Modules
//!
//! - [`clock`] - Fixed timestamp source
//! - [`config`] - In-memory config store fake for testing without localStorage
//! - [`dom`] - In-memory element host with event simulation
//! - [`fixtures`] - Component trees used across the test suites
//! - [`transport`] - Scripted server with deferred replies and request capture

pub mod clock;
pub mod config;
pub mod dom;
pub mod fixtures;
pub mod transport;

pub use clock::FixedClock;
pub use config::InMemoryConfigStore;
pub use dom::{MemDom, MemElement};
pub use fixtures::tree_from_json;
pub use transport::{Gate, ScriptedTransport};
