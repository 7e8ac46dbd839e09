// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Fatal startup errors.

use thiserror::Error;

/// Startup failure. Fatal: no UI is shown and nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BootError {
    /// The element the tree renders into is not on the page.
    #[error("content host #{0} not found; startup aborted")]
    MissingContentHost(&'static str),
}
