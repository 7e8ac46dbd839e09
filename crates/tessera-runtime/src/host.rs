// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Fixed element ids of the host page.
//!
//! The runtime reads and writes the host page only through these ids and
//! assumes nothing else about its structure.

/// Loading indicator, hidden after the first successful render.
pub const LOADING: &str = "loading";
/// Element the component tree is rendered into. Required.
pub const CONTENT_HOST: &str = "app-content";
/// Error banner, shown by removing [`HIDDEN_CLASS`].
pub const ERROR_DISPLAY: &str = "error-display";
/// Text slot of the error banner.
pub const ERROR_MESSAGE: &str = "error-message";
/// Button dismissing the error banner.
pub const CLOSE_ERROR: &str = "close-error";
/// Container notifications are rendered into.
pub const NOTIFICATION_CONTAINER: &str = "notification-container";
/// Assistive-technology announcement slot.
pub const LIVE_REGION: &str = "live-region";

/// Class that hides the error banner.
pub const HIDDEN_CLASS: &str = "hidden";
