// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Server transport port.

use std::future::Future;

use tessera_proto::wire::{EventRequest, EventResponse};
use tessera_proto::ComponentTree;
use thiserror::Error;

/// Why a round trip to the server failed.
///
/// Every variant is recoverable: the displayed UI is kept and the failure is
/// surfaced through the error banner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    /// The server answered outside the 2xx range.
    #[error("HTTP error! status: {code} {text}")]
    Status {
        /// HTTP status code.
        code: u16,
        /// Reason phrase, possibly empty.
        text: String,
    },
    /// The response body was not the expected JSON.
    #[error("malformed response body: {0}")]
    Decode(String),
}

/// The two request/response operations against the server.
///
/// Futures are polled on the single UI thread and are not `Send`. Nothing
/// here retries or cancels: one call, one request, one outcome.
pub trait Transport {
    /// Fetch the full page tree.
    fn fetch_tree(&self) -> impl Future<Output = Result<ComponentTree, TransportError>>;

    /// Post one event and return the server's reply.
    fn send_event(
        &self,
        request: &EventRequest,
    ) -> impl Future<Output = Result<EventResponse, TransportError>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_names_the_code() {
        let err = TransportError::Status {
            code: 500,
            text: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "HTTP error! status: 500 Internal Server Error");
    }
}
