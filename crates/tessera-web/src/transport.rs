// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! HTTP transport over `fetch`.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use tessera_app_core::prefs::ClientPrefs;
use tessera_port::{Transport, TransportError};
use tessera_proto::wire::{EventRequest, EventResponse, RenderResponse};
use tessera_proto::ComponentTree;
use tracing::debug;

/// [`Transport`] posting JSON with gloo-net.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpTransport {
    render_url: String,
    event_url: String,
}

impl HttpTransport {
    /// Transport for explicit operation URLs.
    pub fn new(render_url: impl Into<String>, event_url: impl Into<String>) -> Self {
        Self {
            render_url: render_url.into(),
            event_url: event_url.into(),
        }
    }

    /// Transport for the URLs configured in `prefs`.
    pub fn from_prefs(prefs: &ClientPrefs) -> Self {
        Self::new(prefs.render_url(), prefs.event_url())
    }

    /// URL of the tree fetch operation.
    pub fn render_url(&self) -> &str {
        &self.render_url
    }

    /// URL of the event operation.
    pub fn event_url(&self) -> &str {
        &self.event_url
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, TransportError> {
    if !response.ok() {
        return Err(TransportError::Status {
            code: response.status(),
            text: response.status_text(),
        });
    }
    response
        .json::<T>()
        .await
        .map_err(|err| TransportError::Decode(err.to_string()))
}

impl Transport for HttpTransport {
    async fn fetch_tree(&self) -> Result<ComponentTree, TransportError> {
        debug!(url = %self.render_url, "POST render");
        let response = Request::post(&self.render_url)
            .header("content-type", "application/json")
            .send()
            .await
            .map_err(|err| TransportError::Network(err.to_string()))?;
        let body: RenderResponse = decode(response).await?;
        Ok(body.component_tree)
    }

    async fn send_event(&self, request: &EventRequest) -> Result<EventResponse, TransportError> {
        debug!(url = %self.event_url, element_id = %request.element_id, "POST event");
        let response = Request::post(&self.event_url)
            .header("content-type", "application/json")
            .json(request)
            .map_err(|err| TransportError::Network(err.to_string()))?
            .send()
            .await
            .map_err(|err| TransportError::Network(err.to_string()))?;
        decode(response).await
    }
}
