// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Routes: host page, wasm bundle, and the two JSON operations.

use std::path::Path;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tessera_proto::wire::{EventRequest, EventResponse, RenderResponse, EVENT_PATH, RENDER_PATH};
use tokio::sync::Mutex;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::demo::DemoApp;
use crate::page::host_page;

#[derive(Clone)]
pub(crate) struct AppState {
    demo: Arc<Mutex<DemoApp>>,
    page: Arc<str>,
}

impl AppState {
    pub(crate) fn new(title: &str) -> Self {
        Self {
            demo: Arc::new(Mutex::new(DemoApp::new(title))),
            page: Arc::from(host_page(title)),
        }
    }
}

pub(crate) fn router(state: AppState, pkg_dir: &Path) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route(RENDER_PATH, post(render))
        .route(EVENT_PATH, post(event))
        .nest_service("/pkg", ServeDir::new(pkg_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(state.page.to_string())
}

async fn health() -> &'static str {
    "ok"
}

async fn render(State(state): State<AppState>) -> Json<RenderResponse> {
    let tree = state.demo.lock().await.tree();
    Json(RenderResponse::success(tree))
}

async fn event(State(state): State<AppState>, body: Bytes) -> Response {
    let request: EventRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(err) => {
            warn!(%err, "malformed event body");
            let reply = EventResponse::handler_error(format!("malformed event body: {err}"), None);
            return (StatusCode::BAD_REQUEST, Json(reply)).into_response();
        }
    };
    let reply = state.demo.lock().await.handle(&request);
    Json(reply).into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        router(AppState::new("Demo"), Path::new("does-not-exist"))
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn content_of<'a>(tree: &'a Value, id: &str) -> Option<&'a Value> {
        let nodes = tree.as_array()?;
        nodes.iter().find_map(|node| {
            if node["id"] == id {
                Some(&node["props"]["content"])
            } else {
                content_of(&node["children"], id)
            }
        })
    }

    #[tokio::test]
    async fn health_is_ok() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn index_serves_host_page() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let page = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(page.contains(r#"id="app-content""#));
    }

    #[tokio::test]
    async fn render_returns_demo_tree() {
        let response = app()
            .oneshot(post_json(RENDER_PATH, &Value::Null))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "success");
        assert_eq!(content_of(&body["component_tree"], "count"), Some(&json!("Count: 0")));
    }

    #[tokio::test]
    async fn increment_click_changes_counter() {
        let app = app();
        let click = json!({
            "event_type": "click",
            "element_id": "inc",
            "handler_id": "h_inc",
            "timestamp": "2024-01-01T00:00:00.000Z"
        });
        let response = app.clone().oneshot(post_json(EVENT_PATH, &click)).await.unwrap();
        let body = json_body(response).await;
        assert_eq!(body["status"], "success");
        assert_eq!(content_of(&body["component_tree"], "count"), Some(&json!("Count: 1")));

        let response = app.oneshot(post_json(RENDER_PATH, &Value::Null)).await.unwrap();
        let body = json_body(response).await;
        assert_eq!(content_of(&body["component_tree"], "count"), Some(&json!("Count: 1")));
    }

    #[tokio::test]
    async fn unknown_handler_reports_error() {
        let click = json!({
            "event_type": "click",
            "element_id": "broken",
            "handler_id": "h_missing",
            "timestamp": "2024-01-01T00:00:00.000Z"
        });
        let response = app().oneshot(post_json(EVENT_PATH, &click)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["error"], "Handler h_missing not found");
    }

    #[tokio::test]
    async fn malformed_event_is_rejected() {
        let response = app()
            .oneshot(post_json(EVENT_PATH, &json!({"event_type": "click"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["status"], "error");
    }
}
