//! HTTP API for remote/network access to the same tools.

use std::sync::Arc;

use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

use crate::tools::{ToolCallError, ToolServer};

/// Standard Tool Response
#[derive(Debug, Serialize, Deserialize)]
pub struct ToolResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ToolResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: impl std::fmt::Display) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.to_string()),
        }
    }
}

async fn health<S: ToolServer>(State(server): State<Arc<S>>) -> Json<Value> {
    let info = server.server_info();
    Json(json!({
        "status": "ok",
        "service": info.name,
        "protocols": ["http", "jsonrpc-stdio"],
        "version": info.version
    }))
}

async fn list_tools<S: ToolServer>(State(server): State<Arc<S>>) -> Json<Value> {
    Json(json!({ "tools": server.list_tools() }))
}

async fn call_tool<S: ToolServer>(
    State(server): State<Arc<S>>,
    Path(name): Path<String>,
    arguments: Option<Json<Value>>,
) -> Response {
    tracing::info!(tool = %name, "→ HTTP tool call");

    // No body (or not JSON) means no arguments
    let arguments = arguments.map(|Json(v)| v).unwrap_or(Value::Null);

    match server.call_tool(&name, arguments).await {
        Ok(text) => (StatusCode::OK, Json(ToolResponse::ok(text))).into_response(),
        Err(e) => {
            let status = match e {
                ToolCallError::UnknownTool(_) => StatusCode::NOT_FOUND,
                ToolCallError::InvalidArguments(_) => StatusCode::BAD_REQUEST,
            };
            (status, Json(ToolResponse::<()>::err(e))).into_response()
        }
    }
}

/// Build the HTTP router for a tool server
pub fn router<S: ToolServer>(server: S) -> Router {
    Router::new()
        .route("/health", get(health::<S>))
        .route("/tools", get(list_tools::<S>))
        .route("/tools/:name", post(call_tool::<S>))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(server))
}

/// Start HTTP server
pub async fn serve_http<S: ToolServer>(server: S, port: u16) -> anyhow::Result<()> {
    let info = server.server_info();
    let tool_names: Vec<String> = server.list_tools().into_iter().map(|t| t.name).collect();
    let app = router(server);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    tracing::info!("✓ {} listening on http://0.0.0.0:{}", info.name, port);
    tracing::info!("  GET    /health");
    tracing::info!("  GET    /tools");
    for name in &tool_names {
        tracing::info!("  POST   /tools/{}", name);
    }

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::EchoServer;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = router(EchoServer).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_and_tools() {
        let (status, body) = send(Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "echo");

        let (status, body) = send(Request::get("/tools").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tools"][0]["name"], "echo");
    }

    #[tokio::test]
    async fn test_call_tool() {
        let (status, body) = send(post_json("/tools/echo", json!({"query": "capri"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], "echo: capri");
    }

    #[tokio::test]
    async fn test_call_tool_without_body() {
        let request = Request::post("/tools/status").body(Body::empty()).unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true, "data": "up", "error": null}));

        let request = Request::post("/tools/echo").body(Body::empty()).unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("missing field `query`"));
    }

    #[tokio::test]
    async fn test_call_tool_errors() {
        let (status, body) = send(post_json("/tools/missing", json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);

        let (status, body) = send(post_json("/tools/echo", json!({"q": 1}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid arguments"));
    }
}
