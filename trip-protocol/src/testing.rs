//! Test helpers shared by the tool server crates. Enabled with the `testing` feature.

use axum::Router;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::tools::{parse_arguments, tool_definition, ServerInfo, ToolCallError, ToolDefinition, ToolServer};

/// Serve `app` on an ephemeral port and return its base URL
pub async fn spawn_mock(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[derive(Deserialize, JsonSchema)]
struct EchoArgs {
    query: String,
}

#[derive(Deserialize, JsonSchema)]
struct NoArgs {}

/// Minimal tool server: `echo {query}` and an argument-less `status`
pub struct EchoServer;

impl ToolServer for EchoServer {
    fn server_info(&self) -> ServerInfo {
        ServerInfo::new("echo", "0.0.1")
    }

    fn list_tools(&self) -> Vec<ToolDefinition> {
        vec![
            tool_definition::<EchoArgs>("echo", "Echo the query back"),
            tool_definition::<NoArgs>("status", "Report that the server is up"),
        ]
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> Result<String, ToolCallError> {
        match name {
            "echo" => {
                let args: EchoArgs = parse_arguments(arguments)?;
                Ok(format!("echo: {}", args.query))
            }
            "status" => {
                let _: NoArgs = parse_arguments(arguments)?;
                Ok("up".to_string())
            }
            other => Err(ToolCallError::UnknownTool(other.to_string())),
        }
    }
}
