//! MCP over newline-delimited JSON-RPC 2.0 on stdin/stdout.

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::tools::ToolServer;

pub const PROTOCOL_VERSION: &str = "2024-11-05";

const PARSE_ERROR: i64 = -32700;
const METHOD_NOT_FOUND: i64 = -32601;
const INVALID_PARAMS: i64 = -32602;

fn rpc_result(id: Value, result: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": result
    })
}

fn rpc_error(id: Value, code: i64, message: impl Into<String>) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": {
            "code": code,
            "message": message.into()
        }
    })
}

/// Handle one JSON-RPC line. Returns `None` for notifications and blank lines.
pub async fn handle_message<S: ToolServer>(server: &S, line: &str) -> Option<Value> {
    if line.trim().is_empty() {
        return None;
    }

    let request: Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!("Parse error: {}", e);
            return Some(rpc_error(Value::Null, PARSE_ERROR, format!("Parse error: {}", e)));
        }
    };

    // Notifications carry no id and never get a reply
    let id = request.get("id").cloned()?;
    let method = match request.get("method").and_then(|v| v.as_str()) {
        Some(m) => m,
        None => return Some(rpc_error(id, METHOD_NOT_FOUND, "Missing method")),
    };

    tracing::debug!(method, "jsonrpc request");

    let response = match method {
        "initialize" => rpc_result(
            id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {"tools": {}},
                "serverInfo": server.server_info()
            }),
        ),

        "ping" => rpc_result(id, json!({})),

        "tools/list" => rpc_result(id, json!({ "tools": server.list_tools() })),

        "tools/call" => {
            let params = request.get("params").cloned().unwrap_or(json!({}));
            let tool_name = params
                .get("name")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown");
            let arguments = params.get("arguments").cloned().unwrap_or(json!({}));

            match server.call_tool(tool_name, arguments).await {
                Ok(text) => rpc_result(
                    id,
                    json!({
                        "content": [{
                            "type": "text",
                            "text": text
                        }],
                        "isError": false
                    }),
                ),
                Err(e) => {
                    tracing::warn!(tool = tool_name, "tool call rejected: {}", e);
                    rpc_error(id, INVALID_PARAMS, e.to_string())
                }
            }
        }

        _ => rpc_error(id, METHOD_NOT_FOUND, format!("Method not found: {}", method)),
    };

    Some(response)
}

/// Serve JSON-RPC over stdin/stdout until stdin closes
pub async fn serve_stdio<S: ToolServer>(server: S) -> anyhow::Result<()> {
    let info = server.server_info();
    tracing::info!("✓ {} v{} serving MCP over stdio", info.name, info.version);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if let Some(response) = handle_message(&server, &line).await {
            let mut out = response.to_string();
            out.push('\n');
            stdout.write_all(out.as_bytes()).await?;
            stdout.flush().await?;
        }
    }

    tracing::info!("stdin closed, shutting down");
    Ok(())
}
