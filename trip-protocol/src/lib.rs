/// Shared protocol pieces for the trip planning tool servers
///
/// Both servers expose the same surface:
/// - JSON-RPC 2.0 over stdin/stdout (MCP)
/// - HTTP endpoints (`/health`, `/tools`, `/tools/:name`)
///
/// This crate holds the envelope types and transports so the servers only
/// have to implement [`ToolServer`].

pub mod http;
pub mod jsonrpc;
pub mod keys;
pub mod logging;
pub mod tools;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use http::{router, serve_http, ToolResponse};
pub use jsonrpc::{handle_message, serve_stdio, PROTOCOL_VERSION};
pub use keys::{check_api_key, mask_key, KeyStatus};
pub use logging::init_tracing;
pub use tools::{parse_arguments, tool_definition, ServerInfo, ToolCallError, ToolDefinition, ToolServer};

/// Read an optional environment variable, treating blank values as unset
pub fn env_opt(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read an environment variable with a fallback default
pub fn env_or(name: &str, default: &str) -> String {
    env_opt(name).unwrap_or_else(|| default.to_string())
}

/// Read a numeric environment variable, falling back on parse errors
pub fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    env_opt(name)
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
