/// Research MCP Server - JSON-RPC (stdio) + HTTP API
///
/// Run with MCP:  ./research-mcp (default)
/// Run with HTTP: RESEARCH_MCP_MODE=http ./research-mcp

use anyhow::Result;

use research_mcp::{ResearchConfig, ResearchMcp, ResearchService};
use trip_protocol::{check_api_key, env_or, env_parse, init_tracing, serve_http, serve_stdio};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let config = ResearchConfig::from_env();
    for (name, value) in [
        ("OPENAI_API_KEY", &config.openai_api_key),
        ("SERPER_API_KEY", &config.serper_api_key),
        ("HYPERBROWSER_API_KEY", &config.hyperbrowser_api_key),
    ] {
        let status = check_api_key(value.as_deref());
        if status.is_valid() {
            tracing::info!("✓ {}: {}", name, status);
        } else {
            tracing::warn!("⚠ {}: {}", name, status);
        }
    }

    let server = ResearchMcp::new(ResearchService::from_config(&config)?);

    let mode = env_or("RESEARCH_MCP_MODE", "stdio");
    match mode.as_str() {
        "http" => serve_http(server, env_parse("RESEARCH_MCP_PORT", 3101u16)).await,
        _ => serve_stdio(server).await,
    }
}
