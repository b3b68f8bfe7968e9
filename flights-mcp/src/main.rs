/// Flights MCP Server - JSON-RPC (stdio) + HTTP API
///
/// Run with MCP:  ./flights-mcp (default)
/// Run with HTTP: FLIGHTS_MCP_MODE=http ./flights-mcp

use anyhow::Result;

use flights_mcp::{FlightsConfig, FlightsMcp, FlightsService};
use trip_protocol::{check_api_key, env_or, env_parse, init_tracing, serve_http, serve_stdio};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let config = FlightsConfig::from_env();
    for (name, value) in [
        ("AMADEUS_API_KEY", &config.amadeus_api_key),
        ("AMADEUS_API_SECRET", &config.amadeus_api_secret),
    ] {
        let status = check_api_key(value.as_deref());
        if status.is_valid() {
            tracing::info!("✓ {}: {}", name, status);
        } else {
            tracing::warn!("⚠ {}: {} (flight tools will return setup instructions)", name, status);
        }
    }
    tracing::info!("Amadeus endpoint: {}", config.amadeus_base_url);

    let server = FlightsMcp::new(FlightsService::from_config(&config)?);

    let mode = env_or("FLIGHTS_MCP_MODE", "stdio");
    match mode.as_str() {
        "http" => serve_http(server, env_parse("FLIGHTS_MCP_PORT", 3102u16)).await,
        _ => serve_stdio(server).await,
    }
}
