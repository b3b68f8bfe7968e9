//! Individual environment checks. Each returns an [`Outcome`]; printing is left to `main`.

use std::path::Path;

use serde_json::{json, Value};

use flights_mcp::{AmadeusClient, FlightsConfig, FlightsMcp, FlightsService};
use research_mcp::{ChatMessage, OpenAiClient, ResearchConfig, ResearchMcp, ResearchService, SerperClient, SerperError};
use trip_protocol::ToolServer;

pub const ENV_TEMPLATE: &str = "# API Keys for the trip planning MCP servers
# Replace 'your_..._here' with your actual API keys

# OpenAI API Key (required for LLM operations)
# Get from: https://platform.openai.com/api-keys
OPENAI_API_KEY=your_openai_key_here

# Serper API Key (required for Google search)
# Get from: https://serper.dev/api-key
SERPER_API_KEY=your_serper_key_here

# Hyperbrowser API Key (required for browser automation)
# Get from: https://hyperbrowser.ai/
HYPERBROWSER_API_KEY=your_hyperbrowser_key_here

# Amadeus API credentials (optional, for flight search)
# Get from: https://developers.amadeus.com/
AMADEUS_API_KEY=your_amadeus_key_here
AMADEUS_API_SECRET=your_amadeus_secret_here
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pass(String),
    /// Counts as a pass, with a caveat
    Warn(String),
    Fail(String),
}

impl Outcome {
    pub fn passed(&self) -> bool {
        !matches!(self, Outcome::Fail(_))
    }
}

/// Write the template when `path` does not exist. Returns whether it already existed.
pub fn ensure_env_file(path: &Path) -> std::io::Result<bool> {
    if path.exists() {
        return Ok(true);
    }
    std::fs::write(path, ENV_TEMPLATE)?;
    Ok(false)
}

pub async fn check_openai(config: &ResearchConfig) -> Outcome {
    let client = match OpenAiClient::new(
        config.openai_base_url.clone(),
        config.openai_model.clone(),
        config.openai_api_key.clone(),
        config.http_timeout_secs,
    ) {
        Ok(client) => client,
        Err(e) => return Outcome::Fail(e.to_string()),
    };

    match client
        .chat(&[ChatMessage::user("Say 'API test successful' in exactly 3 words")])
        .await
    {
        Ok(reply) => Outcome::Pass(format!("Working! Response: {}", reply)),
        Err(e) => Outcome::Fail(e.to_string()),
    }
}

/// A healthy `/search` reply carries organic results or echoes the search parameters
pub fn is_search_response(body: &Value) -> bool {
    body.get("organic").is_some() || body.get("searchParameters").is_some()
}

pub async fn check_serper(config: &ResearchConfig) -> Outcome {
    let client = match SerperClient::new(config.serper_base_url.clone(), config.serper_api_key.clone(), 10) {
        Ok(client) => client,
        Err(e) => return Outcome::Fail(e.to_string()),
    };

    let web = client
        .request("search", &json!({"q": "test search", "num": 1}))
        .await;
    let body = match web {
        Ok(body) => body,
        Err(SerperError::Http(e)) if e.is_timeout() => {
            return Outcome::Warn("Timeout (but key might be valid)".to_string());
        }
        Err(SerperError::Status { status, body }) => {
            let preview: String = body.chars().take(100).collect();
            return Outcome::Fail(format!("HTTP {} - {}", status, preview));
        }
        Err(e) => return Outcome::Fail(e.to_string()),
    };

    let parsed: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    if !is_search_response(&parsed) {
        return Outcome::Fail("Unexpected response format".to_string());
    }

    match client
        .request("places", &json!({"q": "restaurant paris", "num": 1}))
        .await
    {
        Ok(_) => Outcome::Pass("Web and places search working".to_string()),
        Err(_) => Outcome::Warn("Web search working; places search limited or quota exceeded".to_string()),
    }
}

pub fn check_hyperbrowser(config: &ResearchConfig) -> Outcome {
    if config.hyperbrowser_api_key.is_some() {
        Outcome::Warn("Key present; a full check requires running a browser task".to_string())
    } else {
        Outcome::Fail("HYPERBROWSER_API_KEY not set".to_string())
    }
}

pub async fn check_amadeus(config: &FlightsConfig) -> Outcome {
    let client = match AmadeusClient::new(
        config.amadeus_base_url.clone(),
        config.amadeus_api_key.clone(),
        config.amadeus_api_secret.clone(),
        config.currency.clone(),
        config.http_timeout_secs,
    ) {
        Ok(client) => client,
        Err(e) => return Outcome::Fail(e.to_string()),
    };

    match client.access_token().await {
        Ok(token) => {
            let preview: String = token.chars().take(20).collect();
            Outcome::Pass(format!("Authentication successful (token {}...)", preview))
        }
        Err(e) => Outcome::Fail(e.to_string()),
    }
}

/// Both servers build from the environment and advertise their tools
pub fn check_tool_registries(research: &ResearchConfig, flights: &FlightsConfig) -> Outcome {
    let research_tools = match ResearchService::from_config(research) {
        Ok(service) => ResearchMcp::new(service).list_tools().len(),
        Err(e) => return Outcome::Fail(format!("research server: {}", e)),
    };
    let flight_tools = match FlightsService::from_config(flights) {
        Ok(service) => FlightsMcp::new(service).list_tools().len(),
        Err(e) => return Outcome::Fail(format!("flights server: {}", e)),
    };
    Outcome::Pass(format!(
        "research server exposes {} tools, flights server exposes {} tools",
        research_tools, flight_tools
    ))
}
