use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use trip_protocol::{parse_arguments, tool_definition, ServerInfo, ToolCallError, ToolDefinition, ToolServer};

use crate::service::ResearchService;

/// Arguments shared by every research tool
#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone)]
pub struct QueryArgs {
    /// Your travel question, destination or search text
    pub query: String,
}

const TOOLS: &[(&str, &str)] = &[
    (
        "research_agent",
        "Fast travel research agent. Searches web content and places to provide hotels, restaurants, attractions and tips for a destination.",
    ),
    (
        "research_query",
        "Optimize the query with the LLM, then run web and places searches and return both result sets.",
    ),
    (
        "optimize_search_query",
        "Rewrite a travel question into an optimized Google search query.",
    ),
    (
        "intelligent_search",
        "Let the LLM choose between web, places and browser search for an already optimized query, then run it.",
    ),
    ("web_search", "Search the web for travel guides, reviews, and general information."),
    ("places_search", "Search for specific places, hotels, restaurants, and attractions."),
    (
        "browser_search",
        "Use browser automation to search and extract detailed information (reviews, prices, contacts) from websites.",
    ),
];

/// Research MCP server - holds tool implementations
#[derive(Debug, Clone)]
pub struct ResearchMcp {
    service: ResearchService,
}

impl ResearchMcp {
    pub fn new(service: ResearchService) -> Self {
        Self { service }
    }
}

impl ToolServer for ResearchMcp {
    fn server_info(&self) -> ServerInfo {
        ServerInfo::new("research_mcp", env!("CARGO_PKG_VERSION"))
    }

    fn list_tools(&self) -> Vec<ToolDefinition> {
        TOOLS
            .iter()
            .map(|(name, description)| tool_definition::<QueryArgs>(name, description))
            .collect()
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> Result<String, ToolCallError> {
        if !TOOLS.iter().any(|(tool, _)| *tool == name) {
            return Err(ToolCallError::UnknownTool(name.to_string()));
        }
        let args: QueryArgs = parse_arguments(arguments)?;
        let query = args.query.as_str();

        let text = match name {
            "research_agent" => self.service.research_agent(query).await,
            "research_query" => self.service.research_query(query).await,
            "optimize_search_query" => self.service.optimize_search_query(query).await,
            "intelligent_search" => self.service.intelligent_search(query).await,
            "web_search" => self.service.web_search(query).await,
            "places_search" => self.service.places_search(query).await,
            "browser_search" => self.service.browser_search(query).await,
            other => return Err(ToolCallError::UnknownTool(other.to_string())),
        };
        Ok(text)
    }
}
