/// Research MCP Server Library
///
/// Exposes travel research operations as MCP tools:
/// - research_agent: optimized query + web and places search in one report
/// - research_query / intelligent_search: multi-source research
/// - optimize_search_query: LLM query rewriting
/// - web_search / places_search / browser_search: single sources

pub mod browser;
pub mod config;
pub mod llm;
pub mod serper;
pub mod server;
pub mod service;

pub use browser::{BrowserError, HyperbrowserClient};
pub use config::ResearchConfig;
pub use llm::{ChatMessage, LlmError, OpenAiClient};
pub use serper::{condense_results, SerperClient, SerperError};
pub use server::{QueryArgs, ResearchMcp};
pub use service::{ResearchService, SearchDecision, ServiceInitError};
