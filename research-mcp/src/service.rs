//! Research operations exposed as tools.
//!
//! Every operation returns text. Vendor failures are rendered into the text
//! rather than propagated, so the assistant always gets something to read.

use std::fmt;

use crate::browser::{BrowserError, HyperbrowserClient};
use crate::config::ResearchConfig;
use crate::llm::{ChatMessage, LlmError, OpenAiClient};
use crate::serper::{SerperClient, SerperError};

const RULE_WIDTH: usize = 80;

const OPTIMIZER_PROMPT: &str = "You are a master expert in crafting optimal Google search queries for the Serper API. \
Return ONLY the optimized search query - no explanations or additional text.";

const TRAVEL_OPTIMIZER_PROMPT: &str = "You are a travel research expert. Optimize this query for Google search. \
Return ONLY the optimized search query - no explanations.";

#[derive(Debug, thiserror::Error)]
pub enum ServiceInitError {
    #[error("LLM client: {0}")]
    Llm(#[from] LlmError),
    #[error("Serper client: {0}")]
    Serper(#[from] SerperError),
    #[error("Hyperbrowser client: {0}")]
    Browser(#[from] BrowserError),
}

/// Which search source(s) the LLM picked for a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchDecision {
    Web,
    Places,
    Browser,
    Comprehensive,
    Unclear(String),
}

impl SearchDecision {
    pub fn parse(raw: &str) -> Self {
        let decision = raw.trim().to_lowercase();
        match decision.as_str() {
            "web_search" => SearchDecision::Web,
            "places_search" => SearchDecision::Places,
            "browser_search" => SearchDecision::Browser,
            "comprehensive" => SearchDecision::Comprehensive,
            _ => SearchDecision::Unclear(decision),
        }
    }
}

impl fmt::Display for SearchDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchDecision::Web => write!(f, "Web Search"),
            SearchDecision::Places => write!(f, "Places Search"),
            SearchDecision::Browser => write!(f, "Browser Search"),
            SearchDecision::Comprehensive => write!(f, "Comprehensive Search"),
            SearchDecision::Unclear(raw) => write!(f, "{}", raw),
        }
    }
}

fn decision_prompt(query: &str) -> String {
    format!(
        r#"Query: "{query}"

Analyze this travel query and decide which search tool(s) to use:

- Choose "web_search" for: general travel information, guides, tips, reviews, recommendations, articles
- Choose "places_search" for: specific locations, hotels, restaurants, attractions, businesses
- Choose "browser_search" for: detailed extraction from specific websites, real-time pricing, booking info
- Choose "comprehensive" if you need information from all three sources for complete research

Respond with ONLY one word: "web_search", "places_search", "browser_search", or "comprehensive""#
    )
}

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

#[derive(Debug, Clone)]
pub struct ResearchService {
    llm: OpenAiClient,
    serper: SerperClient,
    browser: HyperbrowserClient,
}

impl ResearchService {
    pub fn new(llm: OpenAiClient, serper: SerperClient, browser: HyperbrowserClient) -> Self {
        Self { llm, serper, browser }
    }

    pub fn from_config(config: &ResearchConfig) -> Result<Self, ServiceInitError> {
        let llm = OpenAiClient::new(
            config.openai_base_url.clone(),
            config.openai_model.clone(),
            config.openai_api_key.clone(),
            config.http_timeout_secs,
        )?;
        let serper = SerperClient::new(
            config.serper_base_url.clone(),
            config.serper_api_key.clone(),
            config.http_timeout_secs,
        )?;
        let browser = HyperbrowserClient::new(
            config.hyperbrowser_base_url.clone(),
            config.hyperbrowser_api_key.clone(),
            config.http_timeout_secs,
            config.hyperbrowser_max_wait_secs,
        )?;
        Ok(Self::new(llm, serper, browser))
    }

    async fn optimize_with(&self, system_prompt: &str, user_prompt: String) -> Result<String, LlmError> {
        self.llm
            .chat(&[ChatMessage::system(system_prompt), ChatMessage::user(user_prompt)])
            .await
    }

    /// Rewrite a user question into a Google-friendly search query
    pub async fn optimize_search_query(&self, user_query: &str) -> String {
        if !self.llm.has_key() {
            return "Error: OPENAI_API_KEY not found or empty".to_string();
        }
        let prompt = format!("Original query: \"{}\"\nOptimized query:", user_query);
        match self.optimize_with(OPTIMIZER_PROMPT, prompt).await {
            Ok(optimized) => optimized,
            Err(e) => format!("Error optimizing query: {}", e),
        }
    }

    pub async fn web_search(&self, query: &str) -> String {
        match self.serper.web_search(query).await {
            Ok(result) => result,
            Err(e) => format!("Web search error: {}", e),
        }
    }

    pub async fn places_search(&self, query: &str) -> String {
        match self.serper.search_raw("places", query).await {
            Ok(result) => result,
            Err(e) => format!("places search error: {}", e),
        }
    }

    pub async fn browser_search(&self, query: &str) -> String {
        let instruction = format!(
            "Search for '{}' and extract detailed information including reviews, prices, contact details, and recommendations",
            query
        );
        match self.browser.run_task(&instruction).await {
            Ok(result) => result,
            Err(e) => format!("Browser search error: {}", e),
        }
    }

    /// Let the LLM pick the search source(s), then run them
    pub async fn intelligent_search(&self, optimized_query: &str) -> String {
        if !self.llm.has_key() {
            return "Error: OPENAI_API_KEY not found".to_string();
        }

        let raw = match self
            .llm
            .chat(&[ChatMessage::user(decision_prompt(optimized_query))])
            .await
        {
            Ok(raw) => raw,
            Err(e) => return format!("Error in intelligent search: {}", e),
        };
        let decision = SearchDecision::parse(&raw);
        tracing::info!(decision = %decision, "search source selected");

        match decision {
            SearchDecision::Web => {
                let result = self.web_search(optimized_query).await;
                format!("Decision: {}\nResults:\n{}", decision, result)
            }
            SearchDecision::Places => {
                let result = self.places_search(optimized_query).await;
                format!("Decision: {}\nResults:\n{}", decision, result)
            }
            SearchDecision::Browser => {
                let result = self.browser_search(optimized_query).await;
                format!("Decision: {}\nResults:\n{}", decision, result)
            }
            SearchDecision::Comprehensive => {
                let (web, places, browser) = tokio::join!(
                    self.web_search(optimized_query),
                    self.places_search(optimized_query),
                    self.browser_search(optimized_query),
                );
                format!(
                    "Decision: Comprehensive Search\n\nWeb Search Results:\n{}\n\nPlaces Search Results:\n{}\n\nBrowser Search Results:\n{}",
                    web, places, browser
                )
            }
            SearchDecision::Unclear(raw) => {
                let (web, places) = tokio::join!(
                    self.web_search(optimized_query),
                    self.places_search(optimized_query),
                );
                format!(
                    "Decision unclear: {}. Using comprehensive search as default.\n\nWeb Results:\n{}\n\nPlaces Results:\n{}",
                    raw, web, places
                )
            }
        }
    }

    /// Optimize (best effort), then web + places search
    pub async fn research_query(&self, query: &str) -> String {
        let optimized = if self.llm.has_key() {
            let prompt = format!("Original query: \"{}\"\nOptimized query:", query);
            match self.optimize_with(OPTIMIZER_PROMPT, prompt).await {
                Ok(optimized) => optimized,
                Err(e) => {
                    tracing::warn!("query optimization failed, using original: {}", e);
                    query.to_string()
                }
            }
        } else {
            query.to_string()
        };

        let (web, places) = tokio::join!(self.web_search(&optimized), self.places_search(&optimized));

        format!(
            "🔍 Research Results for: {}\n\n📰 Web Search Results:\n{}\n\n📍 Places Search Results:\n{}",
            optimized, web, places
        )
    }

    /// Fast travel research: hotels, restaurants, attractions and tips in one report
    pub async fn research_agent(&self, query: &str) -> String {
        tracing::info!(query, "→ research_agent");

        let mut optimized = query.to_string();
        if self.llm.has_key() {
            let prompt = format!("Query: \"{}\"\nOptimized:", query);
            match self.optimize_with(TRAVEL_OPTIMIZER_PROMPT, prompt).await {
                Ok(o) => optimized = o,
                Err(e) => tracing::debug!("optimization skipped: {}", e),
            }
        }

        let (web, places) = tokio::join!(self.web_search(&optimized), self.places_search(&optimized));

        let lines = [
            format!("Travel Research Results for: {}", query),
            rule(),
            format!("Optimized Search: {}\n", optimized),
            format!("\n{}", rule()),
            "WEB SEARCH - Travel Guides & Articles".to_string(),
            rule(),
            web,
            format!("\n\n{}", rule()),
            "PLACES & LOCATIONS - Hotels, Restaurants, Attractions".to_string(),
            rule(),
            places,
            format!("\n\n{}", rule()),
            "Research Complete!".to_string(),
            rule(),
        ];

        tracing::info!("✓ research_agent complete");
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trip_protocol::testing::spawn_mock;
    use axum::{routing::post, Json, Router};
    use serde_json::{json, Value};

    /// LLM answers `decision` to routing prompts and "optimized <q>" otherwise
    fn vendor_app(decision: &'static str) -> Router {
        Router::new()
            .route(
                "/chat/completions",
                post(move |Json(body): Json<Value>| async move {
                    let messages = body["messages"].as_array().unwrap();
                    let last = messages.last().unwrap()["content"].as_str().unwrap().to_string();
                    let content = if last.contains("Respond with ONLY one word") {
                        decision.to_string()
                    } else {
                        "optimized naples".to_string()
                    };
                    Json(json!({"choices": [{"message": {"content": content}}]}))
                }),
            )
            .route(
                "/search",
                post(|Json(body): Json<Value>| async move {
                    Json(json!({"organic": [{"snippet": format!("web for {}", body["q"].as_str().unwrap())}]}))
                }),
            )
            .route("/places", post(|| async { r#"{"places":[]}"# }))
    }

    async fn service(decision: &'static str, with_llm_key: bool) -> ResearchService {
        let base = spawn_mock(vendor_app(decision)).await;
        let llm_key = with_llm_key.then(|| "sk-test-key-123".to_string());
        ResearchService::new(
            OpenAiClient::new(base.clone(), "m", llm_key, 5).unwrap(),
            SerperClient::new(base.clone(), Some("serper-key-12345".into()), 5).unwrap(),
            HyperbrowserClient::new(base, None, 5, 5).unwrap(),
        )
    }

    #[test]
    fn test_decision_parse() {
        assert_eq!(SearchDecision::parse(" Web_Search \n"), SearchDecision::Web);
        assert_eq!(SearchDecision::parse("places_search"), SearchDecision::Places);
        assert_eq!(SearchDecision::parse("BROWSER_SEARCH"), SearchDecision::Browser);
        assert_eq!(SearchDecision::parse("comprehensive"), SearchDecision::Comprehensive);
        assert_eq!(
            SearchDecision::parse("Web search."),
            SearchDecision::Unclear("web search.".to_string())
        );
    }

    #[tokio::test]
    async fn test_optimize_search_query() {
        let svc = service("web_search", true).await;
        assert_eq!(svc.optimize_search_query("naples with teens").await, "optimized naples");

        let svc = service("web_search", false).await;
        assert_eq!(
            svc.optimize_search_query("naples").await,
            "Error: OPENAI_API_KEY not found or empty"
        );
    }

    #[tokio::test]
    async fn test_intelligent_search_dispatch() {
        let svc = service("web_search", true).await;
        assert_eq!(
            svc.intelligent_search("rome").await,
            "Decision: Web Search\nResults:\nweb for rome"
        );

        let svc = service("places_search", true).await;
        assert_eq!(
            svc.intelligent_search("rome").await,
            "Decision: Places Search\nResults:\n{\"places\":[]}"
        );

        let svc = service("browser_search", true).await;
        assert_eq!(
            svc.intelligent_search("rome").await,
            "Decision: Browser Search\nResults:\nBrowser search error: HYPERBROWSER_API_KEY not found"
        );

        let svc = service("comprehensive", true).await;
        let out = svc.intelligent_search("rome").await;
        assert!(out.starts_with("Decision: Comprehensive Search\n\nWeb Search Results:\nweb for rome"));
        assert!(out.ends_with("Browser Search Results:\nBrowser search error: HYPERBROWSER_API_KEY not found"));

        let svc = service("both please", true).await;
        assert_eq!(
            svc.intelligent_search("rome").await,
            "Decision unclear: both please. Using comprehensive search as default.\n\nWeb Results:\nweb for rome\n\nPlaces Results:\n{\"places\":[]}"
        );

        let svc = service("web_search", false).await;
        assert_eq!(svc.intelligent_search("rome").await, "Error: OPENAI_API_KEY not found");
    }

    #[tokio::test]
    async fn test_research_query() {
        let svc = service("web_search", true).await;
        assert_eq!(
            svc.research_query("naples").await,
            "🔍 Research Results for: optimized naples\n\n📰 Web Search Results:\nweb for optimized naples\n\n📍 Places Search Results:\n{\"places\":[]}"
        );

        // without a key the raw query goes straight to search
        let svc = service("web_search", false).await;
        assert!(svc.research_query("capri").await.starts_with("🔍 Research Results for: capri\n"));
    }

    #[tokio::test]
    async fn test_research_agent_report() {
        let svc = service("web_search", true).await;
        let out = svc.research_agent("naples in march").await;
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "Travel Research Results for: naples in march");
        assert_eq!(lines[1], "=".repeat(80));
        assert_eq!(lines[2], "Optimized Search: optimized naples");
        assert!(out.contains("WEB SEARCH - Travel Guides & Articles\n"));
        assert!(out.contains("web for optimized naples"));
        assert!(out.contains("PLACES & LOCATIONS - Hotels, Restaurants, Attractions\n"));
        assert!(out.ends_with(&format!("Research Complete!\n{}", "=".repeat(80))));
    }

    /// LLM always fails with a 500; Serper answers normally
    async fn service_with_broken_llm() -> ResearchService {
        let app = Router::new()
            .route(
                "/chat/completions",
                post(|| async { (axum::http::StatusCode::INTERNAL_SERVER_ERROR, "upstream overloaded") }),
            )
            .route(
                "/search",
                post(|Json(body): Json<Value>| async move {
                    Json(json!({"organic": [{"snippet": format!("web for {}", body["q"].as_str().unwrap())}]}))
                }),
            )
            .route("/places", post(|| async { r#"{"places":[]}"# }));
        let base = spawn_mock(app).await;
        ResearchService::new(
            OpenAiClient::new(base.clone(), "m", Some("sk-test-key-123".into()), 5).unwrap(),
            SerperClient::new(base.clone(), Some("serper-key-12345".into()), 5).unwrap(),
            HyperbrowserClient::new(base, None, 5, 5).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_failed_optimization_keeps_original_query() {
        let svc = service_with_broken_llm().await;

        assert_eq!(
            svc.research_query("amalfi coast").await,
            "🔍 Research Results for: amalfi coast\n\n📰 Web Search Results:\nweb for amalfi coast\n\n📍 Places Search Results:\n{\"places\":[]}"
        );

        let report = svc.research_agent("amalfi coast").await;
        assert!(report.contains("\nOptimized Search: amalfi coast\n"));
        assert!(report.contains("web for amalfi coast"));
        assert!(!report.contains("upstream overloaded"));

        assert!(svc
            .optimize_search_query("amalfi coast")
            .await
            .starts_with("Error optimizing query: "));
    }

    #[tokio::test]
    async fn test_search_errors_are_text() {
        let svc = ResearchService::new(
            OpenAiClient::new("http://127.0.0.1:9", "m", None, 5).unwrap(),
            SerperClient::new("http://127.0.0.1:9", None, 5).unwrap(),
            HyperbrowserClient::new("http://127.0.0.1:9", None, 5, 5).unwrap(),
        );
        assert_eq!(svc.web_search("x").await, "Web search error: SERPER_API_KEY not found");
        assert_eq!(svc.places_search("x").await, "places search error: SERPER_API_KEY not found");
    }
}
