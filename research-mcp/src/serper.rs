//! Serper (google.serper.dev) web and places search.

use std::time::Duration;

use reqwest::Client;
use serde_json::{json, Value};

const MAX_ORGANIC_RESULTS: usize = 10;
const NO_RESULT: &str = "No good Google Search Result was found";

#[derive(Debug, thiserror::Error)]
pub enum SerperError {
    #[error("SERPER_API_KEY not found")]
    MissingKey,
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    #[error("Serper returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid JSON from Serper: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct SerperClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl SerperClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, timeout_secs: u64) -> Result<Self, SerperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// POST an arbitrary request body to `{base}/{endpoint}`, returning the raw text
    pub async fn request(&self, endpoint: &str, body: &Value) -> Result<String, SerperError> {
        let api_key = self.api_key.as_deref().ok_or(SerperError::MissingKey)?;

        tracing::debug!(endpoint, "→ Serper request");
        let response = self
            .client
            .post(format!("{}/{}", self.base_url, endpoint))
            .header("X-API-KEY", api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            tracing::warn!(endpoint, status = status.as_u16(), "✗ Serper request failed");
            return Err(SerperError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(text)
    }

    /// Raw response body of `{base}/{endpoint}` for `{"q": query}`
    pub async fn search_raw(&self, endpoint: &str, query: &str) -> Result<String, SerperError> {
        self.request(endpoint, &json!({ "q": query })).await
    }

    /// Google web search condensed into one line of snippets
    pub async fn web_search(&self, query: &str) -> Result<String, SerperError> {
        let body = json!({
            "q": query,
            "gl": "us",
            "hl": "en",
            "num": MAX_ORGANIC_RESULTS,
        });
        let text = self.request("search", &body).await?;
        let results: Value = serde_json::from_str(&text)?;
        Ok(condense_results(&results))
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Null, false, zero and empty strings/arrays/objects count as absent
fn present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|v| present(v))
}

fn answer_box_snippets(answer_box: &Value) -> Option<Vec<String>> {
    if let Some(answer) = field(answer_box, "answer") {
        return Some(vec![value_text(answer)]);
    }
    if let Some(snippet) = field(answer_box, "snippet") {
        return Some(vec![value_text(snippet).replace('\n', " ")]);
    }
    if let Some(highlighted) = field(answer_box, "snippetHighlighted") {
        return Some(match highlighted {
            Value::Array(items) => items.iter().map(value_text).collect(),
            other => vec![value_text(other)],
        });
    }
    None
}

/// Collapse a Serper `/search` response into snippets joined by spaces.
///
/// A direct answer box wins outright; otherwise knowledge graph facts come
/// first, followed by the organic result snippets and their attributes.
pub fn condense_results(results: &Value) -> String {
    if let Some(snippets) = results.get("answerBox").and_then(answer_box_snippets) {
        return snippets.join(" ");
    }

    let mut snippets: Vec<String> = Vec::new();

    if let Some(kg) = results.get("knowledgeGraph") {
        let title = kg.get("title").map(value_text).unwrap_or_default();
        if let Some(entity_type) = field(kg, "type") {
            snippets.push(format!("{}: {}.", title, value_text(entity_type)));
        }
        if let Some(description) = field(kg, "description") {
            snippets.push(value_text(description));
        }
        if let Some(attributes) = kg.get("attributes").and_then(|v| v.as_object()) {
            for (attribute, value) in attributes {
                snippets.push(format!("{} {}: {}.", title, attribute, value_text(value)));
            }
        }
    }

    if let Some(organic) = results.get("organic").and_then(|v| v.as_array()) {
        for result in organic.iter().take(MAX_ORGANIC_RESULTS) {
            if let Some(snippet) = field(result, "snippet") {
                snippets.push(value_text(snippet));
            }
            if let Some(attributes) = result.get("attributes").and_then(|v| v.as_object()) {
                for (attribute, value) in attributes {
                    snippets.push(format!("{}: {}.", attribute, value_text(value)));
                }
            }
        }
    }

    if snippets.is_empty() {
        return NO_RESULT.to_string();
    }
    snippets.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use trip_protocol::testing::spawn_mock;
    use axum::{http::HeaderMap, routing::post, Json, Router};

    #[test]
    fn test_answer_box_wins() {
        let results = json!({
            "answerBox": {"answer": "Naples"},
            "organic": [{"snippet": "ignored"}]
        });
        assert_eq!(condense_results(&results), "Naples");

        let results = json!({"answerBox": {"snippet": "Mild\nspring weather"}});
        assert_eq!(condense_results(&results), "Mild spring weather");

        let results = json!({"answerBox": {"snippetHighlighted": ["10-16°C", "March"]}});
        assert_eq!(condense_results(&results), "10-16°C March");
    }

    #[test]
    fn test_empty_answer_box_falls_through() {
        for answer_box in [
            json!({"snippetHighlighted": []}),
            json!({"answer": ""}),
            json!({"snippet": ""}),
            json!({"answer": null, "snippet": "", "snippetHighlighted": []}),
        ] {
            let results = json!({
                "answerBox": answer_box,
                "organic": [{"snippet": "Pompeii opens at 9am."}]
            });
            assert_eq!(condense_results(&results), "Pompeii opens at 9am.");
        }

        let results = json!({
            "answerBox": {"answer": ""},
            "knowledgeGraph": {"title": "Capri", "type": "Island", "description": ""},
            "organic": [{"snippet": "Ferries leave from Molo Beverello."}]
        });
        assert_eq!(condense_results(&results), "Capri: Island. Ferries leave from Molo Beverello.");
    }

    #[test]
    fn test_knowledge_graph_then_organic() {
        let results = json!({
            "knowledgeGraph": {
                "title": "Pompeii",
                "type": "Archaeological site",
                "description": "Ancient Roman city.",
                "attributes": {"Founded": "7th century BC"}
            },
            "organic": [
                {"snippet": "Book tickets online.", "attributes": {"Price": "€22"}},
                {"title": "no snippet here"}
            ]
        });
        assert_eq!(
            condense_results(&results),
            "Pompeii: Archaeological site. Ancient Roman city. Pompeii Founded: 7th century BC. Book tickets online. Price: €22."
        );
    }

    #[test]
    fn test_organic_is_capped() {
        let organic: Vec<Value> = (0..15).map(|i| json!({"snippet": format!("s{}", i)})).collect();
        let out = condense_results(&json!({ "organic": organic }));
        assert!(out.ends_with("s9"));
        assert!(!out.contains("s10"));
    }

    #[test]
    fn test_nothing_found() {
        assert_eq!(condense_results(&json!({"organic": []})), NO_RESULT);
        assert_eq!(condense_results(&Value::Null), NO_RESULT);
    }

    #[tokio::test]
    async fn test_search_requests() {
        let app = Router::new()
            .route(
                "/search",
                post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                    assert_eq!(headers["x-api-key"], "serper-key-12345");
                    assert_eq!(body["num"], 10);
                    assert_eq!(body["gl"], "us");
                    Json(json!({"organic": [{"snippet": format!("about {}", body["q"].as_str().unwrap())}]}))
                }),
            )
            .route(
                "/places",
                post(|Json(body): Json<Value>| async move {
                    assert_eq!(body, json!({"q": "pizza naples"}));
                    r#"{"places":[{"title":"Da Michele"}]}"#
                }),
            );
        let base = spawn_mock(app).await;
        let client = SerperClient::new(base, Some("serper-key-12345".into()), 5).unwrap();

        assert_eq!(client.web_search("capri").await.unwrap(), "about capri");
        assert_eq!(
            client.search_raw("places", "pizza naples").await.unwrap(),
            r#"{"places":[{"title":"Da Michele"}]}"#
        );
    }

    #[tokio::test]
    async fn test_missing_key_and_status() {
        let client = SerperClient::new("http://127.0.0.1:9", None, 5).unwrap();
        assert!(matches!(client.web_search("x").await, Err(SerperError::MissingKey)));

        let app = Router::new().route(
            "/places",
            post(|| async { (axum::http::StatusCode::FORBIDDEN, "quota exceeded") }),
        );
        let base = spawn_mock(app).await;
        let client = SerperClient::new(base, Some("serper-key-12345".into()), 5).unwrap();
        let err = client.search_raw("places", "x").await.unwrap_err();
        assert_eq!(err.to_string(), "Serper returned HTTP 403: quota exceeded");
    }

    #[tokio::test]
    async fn test_web_search_rejects_non_json() {
        let app = Router::new().route("/search", post(|| async { "<html>maintenance</html>" }));
        let base = spawn_mock(app).await;
        let client = SerperClient::new(base, Some("serper-key-12345".into()), 5).unwrap();
        let err = client.web_search("naples").await.unwrap_err();
        assert!(matches!(err, SerperError::Decode(_)));
        assert!(err.to_string().starts_with("invalid JSON from Serper: "));
    }
}
