//! Hyperbrowser browser-use tasks: start a job, poll until it settles, fetch the result.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("HYPERBROWSER_API_KEY not found")]
    MissingKey,
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    #[error("Hyperbrowser returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("browser task {job_id} ended with status {status}: {error}")]
    TaskFailed {
        job_id: String,
        status: String,
        error: String,
    },
    #[error("browser task {0} did not finish in time")]
    Timeout(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StartTaskResponse {
    job_id: String,
}

#[derive(Debug, Deserialize)]
struct TaskStatusResponse {
    status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskResponse {
    status: String,
    #[serde(default)]
    data: Option<TaskData>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskData {
    #[serde(default)]
    final_result: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HyperbrowserClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    poll_interval: Duration,
    max_wait: Duration,
}

impl HyperbrowserClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout_secs: u64,
        max_wait_secs: u64,
    ) -> Result<Self, BrowserError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_wait: Duration::from_secs(max_wait_secs),
        })
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    async fn send_json<T: for<'de> Deserialize<'de>>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, BrowserError> {
        let api_key = self.api_key.as_deref().ok_or(BrowserError::MissingKey)?;
        let response = request.header("x-api-key", api_key).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BrowserError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }

    fn task_url(&self, suffix: &str) -> String {
        format!("{}/api/task/browser-use{}", self.base_url, suffix)
    }

    /// Run a natural-language browser task and return its final result
    pub async fn run_task(&self, instruction: &str) -> Result<String, BrowserError> {
        if self.api_key.is_none() {
            return Err(BrowserError::MissingKey);
        }

        let started: StartTaskResponse = self
            .send_json(self.client.post(self.task_url("")).json(&json!({ "task": instruction })))
            .await?;
        let job_id = started.job_id;
        tracing::info!(job_id = %job_id, "→ browser task started");

        let wait = async {
            loop {
                let status: TaskStatusResponse = self
                    .send_json(self.client.get(self.task_url(&format!("/{}/status", job_id))))
                    .await?;
                tracing::debug!(job_id = %job_id, status = %status.status, "browser task status");
                match status.status.as_str() {
                    "completed" | "failed" | "stopped" => return Ok::<(), BrowserError>(()),
                    _ => tokio::time::sleep(self.poll_interval).await,
                }
            }
        };

        tokio::time::timeout(self.max_wait, wait)
            .await
            .map_err(|_| BrowserError::Timeout(job_id.clone()))??;

        let task: TaskResponse = self
            .send_json(self.client.get(self.task_url(&format!("/{}", job_id))))
            .await?;

        if task.status != "completed" {
            tracing::warn!(job_id = %job_id, status = %task.status, "✗ browser task did not complete");
            return Err(BrowserError::TaskFailed {
                job_id,
                status: task.status,
                error: task.error.unwrap_or_else(|| "unknown error".to_string()),
            });
        }

        tracing::info!(job_id = %job_id, "✓ browser task completed");
        Ok(task
            .data
            .and_then(|d| d.final_result)
            .unwrap_or_else(|| "Browser task completed without a final result".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trip_protocol::testing::spawn_mock;
    use axum::{extract::Path, routing::{get, post}, Json, Router};
    use serde_json::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn mock_app(final_status: &'static str) -> Router {
        let polls = Arc::new(AtomicUsize::new(0));
        Router::new()
            .route(
                "/api/task/browser-use",
                post(|Json(body): Json<Value>| async move {
                    assert!(body["task"].as_str().unwrap().contains("Amalfi"));
                    Json(json!({"jobId": "job-1"}))
                }),
            )
            .route(
                "/api/task/browser-use/:id/status",
                get(move |Path(id): Path<String>| {
                    let polls = polls.clone();
                    async move {
                        assert_eq!(id, "job-1");
                        let n = polls.fetch_add(1, Ordering::SeqCst);
                        let status = if n < 2 { "running" } else { final_status };
                        Json(json!({ "status": status }))
                    }
                }),
            )
            .route(
                "/api/task/browser-use/:id",
                get(move || async move {
                    if final_status == "completed" {
                        Json(json!({"jobId": "job-1", "status": "completed", "data": {"finalResult": "Hotel Santa Caterina, €450/night"}}))
                    } else {
                        Json(json!({"jobId": "job-1", "status": final_status, "error": "captcha"}))
                    }
                }),
            )
    }

    #[tokio::test]
    async fn test_run_task_polls_until_complete() {
        let base = spawn_mock(mock_app("completed")).await;
        let client = HyperbrowserClient::new(base, Some("hb-key-1234567".into()), 5, 10)
            .unwrap()
            .with_poll_interval(Duration::from_millis(10));
        let out = client.run_task("Find hotels on the Amalfi coast").await.unwrap();
        assert_eq!(out, "Hotel Santa Caterina, €450/night");
    }

    #[tokio::test]
    async fn test_run_task_failed() {
        let base = spawn_mock(mock_app("failed")).await;
        let client = HyperbrowserClient::new(base, Some("hb-key-1234567".into()), 5, 10)
            .unwrap()
            .with_poll_interval(Duration::from_millis(10));
        let err = client.run_task("Amalfi").await.unwrap_err();
        assert_eq!(err.to_string(), "browser task job-1 ended with status failed: captcha");
    }

    #[tokio::test]
    async fn test_run_task_gives_up_after_max_wait() {
        let app = Router::new()
            .route("/api/task/browser-use", post(|| async { Json(json!({"jobId": "job-9"})) }))
            .route(
                "/api/task/browser-use/:id/status",
                get(|| async { Json(json!({"status": "running"})) }),
            );
        let base = spawn_mock(app).await;
        let client = HyperbrowserClient::new(base, Some("hb-key-1234567".into()), 5, 1)
            .unwrap()
            .with_poll_interval(Duration::from_millis(50));

        let err = client.run_task("Amalfi").await.unwrap_err();
        assert!(matches!(err, BrowserError::Timeout(ref id) if id == "job-9"));
        assert_eq!(err.to_string(), "browser task job-9 did not finish in time");
    }

    #[tokio::test]
    async fn test_missing_key() {
        let client = HyperbrowserClient::new("http://127.0.0.1:9", None, 5, 10).unwrap();
        assert!(matches!(client.run_task("x").await, Err(BrowserError::MissingKey)));
    }
}
