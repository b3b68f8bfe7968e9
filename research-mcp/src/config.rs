use trip_protocol::{env_opt, env_or, env_parse};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_SERPER_BASE_URL: &str = "https://google.serper.dev";
pub const DEFAULT_HYPERBROWSER_BASE_URL: &str = "https://app.hyperbrowser.ai";

/// Research server configuration, read from the environment
#[derive(Debug, Clone)]
pub struct ResearchConfig {
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub serper_api_key: Option<String>,
    pub serper_base_url: String,
    pub hyperbrowser_api_key: Option<String>,
    pub hyperbrowser_base_url: String,
    /// Upper bound on a single browser-use task, polling included
    pub hyperbrowser_max_wait_secs: u64,
    pub http_timeout_secs: u64,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            serper_api_key: None,
            serper_base_url: DEFAULT_SERPER_BASE_URL.to_string(),
            hyperbrowser_api_key: None,
            hyperbrowser_base_url: DEFAULT_HYPERBROWSER_BASE_URL.to_string(),
            hyperbrowser_max_wait_secs: 300,
            http_timeout_secs: 30,
        }
    }
}

impl ResearchConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            openai_api_key: env_opt("OPENAI_API_KEY"),
            openai_base_url: env_or("OPENAI_BASE_URL", &defaults.openai_base_url),
            openai_model: env_or("OPENAI_MODEL", &defaults.openai_model),
            serper_api_key: env_opt("SERPER_API_KEY"),
            serper_base_url: env_or("SERPER_BASE_URL", &defaults.serper_base_url),
            hyperbrowser_api_key: env_opt("HYPERBROWSER_API_KEY"),
            hyperbrowser_base_url: env_or("HYPERBROWSER_BASE_URL", &defaults.hyperbrowser_base_url),
            hyperbrowser_max_wait_secs: env_parse("HYPERBROWSER_MAX_WAIT_SECS", defaults.hyperbrowser_max_wait_secs),
            http_timeout_secs: env_parse("RESEARCH_HTTP_TIMEOUT_SECS", defaults.http_timeout_secs),
        }
    }
}
