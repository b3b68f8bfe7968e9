use trip_protocol::{env_opt, env_or, env_parse};

/// Test environment; switch to `https://api.amadeus.com` for live data
pub const DEFAULT_AMADEUS_BASE_URL: &str = "https://test.api.amadeus.com";

#[derive(Debug, Clone)]
pub struct FlightsConfig {
    pub amadeus_api_key: Option<String>,
    pub amadeus_api_secret: Option<String>,
    pub amadeus_base_url: String,
    pub currency: String,
    pub http_timeout_secs: u64,
}

impl Default for FlightsConfig {
    fn default() -> Self {
        Self {
            amadeus_api_key: None,
            amadeus_api_secret: None,
            amadeus_base_url: DEFAULT_AMADEUS_BASE_URL.to_string(),
            currency: "USD".to_string(),
            http_timeout_secs: 30,
        }
    }
}

impl FlightsConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            amadeus_api_key: env_opt("AMADEUS_API_KEY"),
            amadeus_api_secret: env_opt("AMADEUS_API_SECRET"),
            amadeus_base_url: env_or("AMADEUS_BASE_URL", &defaults.amadeus_base_url),
            currency: env_or("AMADEUS_CURRENCY", &defaults.currency),
            http_timeout_secs: env_parse("FLIGHTS_HTTP_TIMEOUT_SECS", defaults.http_timeout_secs),
        }
    }
}
