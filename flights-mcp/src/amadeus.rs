//! Amadeus self-service API: OAuth2 client credentials, flight offers, locations.

use std::time::{Duration, Instant};

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::model::{FlightOffersResponse, HasIssues, LocationsResponse};

const DEFAULT_TOKEN_TTL_SECS: u64 = 1800;
/// Refresh this long before the server-side expiry
const TOKEN_EXPIRY_MARGIN_SECS: u64 = 60;
const MAX_FLIGHT_OFFERS: u32 = 10;
const MAX_LOCATIONS: u32 = 10;

#[derive(Debug, thiserror::Error)]
pub enum AmadeusError {
    #[error("Amadeus API credentials not found")]
    MissingCredentials,
    #[error("Failed to authenticate with Amadeus API: {0}")]
    Auth(String),
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    #[error("Amadeus returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelClass {
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl TravelClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelClass::Economy => "ECONOMY",
            TravelClass::PremiumEconomy => "PREMIUM_ECONOMY",
            TravelClass::Business => "BUSINESS",
            TravelClass::First => "FIRST",
        }
    }
}

impl std::str::FromStr for TravelClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ECONOMY" => Ok(TravelClass::Economy),
            "PREMIUM_ECONOMY" => Ok(TravelClass::PremiumEconomy),
            "BUSINESS" => Ok(TravelClass::Business),
            "FIRST" => Ok(TravelClass::First),
            other => Err(format!("unknown travel class: {}", other)),
        }
    }
}

/// A validated flight offers search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightQuery {
    pub origin: String,
    pub destination: String,
    /// `YYYY-MM-DD`
    pub departure_date: String,
    pub return_date: Option<String>,
    pub adults: u32,
    pub travel_class: TravelClass,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: Instant,
}

#[derive(Debug)]
pub struct AmadeusClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    api_secret: Option<String>,
    currency: String,
    token: Mutex<Option<CachedToken>>,
}

impl AmadeusClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        api_secret: Option<String>,
        currency: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, AmadeusError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            api_secret,
            currency: currency.into(),
            token: Mutex::new(None),
        })
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some() && self.api_secret.is_some()
    }

    /// Get or refresh the OAuth2 access token
    pub async fn access_token(&self) -> Result<String, AmadeusError> {
        let (Some(api_key), Some(api_secret)) = (self.api_key.as_deref(), self.api_secret.as_deref()) else {
            return Err(AmadeusError::MissingCredentials);
        };

        // Held across the refresh so concurrent callers share one token request
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.expires_at {
                return Ok(token.token.clone());
            }
        }

        tracing::info!("→ Requesting Amadeus access token");
        let response = self
            .client
            .post(format!("{}/v1/security/oauth2/token", self.base_url))
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", api_key),
                ("client_secret", api_secret),
            ])
            .send()
            .await
            .map_err(|e| AmadeusError::Auth(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), "✗ Amadeus authentication failed");
            return Err(AmadeusError::Auth(format!("HTTP {}: {}", status.as_u16(), body)));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AmadeusError::Auth(e.to_string()))?;
        let ttl = token
            .expires_in
            .unwrap_or(DEFAULT_TOKEN_TTL_SECS)
            .saturating_sub(TOKEN_EXPIRY_MARGIN_SECS);

        *cached = Some(CachedToken {
            token: token.access_token.clone(),
            expires_at: Instant::now() + Duration::from_secs(ttl),
        });
        tracing::info!(ttl_secs = ttl, "✓ Amadeus access token cached");

        Ok(token.access_token)
    }

    /// GET with bearer auth. Error bodies that carry an Amadeus `errors`
    /// array are returned as data so the formatter can show them.
    async fn get<T>(&self, path: &str, params: &[(&str, String)]) -> Result<T, AmadeusError>
    where
        T: DeserializeOwned + HasIssues,
    {
        let token = self.access_token().await?;
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(token)
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(path, status = status.as_u16(), "✗ Amadeus request failed");
        match serde_json::from_str::<T>(&body) {
            Ok(parsed) if parsed.issues().is_some() => Ok(parsed),
            _ => Err(AmadeusError::Status {
                status: status.as_u16(),
                body,
            }),
        }
    }

    /// Flight Offers Search
    pub async fn search_flights(&self, query: &FlightQuery) -> Result<FlightOffersResponse, AmadeusError> {
        let mut params = vec![
            ("originLocationCode", query.origin.to_uppercase()),
            ("destinationLocationCode", query.destination.to_uppercase()),
            ("departureDate", query.departure_date.clone()),
            ("adults", query.adults.to_string()),
            ("travelClass", query.travel_class.as_str().to_string()),
            ("max", MAX_FLIGHT_OFFERS.to_string()),
            ("currencyCode", self.currency.clone()),
        ];
        if let Some(return_date) = &query.return_date {
            params.push(("returnDate", return_date.clone()));
        }

        tracing::info!(
            origin = %query.origin,
            destination = %query.destination,
            date = %query.departure_date,
            "→ Searching flights"
        );
        self.get("/v2/shopping/flight-offers", &params).await
    }

    /// Airport & City Search by keyword
    pub async fn find_airports(&self, keyword: &str) -> Result<LocationsResponse, AmadeusError> {
        let params = [
            ("subType", "AIRPORT,CITY".to_string()),
            ("keyword", keyword.to_string()),
            ("page[limit]", MAX_LOCATIONS.to_string()),
        ];
        tracing::info!(keyword, "→ Searching airports");
        self.get("/v1/reference-data/locations", &params).await
    }
}
