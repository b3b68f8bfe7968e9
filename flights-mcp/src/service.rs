//! Flight tools: input validation, Amadeus calls, text rendering.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::amadeus::{AmadeusClient, AmadeusError, FlightQuery, TravelClass};
use crate::config::FlightsConfig;
use crate::format::{format_airport_results, format_flight_results};

const MAX_ADULTS: u32 = 9;

const MISSING_CREDENTIALS_SEARCH: &str = "❌ Error: Amadeus API credentials not found.

Please set up your Amadeus API credentials:
1. Sign up at https://developers.amadeus.com/
2. Create a new app to get API Key and Secret
3. Add to your .env file:
   AMADEUS_API_KEY=your_api_key
   AMADEUS_API_SECRET=your_api_secret
";

const MISSING_CREDENTIALS_AIRPORTS: &str = "❌ Error: Amadeus API credentials not found.

Please set up your Amadeus API credentials in your .env file.
Visit https://developers.amadeus.com/ to get your credentials.";

/// Arguments for `search_flights`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchFlightsArgs {
    /// Origin airport code (e.g., "JFK", "LAX", "LHR")
    pub origin: String,
    /// Destination airport code (e.g., "CDG", "NAP", "FCO")
    pub destination: String,
    /// Departure date in YYYY-MM-DD format
    pub departure_date: String,
    /// Return date in YYYY-MM-DD format (optional, for round-trip)
    #[serde(default)]
    pub return_date: Option<String>,
    /// Number of adult passengers (default: 1)
    #[serde(default = "default_adults")]
    pub adults: i64,
    /// Travel class - ECONOMY, PREMIUM_ECONOMY, BUSINESS, FIRST (default: ECONOMY)
    #[serde(default = "default_travel_class")]
    pub travel_class: String,
}

fn default_adults() -> i64 {
    1
}

fn default_travel_class() -> String {
    "ECONOMY".to_string()
}

/// Arguments for `find_airports`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FindAirportsArgs {
    /// City name or airport name to search (e.g., "Naples", "New York", "Paris")
    pub search_term: String,
}

fn is_iso_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

impl SearchFlightsArgs {
    /// Check the arguments; the error is the message shown to the user
    pub fn validate(&self) -> Result<FlightQuery, String> {
        let origin = self.origin.trim();
        let destination = self.destination.trim();

        if origin.is_empty() || destination.is_empty() {
            return Err("❌ Error: Origin and destination airport codes are required".to_string());
        }
        if origin.chars().count() != 3 || destination.chars().count() != 3 {
            return Err(
                "❌ Error: Airport codes must be 3 letters (IATA codes). Use find_airports tool to search."
                    .to_string(),
            );
        }

        let return_date = self
            .return_date
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty());
        if !is_iso_date(self.departure_date.trim()) || return_date.is_some_and(|d| !is_iso_date(d)) {
            return Err("❌ Error: Dates must be in YYYY-MM-DD format".to_string());
        }

        let travel_class: TravelClass = self.travel_class.parse().map_err(|_| {
            "❌ Error: Travel class must be one of ECONOMY, PREMIUM_ECONOMY, BUSINESS, FIRST".to_string()
        })?;

        let adults = u32::try_from(self.adults)
            .ok()
            .filter(|n| (1..=MAX_ADULTS).contains(n))
            .ok_or_else(|| format!("❌ Error: Number of adults must be between 1 and {}", MAX_ADULTS))?;

        Ok(FlightQuery {
            origin: origin.to_uppercase(),
            destination: destination.to_uppercase(),
            departure_date: self.departure_date.trim().to_string(),
            return_date: return_date.map(str::to_string),
            adults,
            travel_class,
        })
    }
}

#[derive(Debug)]
pub struct FlightsService {
    amadeus: AmadeusClient,
}

impl FlightsService {
    pub fn new(amadeus: AmadeusClient) -> Self {
        Self { amadeus }
    }

    pub fn from_config(config: &FlightsConfig) -> Result<Self, AmadeusError> {
        let amadeus = AmadeusClient::new(
            config.amadeus_base_url.clone(),
            config.amadeus_api_key.clone(),
            config.amadeus_api_secret.clone(),
            config.currency.clone(),
            config.http_timeout_secs,
        )?;
        Ok(Self::new(amadeus))
    }

    /// Search for flights with prices, times, and airlines
    pub async fn search_flights(&self, args: &SearchFlightsArgs) -> String {
        let query = match args.validate() {
            Ok(query) => query,
            Err(message) => return message,
        };

        if !self.amadeus.has_credentials() {
            return MISSING_CREDENTIALS_SEARCH.to_string();
        }

        match self.amadeus.search_flights(&query).await {
            Ok(response) => format_flight_results(&response),
            Err(e) => {
                tracing::error!("✗ Flight search failed: {}", e);
                format!("❌ Error searching flights: {}", e)
            }
        }
    }

    /// Find airport codes by city name or airport name
    pub async fn find_airports(&self, search_term: &str) -> String {
        if !self.amadeus.has_credentials() {
            return MISSING_CREDENTIALS_AIRPORTS.to_string();
        }

        match self.amadeus.find_airports(search_term.trim()).await {
            Ok(response) => format_airport_results(&response),
            Err(e) => {
                tracing::error!("✗ Airport search failed: {}", e);
                format!("❌ Error searching airports: {}", e)
            }
        }
    }

    pub fn flight_booking_help(&self) -> String {
        crate::help::FLIGHT_BOOKING_HELP.to_string()
    }
}
