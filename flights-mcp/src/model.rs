//! Amadeus response shapes, limited to the fields the formatters read.

use serde::{Deserialize, Serialize};

/// One entry of an Amadeus `errors` array
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiIssue {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

/// `GET /v2/shopping/flight-offers`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlightOffersResponse {
    #[serde(default)]
    pub data: Option<Vec<FlightOffer>>,
    #[serde(default)]
    pub errors: Option<Vec<ApiIssue>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightOffer {
    pub price: Price,
    #[serde(default)]
    pub itineraries: Vec<Itinerary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Price {
    pub total: String,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Itinerary {
    /// ISO 8601 duration, e.g. `PT9H35M`
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub departure: SegmentEndpoint,
    pub arrival: SegmentEndpoint,
    pub carrier_code: String,
    pub number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentEndpoint {
    pub iata_code: String,
    /// Local date-time, e.g. `2025-03-15T17:30:00`
    pub at: String,
}

/// `GET /v1/reference-data/locations`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationsResponse {
    #[serde(default)]
    pub data: Option<Vec<Location>>,
    #[serde(default)]
    pub errors: Option<Vec<ApiIssue>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub iata_code: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub city_name: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
}

/// Anything that may carry an Amadeus `errors` array
pub trait HasIssues {
    fn issues(&self) -> Option<&[ApiIssue]>;
}

impl HasIssues for FlightOffersResponse {
    fn issues(&self) -> Option<&[ApiIssue]> {
        self.errors.as_deref()
    }
}

impl HasIssues for LocationsResponse {
    fn issues(&self) -> Option<&[ApiIssue]> {
        self.errors.as_deref()
    }
}
