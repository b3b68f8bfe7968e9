use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use trip_protocol::{parse_arguments, tool_definition, ServerInfo, ToolCallError, ToolDefinition, ToolServer};

use crate::service::{FindAirportsArgs, FlightsService, SearchFlightsArgs};

/// `flight_booking_help` takes no arguments
#[derive(Debug, Deserialize, JsonSchema)]
pub struct NoArgs {}

/// Flights MCP server - holds tool implementations
#[derive(Debug)]
pub struct FlightsMcp {
    service: FlightsService,
}

impl FlightsMcp {
    pub fn new(service: FlightsService) -> Self {
        Self { service }
    }
}

impl ToolServer for FlightsMcp {
    fn server_info(&self) -> ServerInfo {
        ServerInfo::new("flights_booking_mcp", env!("CARGO_PKG_VERSION"))
    }

    fn list_tools(&self) -> Vec<ToolDefinition> {
        vec![
            tool_definition::<SearchFlightsArgs>(
                "search_flights",
                "Search for flights using Amadeus API. Returns prices, times, and airlines for one-way or round-trip searches.",
            ),
            tool_definition::<FindAirportsArgs>(
                "find_airports",
                "Find airport codes by city name or airport name.",
            ),
            tool_definition::<NoArgs>(
                "flight_booking_help",
                "Get help and information about using the flight booking agent.",
            ),
        ]
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> Result<String, ToolCallError> {
        match name {
            "search_flights" => {
                let args: SearchFlightsArgs = parse_arguments(arguments)?;
                Ok(self.service.search_flights(&args).await)
            }
            "find_airports" => {
                let args: FindAirportsArgs = parse_arguments(arguments)?;
                Ok(self.service.find_airports(&args.search_term).await)
            }
            "flight_booking_help" => Ok(self.service.flight_booking_help()),
            other => Err(ToolCallError::UnknownTool(other.to_string())),
        }
    }
}
