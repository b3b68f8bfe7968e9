/// Flight Booking MCP Server Library
///
/// Amadeus-backed flight tools:
/// - search_flights: flight offers with prices, times and airlines
/// - find_airports: IATA code lookup by city or airport name
/// - flight_booking_help: usage guide

pub mod amadeus;
pub mod config;
pub mod format;
pub mod help;
pub mod model;
pub mod server;
pub mod service;

pub use amadeus::{AmadeusClient, AmadeusError, FlightQuery, TravelClass};
pub use config::FlightsConfig;
pub use format::{format_airport_results, format_flight_results};
pub use server::FlightsMcp;
pub use service::{FindAirportsArgs, FlightsService, SearchFlightsArgs};
