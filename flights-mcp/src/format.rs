//! Human-readable rendering of Amadeus responses.

use crate::model::{FlightOffersResponse, LocationsResponse};

const MAX_OFFERS_SHOWN: usize = 10;

pub fn format_flight_results(response: &FlightOffersResponse) -> String {
    if let Some(errors) = &response.errors {
        let messages: Vec<String> = errors
            .iter()
            .map(|err| {
                format!(
                    "- {}: {}",
                    err.title.as_deref().unwrap_or("Unknown error"),
                    err.detail.as_deref().unwrap_or("")
                )
            })
            .collect();
        return format!("❌ Error searching flights:\n{}", messages.join("\n"));
    }

    let offers = match &response.data {
        Some(offers) if !offers.is_empty() => offers,
        _ => return "No flights found for your search criteria. Try different dates or airports.".to_string(),
    };

    let mut lines = vec!["✈️  FLIGHT SEARCH RESULTS".to_string(), "=".repeat(80)];

    for (idx, offer) in offers.iter().take(MAX_OFFERS_SHOWN).enumerate() {
        lines.push(format!("\n🎫 Option {}: {} {}", idx + 1, offer.price.currency, offer.price.total));
        lines.push("-".repeat(40));

        for (itinerary_idx, itinerary) in offer.itineraries.iter().enumerate() {
            lines.push(if itinerary_idx == 0 { "OUTBOUND:" } else { "\nRETURN:" }.to_string());

            for seg in &itinerary.segments {
                lines.push(format!(
                    "  {}{}: {} → {}",
                    seg.carrier_code, seg.number, seg.departure.iata_code, seg.arrival.iata_code
                ));
                lines.push(format!("  Depart: {}", seg.departure.at.replace('T', " ")));
                lines.push(format!("  Arrive: {}", seg.arrival.at.replace('T', " ")));
            }
            lines.push(format!("Duration: {}", itinerary.duration));
        }
    }

    lines.push(format!("\n{}", "=".repeat(80)));
    lines.push(format!("Total results: {} flights found", offers.len()));

    lines.join("\n")
}

pub fn format_airport_results(response: &LocationsResponse) -> String {
    if let Some(errors) = &response.errors {
        let detail = errors
            .first()
            .and_then(|e| e.detail.as_deref())
            .unwrap_or("Unknown error");
        return format!("❌ Error: {}", detail);
    }

    let locations = match &response.data {
        Some(locations) if !locations.is_empty() => locations,
        _ => return "No airports found. Try a different search term.".to_string(),
    };

    let mut lines = vec!["🛫 AIRPORT SEARCH RESULTS".to_string(), "=".repeat(60)];

    for location in locations {
        let address = location.address.as_ref();
        let city = address.and_then(|a| a.city_name.as_deref()).unwrap_or("Unknown");
        let country = address.and_then(|a| a.country_name.as_deref()).unwrap_or("Unknown");

        lines.push(format!(
            "\n📍 {} ({})",
            location.name.as_deref().unwrap_or("Unknown"),
            location.iata_code.as_deref().unwrap_or("N/A")
        ));
        lines.push(format!("   Location: {}, {}", city, country));
    }

    lines.push(format!("\n{}", "=".repeat(60)));

    lines.join("\n")
}
