/// User guide returned by the `flight_booking_help` tool
pub const FLIGHT_BOOKING_HELP: &str = r#"
🛫 FLIGHT BOOKING AGENT - USER GUIDE
═══════════════════════════════════════════════════════════════════

📋 AVAILABLE TOOLS:

1. find_airports(search_term)
   - Find airport codes by city or airport name
   - Example: find_airports("Naples")

2. search_flights(origin, destination, departure_date, return_date, adults, travel_class)
   - Search for available flights with pricing
   - Example: search_flights("JFK", "NAP", "2025-03-15", "2025-03-22", 2)

⚙️  SETUP REQUIRED:

1. Sign up at https://developers.amadeus.com/
2. Create a new app (self-service)
3. Copy your API Key and API Secret
4. Add to .env file:
   AMADEUS_API_KEY=your_api_key_here
   AMADEUS_API_SECRET=your_api_secret_here

📝 USAGE WORKFLOW:

Step 1: Find airport codes
   find_airports("New York") → Get "JFK", "LGA", "EWR"
   find_airports("Naples") → Get "NAP"

Step 2: Search flights
   search_flights("JFK", "NAP", "2025-03-15", "2025-03-22", 2, "ECONOMY")

Step 3: Review results
   - Compare prices, airlines, and schedules
   - Note flight numbers and times

🎫 TRAVEL CLASSES:
   - ECONOMY (default)
   - PREMIUM_ECONOMY
   - BUSINESS
   - FIRST

💡 TIPS:
   - Use 3-letter IATA airport codes (e.g., JFK, LAX, CDG)
   - Dates must be in YYYY-MM-DD format
   - Up to 9 adult passengers per search
   - Book flights 2-3 months in advance for best prices
   - Tuesday and Wednesday are often cheapest
   - Consider flexible dates to find better deals

🔮 FUTURE FEATURES:
   - Direct flight booking (requires production API)
   - Seat selection
   - Baggage options
   - Hotel + Flight packages
   - Price alerts and tracking

For more info: https://developers.amadeus.com/self-service/category/flights
"#;
