/// Environment validator for the trip planning MCP servers
///
/// Checks the .env file, every API key, and the vendor APIs behind them.
/// Exits with status 1 when any check fails.

mod checks;

use std::path::Path;

use anyhow::Result;

use checks::Outcome;
use flights_mcp::FlightsConfig;
use research_mcp::ResearchConfig;
use trip_protocol::{check_api_key, KeyStatus};

const GREEN: &str = "\x1b[92m";
const RED: &str = "\x1b[91m";
const YELLOW: &str = "\x1b[93m";
const BLUE: &str = "\x1b[94m";
const PURPLE: &str = "\x1b[95m";
const CYAN: &str = "\x1b[96m";
const BOLD: &str = "\x1b[1m";
const END: &str = "\x1b[0m";

const REQUIRED_KEYS: &[&str] = &["OPENAI_API_KEY", "SERPER_API_KEY", "HYPERBROWSER_API_KEY"];
const OPTIONAL_KEYS: &[&str] = &["AMADEUS_API_KEY", "AMADEUS_API_SECRET"];

fn print_banner(title: &str) {
    println!("\n{CYAN}{BOLD}╔════════════════════════════════════════════════════════════╗");
    println!("║ {:<58} ║", title);
    println!("╚════════════════════════════════════════════════════════════╝{END}\n");
}

fn print_key_status(name: &str, status: &KeyStatus, required: bool) {
    match status {
        KeyStatus::Valid { .. } => println!("{GREEN}✅ {}: {}{END}", name, status),
        _ if required => println!("{RED}❌ {}: {}{END}", name, status),
        _ => println!("{YELLOW}⚠️  {}: {} (optional){END}", name, status),
    }
}

fn print_outcome(name: &str, outcome: &Outcome) {
    match outcome {
        Outcome::Pass(msg) => println!("{GREEN}✅ {}: {}{END}", name, msg),
        Outcome::Warn(msg) => println!("{YELLOW}⚠️  {}: {}{END}", name, msg),
        Outcome::Fail(msg) => println!("{RED}❌ {}: {}{END}", name, msg),
    }
}

fn verdict(passed: usize, total: usize) -> String {
    if passed == total {
        format!("{GREEN}{BOLD}🎉 All tests passed! Your MCP servers are ready to go!{END}")
    } else if passed + 1 >= total {
        format!("{YELLOW}{BOLD}⚠️  Almost there! Fix the failing test and you're good to go!{END}")
    } else {
        format!("{RED}{BOLD}❌ Several issues found. Please fix the API keys and try again.{END}")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    print_banner("🔍 ENV VALIDATOR & TESTER - Trip Planning MCP Servers");

    println!("{BLUE}📁 Checking for .env file...{END}");
    if !checks::ensure_env_file(Path::new(".env"))? {
        println!("{RED}❌ .env file not found!{END}");
        println!("{GREEN}✅ Template .env file created!{END}");
        println!("{YELLOW}Please edit the .env file with your API keys and run this again!{END}");
        return Ok(());
    }
    println!("{GREEN}✅ .env file found!{END}");

    println!("\n{BLUE}🔄 Loading environment variables...{END}");
    dotenv::dotenv().ok();

    let mut required_ok = true;
    for name in REQUIRED_KEYS {
        let status = check_api_key(std::env::var(name).ok().as_deref());
        required_ok &= status.is_valid();
        print_key_status(name, &status, true);
    }
    let mut amadeus_ok = true;
    for name in OPTIONAL_KEYS {
        let status = check_api_key(std::env::var(name).ok().as_deref());
        amadeus_ok &= status.is_valid();
        print_key_status(name, &status, false);
    }

    if !required_ok {
        println!("\n{RED}Please fix the .env file and try again!{END}");
        std::process::exit(1);
    }

    let research = ResearchConfig::from_env();
    let flights = FlightsConfig::from_env();
    let mut results: Vec<(&str, Outcome)> = Vec::new();

    println!("\n{PURPLE}🤖 Testing OpenAI API...{END}");
    results.push(("OpenAI API", checks::check_openai(&research).await));

    println!("{PURPLE}🔍 Testing Serper API...{END}");
    results.push(("Serper API", checks::check_serper(&research).await));

    println!("{PURPLE}🌐 Testing Hyperbrowser API...{END}");
    results.push(("Hyperbrowser API", checks::check_hyperbrowser(&research)));

    if amadeus_ok {
        println!("{PURPLE}✈️  Testing Amadeus API...{END}");
        results.push(("Amadeus API", checks::check_amadeus(&flights).await));
    }

    println!("{PURPLE}🔧 Testing MCP tool registries...{END}");
    results.push(("MCP Tool Registries", checks::check_tool_registries(&research, &flights)));

    print_banner("📊 TEST SUMMARY");
    for (name, outcome) in &results {
        print_outcome(name, outcome);
    }

    let total = results.len();
    let passed = results.iter().filter(|(_, o)| o.passed()).count();
    println!("\n{BOLD}Overall: {}/{} tests passed{END}", passed, total);
    println!("{}", verdict(passed, total));

    if passed != total {
        std::process::exit(1);
    }
    Ok(())
}
