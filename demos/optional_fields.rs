//! Example demonstrating Option<T> destinations

use chrono::{DateTime, Utc};
use typedenv::{lookup_direct, required_direct, scan};

fn main() -> anyhow::Result<()> {
    // Set only some environment variables
    std::env::set_var("APP_NAME", "my-application");
    std::env::set_var("PORT", "8080");
    std::env::set_var("MAINTENANCE_FROM", "2024-05-01T22:00:00+02:00");
    // API_KEY and DEBUG are not set

    let mut app_name = String::new();
    let mut api_key: Option<String> = None;
    let mut port: Option<u16> = None;
    let mut debug: Option<bool> = None;
    let mut maintenance_from: Option<Box<DateTime<Utc>>> = None;

    scan([
        required_direct("APP_NAME", &mut app_name),
        // Allocated only when the variable is set
        lookup_direct("API_KEY", &mut api_key),
        lookup_direct("PORT", &mut port),
        lookup_direct("DEBUG", &mut debug),
        lookup_direct("MAINTENANCE_FROM", &mut maintenance_from),
    ])?;

    println!("Configuration:");
    println!("  App Name: {}", app_name);
    println!("  API Key: {:?}", api_key); // None
    println!("  Port: {:?}", port); // Some(8080)
    println!("  Debug: {:?}", debug); // None
    println!("  Maintenance From: {:?}", maintenance_from); // Some(2024-05-01T20:00:00Z)

    Ok(())
}
