//! Basic usage example

use std::time::Duration;

use tracing_subscriber::EnvFilter;
use typedenv::{default_direct, lookup_direct, required_direct, scan};

fn main() -> anyhow::Result<()> {
    // RUST_LOG=typedenv=debug shows how every binding was resolved
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Set environment variables for demonstration
    std::env::set_var("DATABASE_URL", "postgres://localhost/mydb");
    std::env::set_var("SERVER_ADDR", "0.0.0.0:3000");

    let mut database_url = String::new();
    let mut server_addr = String::new();
    let mut max_connections = 0_u32;
    let mut request_timeout = Duration::ZERO;
    let mut debug_mode = false;

    scan([
        // Required: fails if DATABASE_URL is not set
        required_direct("DATABASE_URL", &mut database_url),
        // With default values
        default_direct("SERVER_ADDR", &mut server_addr, "127.0.0.1:8080"),
        default_direct("MAX_CONNECTIONS", &mut max_connections, "10"),
        default_direct("REQUEST_TIMEOUT", &mut request_timeout, "1m30s"),
        // Left at false unless DEBUG_MODE is set
        lookup_direct("DEBUG_MODE", &mut debug_mode),
    ])?;

    println!("Configuration loaded:");
    println!("  Database URL: {}", database_url);
    println!("  Server Address: {}", server_addr);
    println!("  Max Connections: {}", max_connections);
    println!("  Request Timeout: {:?}", request_timeout);
    println!("  Debug Mode: {}", debug_mode);

    Ok(())
}
