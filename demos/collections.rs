//! Example demonstrating sequence and set bindings

use std::collections::HashSet;

use typedenv::{scan, sequence, set, Binding};

fn main() -> anyhow::Result<()> {
    std::env::set_var("UPSTREAMS", "10.0.0.1:80,10.0.0.2:80");
    std::env::set_var("RETRY_BACKOFF_MS", "100:250:1000");
    std::env::set_var("ROLES", "admin,reader,admin");

    let mut upstreams: Vec<String> = Vec::new();
    let mut retry_backoff_ms: Vec<u64> = Vec::new();
    let mut roles: HashSet<String> = HashSet::new();
    let mut weights: Vec<f64> = Vec::new();

    scan([
        // Split on ',' by default, order is kept
        Binding::required("UPSTREAMS", sequence(&mut upstreams)),
        // Any separator string works
        Binding::required("RETRY_BACKOFF_MS", sequence(&mut retry_backoff_ms).separator(":")),
        // Duplicates collapse
        Binding::required("ROLES", set(&mut roles)),
        Binding::with_default("WEIGHTS", sequence(&mut weights), "0.5,0.25,0.25"),
    ])?;

    println!("Configuration loaded:");
    println!("  Upstreams: {:?}", upstreams);
    println!("  Retry Backoff (ms): {:?}", retry_backoff_ms);
    println!("  Roles: {:?}", roles);
    println!("  Weights: {:?}", weights);

    Ok(())
}
