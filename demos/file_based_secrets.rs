//! Example demonstrating file-based secrets (Kubernetes/Docker style)

use std::io::Write;

use typedenv::{required_direct, scan};

fn main() -> anyhow::Result<()> {
    // Simulate a mounted secret file
    let mut secret_file = tempfile::NamedTempFile::new()?;
    writeln!(secret_file, "s3cr3t-from-file")?;

    // Production: only API_KEY_FILE is set
    std::env::remove_var("API_KEY");
    std::env::set_var("API_KEY_FILE", secret_file.path());
    // Local development: the plain variable wins when both are set
    std::env::set_var("DATABASE_PASSWORD", "local-password");

    let mut api_key = String::new();
    let mut database_password = String::new();

    scan([
        required_direct("API_KEY", &mut api_key).from_file(),
        required_direct("DATABASE_PASSWORD", &mut database_password).from_file(),
    ])?;

    println!("Secrets loaded:");
    println!("  API Key: {} chars", api_key.len());
    println!("  Database Password: {} chars", database_password.len());

    Ok(())
}
