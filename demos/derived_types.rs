//! Example demonstrating derived (newtype) destinations

use std::collections::HashSet;
use std::time::Duration;

use typedenv::{default_direct, lookup_direct, scan, sequence, set, Binding, Underlying};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Underlying)]
struct Port(u16);

#[derive(Debug, Underlying)]
struct Ports(Vec<Port>);

#[derive(Debug, Underlying)]
struct Labels(HashSet<String>);

#[derive(Debug, Underlying)]
struct GracePeriod(Duration);

fn main() -> anyhow::Result<()> {
    std::env::set_var("LISTEN_PORTS", "8080,8443");
    std::env::set_var("LABELS", "team=core|tier=1|team=core");

    let mut admin_port = Port(0);
    let mut listen_ports = Ports(Vec::new());
    let mut labels = Labels(HashSet::new());
    let mut grace_period: Option<GracePeriod> = None;

    scan([
        default_direct("ADMIN_PORT", &mut admin_port, "9000"),
        Binding::required("LISTEN_PORTS", sequence(&mut listen_ports)),
        Binding::required("LABELS", set(&mut labels).separator("|")),
        lookup_direct("GRACE_PERIOD", &mut grace_period),
    ])?;

    println!("Configuration loaded:");
    println!("  Admin Port: {:?}", admin_port);
    println!("  Listen Ports: {:?}", listen_ports);
    println!("  Labels: {:?}", labels);
    println!("  Grace Period: {:?}", grace_period);

    Ok(())
}
