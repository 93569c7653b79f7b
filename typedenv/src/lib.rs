//! Typed environment variable bindings
//!
//! `typedenv` reads raw strings from the process environment and converts
//! them into strongly-typed variables you already own. Instead of parsing
//! and error-handling every variable by hand, you declare a list of
//! bindings and [`scan`] them in one go.
//!
//! # Features
//!
//! - **Declarative**: one [`Binding`] per variable, evaluated in order
//! - **Policies**: required, default value, or optional lookup
//! - **Derived types**: newtypes via `#[derive(Underlying)]` resolve like their inner type
//! - **Indirection**: `Option<T>`, `Box<T>` and two-level chains are allocated on write
//! - **Collections**: comma (or custom) separated `Vec` and `HashSet` values
//! - **File-based secrets**: optional `{VAR}_FILE` fallback per binding
//!
//! # Value Parsing
//!
//! | kind             | types                                     | accepted text                  |
//! |------------------|-------------------------------------------|--------------------------------|
//! | signed integer   | `i8`..`i64`, `isize`                      | `-42`, `+7`                    |
//! | unsigned integer | `u8`..`u64`, `usize`                      | `42`                           |
//! | float            | `f32`, `f64`                              | `1.5`, `-2e3`, `inf`           |
//! | string           | `String`                                  | anything                       |
//! | bool             | `bool`                                    | `1 t T TRUE true True` / `0 f F FALSE false False` |
//! | timestamp        | `DateTime<FixedOffset>`, `DateTime<Utc>`  | RFC 3339, e.g. `2011-03-11T14:45:00+09:00` |
//! | duration         | `std::time::Duration`, `chrono::TimeDelta`| `30s`, `1h30m`, `-1.5h`, `0`   |
//!
//! Integers are parsed at 64-bit width and then cast to the declared width.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use typedenv::{default_direct, lookup_direct, required_direct, scan, sequence, Binding};
//!
//! # fn main() -> anyhow::Result<()> {
//! std::env::set_var("DATABASE_URL", "postgres://localhost/db");
//! std::env::set_var("ALLOWED_PORTS", "80,443");
//!
//! let mut database_url = String::new();
//! let mut timeout = Duration::ZERO;
//! let mut debug: Option<bool> = None;
//! let mut allowed_ports: Vec<u16> = Vec::new();
//!
//! scan([
//!     required_direct("DATABASE_URL", &mut database_url),
//!     default_direct("APP_TIMEOUT", &mut timeout, "30s"),
//!     lookup_direct("APP_DEBUG", &mut debug),
//!     Binding::required("ALLOWED_PORTS", sequence(&mut allowed_ports)),
//! ])?;
//!
//! assert_eq!(database_url, "postgres://localhost/db");
//! assert_eq!(timeout, Duration::from_secs(30));
//! assert_eq!(debug, None);
//! assert_eq!(allowed_ports, [80, 443]);
//! # Ok(())
//! # }
//! ```
//!
//! # Derived types
//!
//! A single-field struct over a supported type resolves like that type.
//! Over `Vec<T>` or `HashSet<T>` it works with [`sequence`] and [`set`].
//!
//! ```rust
//! use std::collections::HashSet;
//! use typedenv::{default_direct, scan, set, Binding, Underlying};
//!
//! #[derive(Debug, PartialEq, Eq, Hash, Underlying)]
//! struct Port(u16);
//!
//! #[derive(Debug, Underlying)]
//! struct Features(HashSet<String>);
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut port = Port(0);
//! let mut features = Features(HashSet::new());
//!
//! scan([
//!     default_direct("DERIVED_PORT", &mut port, "8080"),
//!     Binding::with_default("DERIVED_FEATURES", set(&mut features).separator(":"), "a:b:a"),
//! ])?;
//!
//! assert_eq!(port, Port(8080));
//! assert_eq!(features.0.len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! # Empty values
//!
//! A variable set to the empty string is treated as if it were not set at
//! all, and neither the required check nor the default applies to it.

// Lets derive output refer to `::typedenv` from inside this crate.
extern crate self as typedenv;

mod adapter;
mod error;
mod scan;
mod underlying;

pub use adapter::{direct, sequence, set, Decode, Direct, Sequence, Set, DEFAULT_SEPARATOR};
pub use error::Error;
pub use scan::{default_direct, lookup_direct, required_direct, scan, scan_with, Binding, Policy};
pub use typedenv_derive::Underlying;
pub use underlying::{
    cast_sequence, cast_set, classify, classify_any, convert, depth, resolve, resolve_any,
    Canonical, CastSequence, CastSet, Destination, DynDestination, Kind, Underlying,
};
