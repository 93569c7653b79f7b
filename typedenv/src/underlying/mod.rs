//! Underlying-type resolution
//!
//! A destination is classified into a [`Kind`], the source string is parsed
//! into a [`Canonical`] value for that kind, and the value is narrowed into
//! the destination's declared type and written through any `Option`/`Box`
//! indirection in front of it.

mod cast;
mod duration;
mod dynamic;
mod kind;
mod primitive;

pub use cast::{cast_sequence, cast_set, CastSequence, CastSet};
pub use dynamic::{classify_any, resolve_any, DynDestination};
pub use kind::{Canonical, Kind};
pub use primitive::{depth, Destination, Underlying};

use crate::error::Error;

/// Kind of the scalar at the end of `D`'s indirection chain
pub fn classify<D: Destination + ?Sized>() -> Kind {
    <D::Target as Underlying>::KIND
}

/// Parse `source` into a fresh `T` without touching any existing storage.
///
/// # Errors
///
/// Returns [`Error::Parse`] if `source` does not match `T`'s kind, or if the
/// parsed value cannot be represented by `T` at all.
pub fn convert<T: Underlying>(source: &str) -> Result<T, Error> {
    let kind = T::KIND;
    let value = kind.parse(source)?;
    T::from_canonical(value).ok_or_else(|| {
        Error::parse_error(
            kind,
            source,
            format_args!("value out of range for {}", std::any::type_name::<T>()),
        )
    })
}

/// Resolve `source` into `dest`.
///
/// Indirection levels are allocated before parsing, so on failure an
/// `Option` destination is left holding a zero value. A destination without
/// indirection is only written on success.
///
/// # Errors
///
/// See [`convert`].
///
/// # Example
///
/// ```rust
/// use typedenv::resolve;
///
/// let mut port: Option<u16> = None;
/// resolve("8080", &mut port)?;
/// assert_eq!(port, Some(8080));
/// # Ok::<(), typedenv::Error>(())
/// ```
pub fn resolve<D: Destination + ?Sized>(source: &str, dest: &mut D) -> Result<(), Error> {
    let kind = classify::<D>();
    tracing::trace!(%kind, r#type = std::any::type_name::<D>(), "resolving value");
    let slot = dest.allocate();
    *slot = convert(source)?;
    Ok(())
}
