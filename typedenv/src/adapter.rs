//! Handlers that decode one environment value into a destination
//!
//! [`Direct`] resolves the whole value, [`Sequence`] and [`Set`] split it on
//! a separator (`,` unless overridden) and resolve every field on its own.
//! Any `FnMut(&str) -> Result<(), Error>` closure is a handler too.

use std::collections::HashSet;
use std::hash::Hash;

use crate::error::Error;
use crate::underlying::{convert, CastSequence, CastSet, Destination};

/// Separator used by [`Sequence`] and [`Set`] unless overridden
pub const DEFAULT_SEPARATOR: &str = ",";

/// Decode a string into the destination a handler was built for.
pub trait Decode {
    /// # Errors
    ///
    /// Returns the conversion error of the first field that fails.
    fn decode(&mut self, source: &str) -> Result<(), Error>;
}

impl<F> Decode for F
where
    F: FnMut(&str) -> Result<(), Error>,
{
    fn decode(&mut self, source: &str) -> Result<(), Error> {
        self(source)
    }
}

/// Handler resolving the whole value into a single destination.
#[derive(Debug)]
pub struct Direct<'a, D: Destination + ?Sized> {
    target: &'a mut D,
}

/// Build a [`Direct`] handler for `target`
pub fn direct<D: Destination + ?Sized>(target: &mut D) -> Direct<'_, D> {
    Direct { target }
}

impl<D: Destination + ?Sized> Decode for Direct<'_, D> {
    fn decode(&mut self, source: &str) -> Result<(), Error> {
        let value = convert::<D::Target>(source)?;
        *self.target.allocate() = value;
        Ok(())
    }
}

/// Resolve one field into a freshly allocated element
fn element<T: Destination>(field: &str) -> Result<T, Error> {
    let value = convert::<T::Target>(field)?;
    let mut elem = T::vacant();
    *elem.allocate() = value;
    Ok(elem)
}

/// Handler resolving separated fields into an ordered `Vec`.
#[derive(Debug)]
pub struct Sequence<'a, T> {
    target: &'a mut Vec<T>,
    separator: String,
}

/// Build a [`Sequence`] handler for `target`, which may be a derived sequence
pub fn sequence<S: CastSequence + ?Sized>(target: &mut S) -> Sequence<'_, S::Elem> {
    Sequence {
        target: target.cast_sequence(),
        separator: DEFAULT_SEPARATOR.to_string(),
    }
}

impl<T> Sequence<'_, T> {
    /// Split on `separator` instead of `,`
    #[must_use]
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }
}

impl<T: Destination> Decode for Sequence<'_, T> {
    fn decode(&mut self, source: &str) -> Result<(), Error> {
        let values = split(source, &self.separator)
            .into_iter()
            .map(element::<T>)
            .collect::<Result<Vec<_>, _>>()?;
        *self.target = values;
        Ok(())
    }
}

/// Handler resolving separated fields into a `HashSet`, dropping duplicates.
#[derive(Debug)]
pub struct Set<'a, T> {
    target: &'a mut HashSet<T>,
    separator: String,
}

/// Build a [`Set`] handler for `target`, which may be a derived set
pub fn set<S: CastSet + ?Sized>(target: &mut S) -> Set<'_, S::Elem> {
    Set {
        target: target.cast_set(),
        separator: DEFAULT_SEPARATOR.to_string(),
    }
}

impl<T> Set<'_, T> {
    /// Split on `separator` instead of `,`
    #[must_use]
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }
}

impl<T: Destination + Eq + Hash> Decode for Set<'_, T> {
    fn decode(&mut self, source: &str) -> Result<(), Error> {
        let values = split(source, &self.separator)
            .into_iter()
            .map(element::<T>)
            .collect::<Result<HashSet<_>, _>>()?;
        *self.target = values;
        Ok(())
    }
}

/// Split `source` around every `separator`.
///
/// An empty separator splits after each character.
fn split<'s>(source: &'s str, separator: &str) -> Vec<&'s str> {
    if separator.is_empty() {
        return source
            .char_indices()
            .map(|(i, c)| &source[i..i + c.len_utf8()])
            .collect();
    }
    source.split(separator).collect()
}
