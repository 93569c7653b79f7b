//! Zero-copy views of derived containers as their base container

use std::collections::HashSet;
use std::hash::Hash;

use super::Destination;

/// A sequence whose storage is a `Vec` of destinations.
///
/// `#[derive(Underlying)]` implements this for newtypes over `Vec<T>`, so
/// adapters can fill `struct Tags(Vec<Tag>)` as if it were `Vec<Tag>`.
/// Elements may carry indirection themselves, as in `Vec<Option<u16>>`.
pub trait CastSequence {
    type Elem: Destination;

    /// Borrow the backing `Vec`. Mutations are visible through `self`.
    fn cast_sequence(&mut self) -> &mut Vec<Self::Elem>;
}

/// A set whose storage is a `HashSet` of destinations.
pub trait CastSet {
    type Elem: Destination + Eq + Hash;

    /// Borrow the backing `HashSet`. Mutations are visible through `self`.
    fn cast_set(&mut self) -> &mut HashSet<Self::Elem>;
}

impl<T: Destination> CastSequence for Vec<T> {
    type Elem = T;

    fn cast_sequence(&mut self) -> &mut Vec<T> {
        self
    }
}

impl<T: Destination + Eq + Hash> CastSet for HashSet<T> {
    type Elem = T;

    fn cast_set(&mut self) -> &mut HashSet<T> {
        self
    }
}

/// View a (possibly derived) sequence as `Vec<Elem>`
pub fn cast_sequence<S: CastSequence + ?Sized>(val: &mut S) -> &mut Vec<S::Elem> {
    val.cast_sequence()
}

/// View a (possibly derived) set as `HashSet<Elem>`
pub fn cast_set<S: CastSet + ?Sized>(val: &mut S) -> &mut HashSet<S::Elem> {
    val.cast_set()
}
