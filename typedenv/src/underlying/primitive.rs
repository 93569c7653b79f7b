//! Scalar destinations and their indirection shapes

use std::time::Duration;

use chrono::{DateTime, FixedOffset, TimeDelta, Utc};

use super::kind::{Canonical, Kind};

/// A scalar type with a primitive underlying representation.
///
/// Implemented for the built-in integers, floats, `String`, `bool`, the
/// chrono timestamps and both duration types. Newtypes over any of these get
/// an implementation from `#[derive(Underlying)]` and inherit the inner kind.
pub trait Underlying: Sized {
    /// Kind this type reduces to
    const KIND: Kind;

    /// Freshly allocated zero value, used when indirection is allocated
    fn zero() -> Self;

    /// Narrow a canonical value into this type.
    ///
    /// Numeric values are converted with a plain `as` cast: no range check
    /// happens beyond the 64-bit parse. Returns `None` when the value cannot
    /// be represented at all (wrong kind, negative `std::time::Duration`).
    fn from_canonical(value: Canonical) -> Option<Self>;
}

macro_rules! impl_numeric {
    ($kind:ident => $($ty:ty),+ $(,)?) => {$(
        impl Underlying for $ty {
            const KIND: Kind = Kind::$kind;

            fn zero() -> Self {
                0 as $ty
            }

            #[allow(
                clippy::cast_possible_truncation,
                clippy::cast_possible_wrap,
                clippy::cast_sign_loss,
                clippy::cast_precision_loss,
                clippy::unnecessary_cast
            )]
            fn from_canonical(value: Canonical) -> Option<Self> {
                match value {
                    Canonical::$kind(v) => Some(v as $ty),
                    _ => None,
                }
            }
        }
    )+};
}

impl_numeric!(Signed => i8, i16, i32, i64, isize);
impl_numeric!(Unsigned => u8, u16, u32, u64, usize);
impl_numeric!(Float => f32, f64);

impl Underlying for String {
    const KIND: Kind = Kind::Text;

    fn zero() -> Self {
        String::new()
    }

    fn from_canonical(value: Canonical) -> Option<Self> {
        match value {
            Canonical::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl Underlying for bool {
    const KIND: Kind = Kind::Bool;

    fn zero() -> Self {
        false
    }

    fn from_canonical(value: Canonical) -> Option<Self> {
        match value {
            Canonical::Bool(b) => Some(b),
            _ => None,
        }
    }
}

impl Underlying for DateTime<FixedOffset> {
    const KIND: Kind = Kind::Timestamp;

    fn zero() -> Self {
        DateTime::<Utc>::UNIX_EPOCH.fixed_offset()
    }

    fn from_canonical(value: Canonical) -> Option<Self> {
        match value {
            Canonical::Timestamp(ts) => Some(ts),
            _ => None,
        }
    }
}

impl Underlying for DateTime<Utc> {
    const KIND: Kind = Kind::Timestamp;

    fn zero() -> Self {
        DateTime::<Utc>::UNIX_EPOCH
    }

    fn from_canonical(value: Canonical) -> Option<Self> {
        match value {
            Canonical::Timestamp(ts) => Some(ts.with_timezone(&Utc)),
            _ => None,
        }
    }
}

impl Underlying for TimeDelta {
    const KIND: Kind = Kind::Duration;

    fn zero() -> Self {
        TimeDelta::zero()
    }

    fn from_canonical(value: Canonical) -> Option<Self> {
        match value {
            Canonical::Duration(d) => Some(d),
            _ => None,
        }
    }
}

impl Underlying for Duration {
    const KIND: Kind = Kind::Duration;

    fn zero() -> Self {
        Duration::ZERO
    }

    fn from_canonical(value: Canonical) -> Option<Self> {
        match value {
            Canonical::Duration(d) => d.to_std().ok(),
            _ => None,
        }
    }
}

/// Type-level count of indirection levels, capped at two.
pub mod depth {
    /// No indirection
    pub enum Zero {}
    /// One level of `Option` or `Box`
    pub enum One {}
    /// Two levels, the maximum
    pub enum Two {}

    /// Levels that may be wrapped once more
    pub trait Deeper {
        type Next;
    }

    impl Deeper for Zero {
        type Next = One;
    }

    impl Deeper for One {
        type Next = Two;
    }
}

/// Storage for an [`Underlying`] value behind at most two levels of
/// indirection: `T`, `Option<T>`, `Box<T>`, `Option<Option<T>>`,
/// `Option<Box<T>>` and so on.
///
/// Three or more levels do not implement this trait, so they are rejected at
/// compile time.
pub trait Destination {
    /// The scalar at the end of the chain
    type Target: Underlying;

    /// Number of indirection levels in front of `Target`
    type Depth;

    /// Fresh storage of this shape with nothing written through it yet
    fn vacant() -> Self;

    /// Replace every indirection level with fresh storage and return the
    /// innermost slot. Previous contents are discarded.
    ///
    /// A bare `T` has no indirection and is returned as is.
    fn allocate(&mut self) -> &mut Self::Target;
}

impl<D> Destination for Option<D>
where
    D: Destination,
    D::Depth: depth::Deeper,
{
    type Target = D::Target;
    type Depth = <D::Depth as depth::Deeper>::Next;

    fn vacant() -> Self {
        None
    }

    fn allocate(&mut self) -> &mut Self::Target {
        self.insert(D::vacant()).allocate()
    }
}

impl<D> Destination for Box<D>
where
    D: Destination,
    D::Depth: depth::Deeper,
{
    type Target = D::Target;
    type Depth = <D::Depth as depth::Deeper>::Next;

    fn vacant() -> Self {
        Box::new(D::vacant())
    }

    fn allocate(&mut self) -> &mut Self::Target {
        **self = D::vacant();
        (**self).allocate()
    }
}

macro_rules! impl_destination {
    ($($ty:ty),+ $(,)?) => {$(
        impl Destination for $ty {
            type Target = $ty;
            type Depth = depth::Zero;

            fn vacant() -> Self {
                <$ty as Underlying>::zero()
            }

            fn allocate(&mut self) -> &mut $ty {
                self
            }
        }
    )+};
}

impl_destination!(
    i8, i16, i32, i64, isize,
    u8, u16, u32, u64, usize,
    f32, f64,
    String, bool,
    DateTime<FixedOffset>, DateTime<Utc>,
    TimeDelta, Duration,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrowing_truncates_like_a_cast() {
        assert_eq!(i8::from_canonical(Canonical::Signed(300)), Some(44));
        assert_eq!(u8::from_canonical(Canonical::Unsigned(256)), Some(0));
        assert_eq!(f32::from_canonical(Canonical::Float(0.5)), Some(0.5));
    }

    #[test]
    fn test_kind_mismatch_is_rejected() {
        assert_eq!(i32::from_canonical(Canonical::Unsigned(1)), None);
        assert_eq!(String::from_canonical(Canonical::Bool(true)), None);
    }

    #[test]
    fn test_negative_std_duration_is_rejected() {
        assert_eq!(
            Duration::from_canonical(Canonical::Duration(TimeDelta::seconds(-1))),
            None
        );
        assert_eq!(
            Duration::from_canonical(Canonical::Duration(TimeDelta::milliseconds(1500))),
            Some(Duration::from_millis(1500))
        );
    }

    #[test]
    fn test_utc_timestamp_converts_instant() {
        let ts = DateTime::parse_from_rfc3339("2011-03-11T14:45:00+09:00").unwrap();
        let utc = DateTime::<Utc>::from_canonical(Canonical::Timestamp(ts)).unwrap();
        assert_eq!(utc.to_rfc3339(), "2011-03-11T05:45:00+00:00");
    }

    #[test]
    fn test_allocate_discards_previous_value() {
        let mut single: Option<i32> = Some(7);
        assert_eq!(*single.allocate(), 0);
        assert_eq!(single, Some(0));

        let mut boxed: Box<String> = Box::new("old".to_string());
        assert_eq!(boxed.allocate().as_str(), "");

        let mut double: Option<Option<u16>> = None;
        *double.allocate() = 5;
        assert_eq!(double, Some(Some(5)));

        let mut chain: Option<Box<bool>> = None;
        *chain.allocate() = true;
        assert_eq!(chain, Some(Box::new(true)));

        let mut nested: Box<Option<f64>> = Box::new(Some(1.5));
        assert_eq!(*nested.allocate(), 0.0);
        assert_eq!(*nested, Some(0.0));
    }

    #[test]
    fn test_bare_value_is_not_reset() {
        let mut value = 9_u64;
        assert_eq!(*value.allocate(), 9);
    }
}
