//! Runtime classification for destinations only known as `dyn Any`

use std::any::{Any, TypeId};
use std::time::Duration;

use chrono::{DateTime, FixedOffset, TimeDelta, Utc};

use super::kind::Kind;
use super::{resolve, Destination, Underlying};
use crate::error::Error;

macro_rules! for_each_shape {
    ($apply:ident!()) => {
        for_each_shape!(@types $apply;
            i8, i16, i32, i64, isize,
            u8, u16, u32, u64, usize,
            f32, f64,
            String, bool,
            DateTime<FixedOffset>, DateTime<Utc>,
            TimeDelta, Duration
        )
    };
    (@types $apply:ident; $($ty:ty),+) => {$(
        $apply!($ty);
        $apply!(Option<$ty>);
        $apply!(Box<$ty>);
        $apply!(Option<Option<$ty>>);
        $apply!(Option<Box<$ty>>);
        $apply!(Box<Option<$ty>>);
        $apply!(Box<Box<$ty>>);
    )+};
}

fn kind_if<D: Destination + 'static>(id: TypeId) -> Option<Kind> {
    (id == TypeId::of::<D>()).then_some(<D::Target as Underlying>::KIND)
}

/// Classify `T` by its runtime type id.
///
/// Recognizes the built-in scalars and their `Option`/`Box` shapes up to two
/// levels. Returns `None` for anything else. A type id carries no trait
/// information, so derived newtypes are not recognized here; erase them as
/// [`DynDestination`] instead.
pub fn classify_any<T: ?Sized + Any>() -> Option<Kind> {
    let id = TypeId::of::<T>();
    macro_rules! check {
        ($ty:ty) => {
            if let Some(kind) = kind_if::<$ty>(id) {
                return Some(kind);
            }
        };
    }
    for_each_shape!(check!());
    None
}

/// Resolve `source` into a destination whose type is only checked at runtime.
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] for every input when
/// [`classify_any`] does not recognize `T`, and otherwise whatever
/// [`resolve`] returns.
///
/// Derived newtypes are reported as unsupported by this function. Use
/// [`DynDestination`] when heterogeneous destinations include them.
pub fn resolve_any<T: Any>(source: &str, dest: &mut T) -> Result<(), Error> {
    let dest: &mut dyn Any = dest;
    macro_rules! attempt {
        ($ty:ty) => {
            if let Some(d) = dest.downcast_mut::<$ty>() {
                return resolve(source, d);
            }
        };
    }
    for_each_shape!(attempt!());
    tracing::trace!(r#type = std::any::type_name::<T>(), "no underlying kind");
    Err(Error::unsupported::<T>())
}

/// Object-safe view of a [`Destination`].
///
/// Every destination, derived newtypes included, can be erased to
/// `&mut dyn DynDestination` and resolved without knowing its type.
///
/// ```rust
/// use typedenv::DynDestination;
///
/// #[derive(Debug, PartialEq, typedenv::Underlying)]
/// struct Port(u16);
///
/// let mut port = Port(0);
/// let mut name = String::new();
/// let targets: [(&str, &mut dyn DynDestination); 2] = [("8080", &mut port), ("api", &mut name)];
/// for (source, target) in targets {
///     target.resolve_from(source)?;
/// }
/// assert_eq!(port, Port(8080));
/// assert_eq!(name, "api");
/// # Ok::<(), typedenv::Error>(())
/// ```
pub trait DynDestination {
    /// Kind of the scalar at the end of the indirection chain
    fn kind(&self) -> Kind;

    /// Resolve `source` into `self`, as [`resolve`] does.
    ///
    /// # Errors
    ///
    /// See [`convert`](super::convert).
    fn resolve_from(&mut self, source: &str) -> Result<(), Error>;
}

impl<D: Destination> DynDestination for D {
    fn kind(&self) -> Kind {
        <D::Target as Underlying>::KIND
    }

    fn resolve_from(&mut self, source: &str) -> Result<(), Error> {
        resolve(source, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, crate::Underlying)]
    struct Port(u16);

    #[test]
    fn test_classify_builtin_shapes() {
        assert_eq!(classify_any::<u8>(), Some(Kind::Unsigned));
        assert_eq!(classify_any::<Option<i16>>(), Some(Kind::Signed));
        assert_eq!(classify_any::<Option<Option<f32>>>(), Some(Kind::Float));
        assert_eq!(classify_any::<Option<Box<String>>>(), Some(Kind::Text));
        assert_eq!(classify_any::<Duration>(), Some(Kind::Duration));
        assert_eq!(classify_any::<DateTime<Utc>>(), Some(Kind::Timestamp));
        assert_eq!(classify_any::<Box<Option<u16>>>(), Some(Kind::Unsigned));
        assert_eq!(classify_any::<Box<Box<bool>>>(), Some(Kind::Bool));
    }

    #[test]
    fn test_classify_unknown() {
        struct Hoge;
        assert_eq!(classify_any::<Hoge>(), None);
        assert_eq!(classify_any::<Vec<i32>>(), None);
        assert_eq!(classify_any::<Option<Option<Option<i32>>>>(), None);
        assert_eq!(classify_any::<str>(), None);
    }

    #[test]
    fn test_resolve_any() {
        let mut port: Option<u16> = None;
        resolve_any("8080", &mut port).unwrap();
        assert_eq!(port, Some(8080));

        let mut timeout = Duration::ZERO;
        resolve_any("1m30s", &mut timeout).unwrap();
        assert_eq!(timeout, Duration::from_secs(90));
    }

    #[test]
    fn test_resolve_any_boxed_shapes() {
        let mut boxed_option: Box<Option<u16>> = Box::new(None);
        resolve_any("42", &mut boxed_option).unwrap();
        assert_eq!(*boxed_option, Some(42));

        let mut double_box: Box<Box<i8>> = Box::new(Box::new(0));
        resolve_any("-3", &mut double_box).unwrap();
        assert_eq!(**double_box, -3);
    }

    #[test]
    fn test_dyn_destination_accepts_derived_types() {
        let mut port = Port(0);
        let mut boxed: Box<Option<Port>> = Box::new(None);
        let mut timeout = Duration::ZERO;
        {
            let targets: [(&str, &mut dyn DynDestination); 3] =
                [("42", &mut port), ("43", &mut boxed), ("2s", &mut timeout)];
            assert_eq!(targets[0].1.kind(), Kind::Unsigned);
            assert_eq!(targets[2].1.kind(), Kind::Duration);
            for (source, target) in targets {
                target.resolve_from(source).unwrap();
            }
        }
        assert_eq!(port, Port(42));
        assert_eq!(*boxed, Some(Port(43)));
        assert_eq!(timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_dyn_destination_parse_error() {
        let mut port = Port(7);
        let target: &mut dyn DynDestination = &mut port;
        let err = target.resolve_from("http").unwrap_err();
        assert!(matches!(err, Error::Parse { kind: Kind::Unsigned, .. }));
        assert_eq!(port, Port(7));
    }

    #[test]
    fn test_resolve_any_unsupported() {
        #[derive(Debug, Default)]
        struct Hoge {
            _field: i32,
        }
        let mut hoge = Hoge::default();
        for input in ["hoge", "", "42"] {
            let err = resolve_any(input, &mut hoge).unwrap_err();
            assert!(matches!(err, Error::UnsupportedType { ref type_name } if type_name.ends_with("Hoge")));
        }
    }
}
