//! Newtype shape detection for `#[derive(Underlying)]`.
//!
//! The wrapped type decides which traits are generated: `Vec<T>` becomes a
//! sequence, `HashSet<T>` a set, anything else a scalar. The syntactic guess
//! can be overridden with `#[underlying(scalar | sequence | set)]`, e.g. for a
//! newtype over another derived sequence.

use syn::{Attribute, Data, DeriveInput, Fields, Member, Type};

/// Which trait family a newtype delegates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `Underlying` + `Destination`
    Scalar,
    /// `CastSequence`
    Sequence,
    /// `CastSet`
    Set,
}

/// The single field of a derived newtype.
#[derive(Debug)]
pub struct Newtype<'a> {
    /// `0` for tuple structs, the field name otherwise
    pub member: Member,
    /// Wrapped type
    pub inner: &'a Type,
    pub shape: Shape,
}

impl<'a> Newtype<'a> {
    /// Extract the wrapped field and its shape from a derive input.
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        if !input.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &input.generics,
                "Underlying cannot be derived for generic types",
            ));
        }

        let fields = match &input.data {
            Data::Struct(data) => &data.fields,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Underlying only supports structs",
                ));
            }
        };

        let field = match fields {
            Fields::Named(named) if named.named.len() == 1 => &named.named[0],
            Fields::Unnamed(unnamed) if unnamed.unnamed.len() == 1 => &unnamed.unnamed[0],
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Underlying only supports structs with exactly one field",
                ));
            }
        };

        let member = match &field.ident {
            Some(ident) => Member::Named(ident.clone()),
            None => Member::Unnamed(0.into()),
        };

        let shape = match shape_override(&input.attrs)? {
            Some(shape) => shape,
            None => detect(&field.ty),
        };

        Ok(Self {
            member,
            inner: &field.ty,
            shape,
        })
    }
}

/// Guess the shape from the last path segment of the wrapped type
pub fn detect(ty: &Type) -> Shape {
    if let Type::Path(type_path) = ty {
        if let Some(seg) = type_path.path.segments.last() {
            if seg.ident == "Vec" {
                return Shape::Sequence;
            }
            if seg.ident == "HashSet" {
                return Shape::Set;
            }
        }
    }
    Shape::Scalar
}

/// Parse `#[underlying(...)]` on the struct
fn shape_override(attrs: &[Attribute]) -> syn::Result<Option<Shape>> {
    let mut shape = None;

    for attr in attrs {
        if !attr.path().is_ident("underlying") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            let parsed = if meta.path.is_ident("scalar") {
                Shape::Scalar
            } else if meta.path.is_ident("sequence") {
                Shape::Sequence
            } else if meta.path.is_ident("set") {
                Shape::Set
            } else {
                return Err(meta.error("expected `scalar`, `sequence` or `set`"));
            };
            if shape.replace(parsed).is_some() {
                return Err(meta.error("shape specified more than once"));
            }
            Ok(())
        })?;
    }

    Ok(shape)
}
