//! Derive macro implementation for typedenv

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

mod shape;

use shape::{Newtype, Shape};

/// `Underlying` derive macro
///
/// Lets a single-field struct stand in for the type it wraps.
///
/// - Over a scalar (`u16`, `String`, `Duration`, another derived scalar, ...):
///   implements `Underlying` and `Destination`, so the newtype resolves with
///   the wrapped type's kind, also behind `Option`/`Box`.
/// - Over `Vec<T>`: implements `CastSequence`.
/// - Over `HashSet<T>`: implements `CastSet`.
///
/// # Supported Attributes
///
/// **Struct-level**:
/// - `#[underlying(scalar)]`, `#[underlying(sequence)]`, `#[underlying(set)]`:
///   force the shape instead of guessing it from the wrapped type's name
///
/// # Example
///
/// See the `typedenv` crate documentation for usage examples.
#[proc_macro_derive(Underlying, attributes(underlying))]
pub fn derive_underlying(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let newtype = match Newtype::from_input(&input) {
        Ok(newtype) => newtype,
        Err(e) => return e.to_compile_error().into(),
    };

    let name = &input.ident;
    let member = &newtype.member;
    let inner = newtype.inner;

    let expanded = match newtype.shape {
        Shape::Scalar => quote! {
            impl ::typedenv::Underlying for #name {
                const KIND: ::typedenv::Kind = <#inner as ::typedenv::Underlying>::KIND;

                fn zero() -> Self {
                    Self { #member: <#inner as ::typedenv::Underlying>::zero() }
                }

                fn from_canonical(value: ::typedenv::Canonical) -> ::std::option::Option<Self> {
                    <#inner as ::typedenv::Underlying>::from_canonical(value)
                        .map(|inner| Self { #member: inner })
                }
            }

            impl ::typedenv::Destination for #name {
                type Target = Self;
                type Depth = ::typedenv::depth::Zero;

                fn vacant() -> Self {
                    <Self as ::typedenv::Underlying>::zero()
                }

                fn allocate(&mut self) -> &mut Self {
                    self
                }
            }
        },
        Shape::Sequence => quote! {
            impl ::typedenv::CastSequence for #name {
                type Elem = <#inner as ::typedenv::CastSequence>::Elem;

                fn cast_sequence(&mut self) -> &mut ::std::vec::Vec<Self::Elem> {
                    ::typedenv::CastSequence::cast_sequence(&mut self.#member)
                }
            }
        },
        Shape::Set => quote! {
            impl ::typedenv::CastSet for #name {
                type Elem = <#inner as ::typedenv::CastSet>::Elem;

                fn cast_set(&mut self) -> &mut ::std::collections::HashSet<Self::Elem> {
                    ::typedenv::CastSet::cast_set(&mut self.#member)
                }
            }
        },
    };

    TokenStream::from(expanded)
}
