//! Proc-macros for framepack.
//!
//! Currently provided:
//! - `#[derive(WithBuilders)]`: generates `with_<field>(...)` builder-style methods
//!   for each named field of a configuration struct.
//!
//! ## Field control
//! - `#[with_builders(skip)]`: no builder is generated for the field.
//! - `#[with_builders(into)]`: the builder takes `impl Into<T>`.
//! - `#[with_builders(some)]`: for `Option<T>` fields, the builder takes `T` and
//!   stores `Some(value)`.
//!
//! ### Example
//! ```ignore
//! use framepack_macros::WithBuilders;
//!
//! #[derive(Clone, Debug, WithBuilders)]
//! pub struct FrameConfig {
//!     pub width: f32,
//!     #[with_builders(some)]
//!     pub max_height: Option<f32>,
//!     #[with_builders(skip)]
//!     pub orientation: Orientation,
//! }
//!
//! let config = FrameConfig::vertical(200.0, 300.0, &defaults).with_max_height(150.0);
//! ```

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{
    parse_macro_input, spanned::Spanned, Data, DeriveInput, Fields, GenericArgument,
    PathArguments, Type,
};

/// Builder flavour requested for a single field.
#[derive(Default)]
struct FieldOptions {
    skip: bool,
    into: bool,
    some: bool,
}

/// Derive that generates `with_<field>` builder methods for structs with named fields.
///
/// Generated methods take `self` by value (builder style) and return `Self`.
#[proc_macro_derive(WithBuilders, attributes(with_builders))]
pub fn derive_with_builders(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let ident = &input.ident;
    let generics = &input.generics;

    let Data::Struct(data_struct) = &input.data else {
        return syn::Error::new(
            input.span(),
            "#[derive(WithBuilders)] only supports structs",
        )
        .to_compile_error()
        .into();
    };

    let Fields::Named(fields_named) = &data_struct.fields else {
        return syn::Error::new(
            data_struct.fields.span(),
            "#[derive(WithBuilders)] only supports structs with named fields",
        )
        .to_compile_error()
        .into();
    };

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let mut methods = Vec::with_capacity(fields_named.named.len());
    for field in fields_named.named.iter() {
        let Some(field_ident) = field.ident.as_ref() else {
            continue;
        };

        let options = match field_options(field) {
            Ok(options) => options,
            Err(err) => return err.to_compile_error().into(),
        };
        if options.skip {
            continue;
        }

        let field_ty = &field.ty;
        let method_ident = format_ident!("with_{}", field_ident);

        let method = if options.some {
            let Some(inner) = option_inner(field_ty) else {
                return syn::Error::new(
                    field_ty.span(),
                    "#[with_builders(some)] requires an `Option<T>` field",
                )
                .to_compile_error()
                .into();
            };
            if options.into {
                quote! {
                    #[inline]
                    pub fn #method_ident(mut self, value: impl ::core::convert::Into<#inner>) -> Self {
                        self.#field_ident = ::core::option::Option::Some(value.into());
                        self
                    }
                }
            } else {
                quote! {
                    #[inline]
                    pub fn #method_ident(mut self, value: #inner) -> Self {
                        self.#field_ident = ::core::option::Option::Some(value);
                        self
                    }
                }
            }
        } else if options.into {
            quote! {
                #[inline]
                pub fn #method_ident(mut self, value: impl ::core::convert::Into<#field_ty>) -> Self {
                    self.#field_ident = value.into();
                    self
                }
            }
        } else {
            quote! {
                #[inline]
                pub fn #method_ident(mut self, value: #field_ty) -> Self {
                    self.#field_ident = value;
                    self
                }
            }
        };
        methods.push(method);
    }

    quote! {
        impl #impl_generics #ident #ty_generics #where_clause {
            #(#methods)*
        }
    }
    .into()
}

fn field_options(field: &syn::Field) -> syn::Result<FieldOptions> {
    let mut options = FieldOptions::default();
    for attr in &field.attrs {
        if !attr.path().is_ident("with_builders") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                options.skip = true;
            } else if meta.path.is_ident("into") {
                options.into = true;
            } else if meta.path.is_ident("some") {
                options.some = true;
            } else {
                return Err(meta.error("expected `skip`, `into` or `some`"));
            }
            Ok(())
        })?;
    }
    Ok(options)
}

/// Returns `T` for a type spelled `Option<T>` (or a path ending in `Option<T>`).
fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}
