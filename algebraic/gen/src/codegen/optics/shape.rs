//! Setter shapes.
//!
//! A type with K fields carries its setters as `()` for K = 0, the bare
//! setter for K = 1 and `ProductK<Setter<T_K>, .., Setter<T_1>>` otherwise.
//! Field i in declaration order is factor i.

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};

use crate::naming::{factor, map_slot, product_type};

/// Synchronous or asynchronous setters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flavor {
    Sync,
    Async,
}

impl Flavor {
    /// The boxed setter alias.
    pub fn setter(self) -> Ident {
        match self {
            Self::Sync => format_ident!("Setter"),
            Self::Async => format_ident!("AsyncSetter"),
        }
    }

    fn identity(self) -> Ident {
        match self {
            Self::Sync => format_ident!("id_setter"),
            Self::Async => format_ident!("id_async_setter"),
        }
    }

    fn compose(self) -> Ident {
        match self {
            Self::Sync => format_ident!("then"),
            Self::Async => format_ident!("then_async"),
        }
    }

    /// `impl FnOnce(T) -> T + 'static` or its boxed-future counterpart.
    pub fn edit(self, ty: &syn::Type) -> TokenStream {
        match self {
            Self::Sync => quote! { impl FnOnce(#ty) -> #ty + 'static },
            Self::Async => quote! { impl FnOnce(#ty) -> BoxFuture<#ty> + 'static },
        }
    }

    /// Applies setter `setter` to `value`, awaiting when asynchronous.
    pub fn apply(self, setter: &Ident, value: TokenStream) -> TokenStream {
        match self {
            Self::Sync => quote! { #setter(#value) },
            Self::Async => quote! { #setter(#value).await },
        }
    }
}

/// The shape type for fields of `types`, in declaration order.
pub(crate) fn shape_type(types: &[&syn::Type], flavor: Flavor) -> TokenStream {
    let setter = flavor.setter();
    match types {
        [] => quote! { () },
        [only] => quote! { #setter<#only> },
        _ => {
            let product = product_type(types.len());
            let slots = types.iter().rev();
            quote! { #product<#(#setter<#slots>),*> }
        }
    }
}

/// The all-identity value of the shape with `count` fields.
pub(crate) fn identity_shape(count: usize, flavor: Flavor) -> TokenStream {
    let identity = flavor.identity();
    match count {
        0 => quote! { () },
        1 => quote! { #identity() },
        _ => {
            let product = product_type(count);
            let factors = (1..=count).rev().map(factor);
            quote! { #product { #(#factors: #identity()),* } }
        }
    }
}

/// Name of the binding holding the setter of field `index`.
pub(crate) fn setter_binding(index: usize) -> Ident {
    format_ident!("setter{}", index)
}

/// A pattern binding every setter of the shape to [`setter_binding`].
pub(crate) fn shape_pattern(count: usize) -> TokenStream {
    match count {
        0 => quote! { () },
        1 => {
            let binding = setter_binding(1);
            quote! { #binding }
        }
        _ => {
            let product = product_type(count);
            let factors = (1..=count).rev().map(factor);
            let bindings = (1..=count).rev().map(setter_binding);
            quote! { #product { #(#factors: #bindings),* } }
        }
    }
}

/// Chains the edit `f` after the setter of field `index` in `shape`.
///
/// `shape` must hold a shape with `count >= 1` fields.
pub(crate) fn compose_slot(
    count: usize,
    index: usize,
    ty: &syn::Type,
    flavor: Flavor,
    shape: &Ident,
) -> TokenStream {
    let compose = flavor.compose();
    let setter = flavor.setter();
    if count == 1 {
        quote! { #compose(#shape, Box::new(f)) }
    } else {
        let map = map_slot(index);
        quote! { #shape.#map(move |old: #setter<#ty>| #compose(old, Box::new(f))) }
    }
}
