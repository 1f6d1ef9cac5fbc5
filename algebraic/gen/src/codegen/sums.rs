//! Sum family generation.
//!
//! Generates, for dimension N, the closed `SumN` enum with its
//! catamorphism, curried injections and per-variant map combinators.

use algebraic_define::ResolvedLocation;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::codegen::products::allow_many_arguments;
use crate::naming::{
    SUM_MARKER_MODULE, file_item_path, generic_idents, generic_idents_with_substitution,
    indexed_idents, injection, map_slot, sum_type, summand,
};

/// Generates the `Sum` marker trait.
pub fn generate_sum_marker() -> TokenStream {
    quote! {
        //! Marker capability shared by all sum types.

        /// Implemented by every generated `SumN`.
        pub trait Sum {}
    }
}

/// Generates the sum type of `dimension` variants.
///
/// ## Examples
///
/// ```ignore
/// // generate_sum(2, &location) produces:
/// pub enum Sum2<S2, S1> {
///     Summand2(S2),
///     Summand1(S1),
/// }
///
/// pub fn sum2<S2, S1, T>(f2: impl Fn(S2) -> T, f1: impl Fn(S1) -> T) -> impl Fn(Sum2<S2, S1>) -> T;
/// pub fn iota2_2<S2, S1>() -> impl Fn(S2) -> Sum2<S2, S1>;
/// pub fn iota2_1<S2, S1>() -> impl Fn(S1) -> Sum2<S2, S1>;
///
/// impl<S2, S1> Sum2<S2, S1> {
///     pub fn map2<T2>(self, f: impl FnOnce(S2) -> T2) -> Sum2<T2, S1>;
///     pub fn map1<T1>(self, f: impl FnOnce(S1) -> T1) -> Sum2<S2, T1>;
/// }
/// ```
pub fn generate_sum(dimension: usize, location: &ResolvedLocation) -> TokenStream {
    let name = sum_type(dimension);
    let marker = file_item_path(location, SUM_MARKER_MODULE, &format_ident!("Sum"));
    let params = generic_idents(dimension, "S", 1);
    let summands = (1..=dimension).rev().map(summand);

    let module_doc = format!(" Sum of {dimension} variants.");
    let enum_doc = format!(
        " A closed union of {dimension} variants, `Summand{dimension}` down to `Summand1`."
    );

    let catamorphism = generate_catamorphism(dimension);
    let injections = (1..=dimension).map(|index| generate_injection(dimension, index));
    let maps = (1..=dimension).rev().map(|index| generate_map(dimension, index));

    quote! {
        #![doc = #module_doc]

        use #marker;

        #[doc = #enum_doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum #name<#(#params),*> {
            #(#summands(#params),)*
        }

        impl<#(#params),*> Sum for #name<#(#params),*> {}

        #catamorphism

        #(#injections)*

        impl<#(#params),*> #name<#(#params),*> {
            #(#maps)*
        }
    }
}

/// `sumN(fN, .., f1)`, one case function per variant.
fn generate_catamorphism(dimension: usize) -> TokenStream {
    let name = sum_type(dimension);
    let function = format_ident!("sum{}", dimension);
    let params = generic_idents(dimension, "S", 1);
    let functions = indexed_idents(dimension, "f");
    let arms = (1..=dimension).rev().map(|index| {
        let variant = summand(index);
        let case = format_ident!("f{}", index);
        quote! { #name::#variant(value) => #case(value), }
    });
    let doc = format!(" Eliminates a [`{name}`] by applying the case function of its active variant.");
    let allow = allow_many_arguments(dimension);

    quote! {
        #[doc = #doc]
        #allow
        pub fn #function<#(#params,)* T>(
            #(#functions: impl Fn(#params) -> T),*
        ) -> impl Fn(#name<#(#params),*>) -> T {
            move |sum: #name<#(#params),*>| match sum {
                #(#arms)*
            }
        }
    }
}

/// `iotaN_I()`, the curried injection into variant `index`.
fn generate_injection(dimension: usize, index: usize) -> TokenStream {
    let name = sum_type(dimension);
    let function = injection(dimension, index);
    let params = generic_idents(dimension, "S", 1);
    let slot = format_ident!("S{}", index);
    let variant = summand(index);
    let doc = format!(" Injection into `{variant}` of a [`{name}`].");

    quote! {
        #[doc = #doc]
        pub fn #function<#(#params),*>() -> impl Fn(#slot) -> #name<#(#params),*> {
            |value: #slot| -> #name<#(#params),*> { #name::#variant(value) }
        }
    }
}

/// `mapI(f)`, changing the payload of variant `index` when it is active.
fn generate_map(dimension: usize, index: usize) -> TokenStream {
    let name = sum_type(dimension);
    let method = map_slot(index);
    let slot = format_ident!("S{}", index);
    let mapped = format_ident!("T{}", index);
    let result_params = generic_idents_with_substitution(dimension, "S", index, "T");
    let doc = format!(" Maps the payload of `Summand{index}`; other variants pass through.");

    let arms = (1..=dimension).rev().map(|i| {
        let variant = summand(i);
        if i == index {
            quote! { Self::#variant(value) => #name::#variant(f(value)), }
        } else {
            quote! { Self::#variant(value) => #name::#variant(value), }
        }
    });

    quote! {
        #[doc = #doc]
        pub fn #method<#mapped>(self, f: impl FnOnce(#slot) -> #mapped) -> #name<#(#result_params),*> {
            match self {
                #(#arms)*
            }
        }
    }
}
