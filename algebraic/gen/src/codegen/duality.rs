//! Duality generation.
//!
//! A function out of `SumN` and a product of N case functions carry the
//! same information. `oppose_productN` and `oppose_sumN` convert between
//! the two; `measureN` folds a sum with a product of measuring functions.

use algebraic_define::ResolvedLocation;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::naming::{
    factor, file_item_path, generic_idents, indexed_idents, injection, product_module,
    product_type, sum_module, sum_type, summand,
};

/// Generates the duality artifact for `dimension`.
///
/// `products` and `sums` are the packages the product and sum of the same
/// dimension are generated to.
pub fn generate_duality(
    dimension: usize,
    products: &ResolvedLocation,
    sums: &ResolvedLocation,
) -> TokenStream {
    let product = product_type(dimension);
    let sum = sum_type(dimension);
    let catamorphism = format_ident!("sum{}", dimension);
    let injections: Vec<_> = (1..=dimension).rev().map(|i| injection(dimension, i)).collect();

    let product_path = file_item_path(products, &product_module(dimension), &product);
    let sum_module_path = file_item_path(sums, &sum_module(dimension), &sum);
    let catamorphism_path = file_item_path(sums, &sum_module(dimension), &catamorphism);
    let injection_paths = injections
        .iter()
        .map(|i| file_item_path(sums, &sum_module(dimension), i));

    let module_doc = format!(" Duality between functions out of [`{sum}`] and products of functions.");

    let oppose_product = generate_oppose_product(dimension);
    let oppose_sum = generate_oppose_sum(dimension);
    let measure = generate_measure(dimension);
    let measure_uniform = generate_measure_uniform(dimension);

    quote! {
        #![doc = #module_doc]

        use std::rc::Rc;

        use #product_path;
        use #sum_module_path;
        use #catamorphism_path;
        #(use #injection_paths;)*

        #oppose_product

        #oppose_sum

        #measure

        #measure_uniform
    }
}

/// `oppose_productN`: product of case functions to a function out of the sum.
fn generate_oppose_product(dimension: usize) -> TokenStream {
    let product = product_type(dimension);
    let sum = sum_type(dimension);
    let function = format_ident!("oppose_product{}", dimension);
    let catamorphism = format_ident!("sum{}", dimension);
    let params = generic_idents(dimension, "F", 1);
    let factors = indexed_idents(dimension, "factor");
    let doc = format!(" Turns a product of case functions into one function out of [`{sum}`].");

    quote! {
        #[doc = #doc]
        pub fn #function<#(#params,)* T>(
            product: #product<#(impl Fn(#params) -> T),*>,
        ) -> impl Fn(#sum<#(#params),*>) -> T {
            let #product { #(#factors),* } = product;
            #catamorphism(#(#factors),*)
        }
    }
}

/// `oppose_sumN`: function out of the sum to a product of case functions.
fn generate_oppose_sum(dimension: usize) -> TokenStream {
    let product = product_type(dimension);
    let sum = sum_type(dimension);
    let function = format_ident!("oppose_sum{}", dimension);
    let params = generic_idents(dimension, "F", 1);
    let handles = indexed_idents(dimension, "f");
    let lowest = format_ident!("f1");

    let clones = handles.iter().filter(|h| **h != lowest).map(|handle| {
        quote! { let #handle = Rc::clone(&f); }
    });
    let fields = (1..=dimension).rev().map(|index| {
        let field = factor(index);
        let handle = format_ident!("f{}", index);
        let slot = format_ident!("F{}", index);
        let inject = injection(dimension, index);
        quote! {
            #field: move |value: #slot| (*#handle)(#inject::<#(#params),*>()(value))
        }
    });
    let doc = format!(
        " Splits a function out of [`{sum}`] into one case function per variant. Inverse of `oppose_product{dimension}`."
    );

    quote! {
        #[doc = #doc]
        pub fn #function<#(#params,)* T>(
            f: impl Fn(#sum<#(#params),*>) -> T,
        ) -> #product<#(impl Fn(#params) -> T),*> {
            let f = Rc::new(f);
            #(#clones)*
            let #lowest = f;
            #product {
                #(#fields,)*
            }
        }
    }
}

/// `measureN`: selects the measuring function of the active variant.
fn generate_measure(dimension: usize) -> TokenStream {
    let product = product_type(dimension);
    let sum = sum_type(dimension);
    let function = format_ident!("measure{}", dimension);
    let params = generic_idents(dimension, "T", 1);
    let arms = (1..=dimension).rev().map(|index| {
        let variant = summand(index);
        let field = factor(index);
        quote! { #sum::#variant(value) => (measure.#field)(value), }
    });
    let doc = format!(" Measures a [`{sum}`] with the factor of `measure` matching its active variant.");

    quote! {
        #[doc = #doc]
        pub fn #function<#(#params,)* M>(
            sum: #sum<#(#params),*>,
            measure: #product<#(impl FnOnce(#params) -> M),*>,
        ) -> M {
            match sum {
                #(#arms)*
            }
        }
    }
}

/// `measureN_uniform`: one measuring function for a sum of equal payloads.
fn generate_measure_uniform(dimension: usize) -> TokenStream {
    let sum = sum_type(dimension);
    let function = format_ident!("measure{}_uniform", dimension);
    let same = (0..dimension).map(|_| format_ident!("T"));
    let patterns = (1..=dimension).rev().map(|index| {
        let variant = summand(index);
        quote! { #sum::#variant(value) }
    });
    let doc = format!(" Measures a [`{sum}`] whose variants all carry the same type.");

    quote! {
        #[doc = #doc]
        pub fn #function<T, M>(sum: #sum<#(#same),*>, measure: impl FnOnce(T) -> M) -> M {
            match sum {
                #(#patterns)|* => measure(value),
            }
        }
    }
}
