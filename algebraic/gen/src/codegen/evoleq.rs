//! Evolving products and sums.
//!
//! An evolver turns each slot into a future of the same type. `evolve_*`
//! applies the evolvers slot-wise and `get_*` awaits the result.

use algebraic_define::ResolvedLocation;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::naming::{
    factor, file_item_path, generic_idents, indexed_idents, product_module, product_type,
    sum_module, sum_type, summand,
};

/// `where VN: Future<Output = TN>, ..` for the evolved slots.
fn evolved_bounds(dimension: usize) -> TokenStream {
    let futures = generic_idents(dimension, "V", 1);
    let outputs = generic_idents(dimension, "T", 1);
    quote! {
        where #(#futures: Future<Output = #outputs>),*
    }
}

/// Generates `evolving_product_N.rs`.
///
/// `products` is the package holding `ProductN`.
pub fn generate_evolving_product(dimension: usize, products: &ResolvedLocation) -> TokenStream {
    let product = product_type(dimension);
    let product_path = file_item_path(products, &product_module(dimension), &product);
    let evolve = format_ident!("evolve_product{}", dimension);
    let get = format_ident!("get_product{}", dimension);
    let values = generic_idents(dimension, "T", 1);
    let futures = generic_idents(dimension, "V", 1);
    let factors = indexed_idents(dimension, "factor");
    let bounds = evolved_bounds(dimension);

    let module_doc = format!(" Asynchronous evolution of [`{product}`] values.");
    let evolve_doc = format!(" Applies every evolver to its factor, yielding a [`{product}`] of futures.");
    let get_doc = " Awaits every factor, highest to lowest.".to_string();

    quote! {
        #![doc = #module_doc]

        use std::future::Future;

        use #product_path;

        #[doc = #evolve_doc]
        pub fn #evolve<#(#values,)* #(#futures),*>(
            evolvers: #product<#(impl FnOnce(#values) -> #futures),*>,
            product: #product<#(#values),*>,
        ) -> #product<#(#futures),*>
        #bounds
        {
            #product {
                #(#factors: (evolvers.#factors)(product.#factors),)*
            }
        }

        #[doc = #get_doc]
        pub async fn #get<#(#futures),*>(
            product: #product<#(#futures),*>,
        ) -> #product<#(#futures::Output),*>
        where
            #(#futures: Future),*
        {
            #(let #factors = product.#factors.await;)*
            #product { #(#factors),* }
        }
    }
}

/// Generates `evolving_sum_N.rs`.
///
/// The evolvers are a product with one function per variant. `products`
/// and `sums` are the packages of `ProductN` and `SumN`.
pub fn generate_evolving_sum(
    dimension: usize,
    products: &ResolvedLocation,
    sums: &ResolvedLocation,
) -> TokenStream {
    let product = product_type(dimension);
    let sum = sum_type(dimension);
    let product_path = file_item_path(products, &product_module(dimension), &product);
    let sum_path = file_item_path(sums, &sum_module(dimension), &sum);
    let evolve = format_ident!("evolve_sum{}", dimension);
    let get = format_ident!("get_sum{}", dimension);
    let values = generic_idents(dimension, "T", 1);
    let futures = generic_idents(dimension, "V", 1);
    let bounds = evolved_bounds(dimension);

    let evolve_arms = (1..=dimension).rev().map(|index| {
        let variant = summand(index);
        let field = factor(index);
        quote! { #sum::#variant(value) => #sum::#variant((evolvers.#field)(value)), }
    });
    let get_arms = (1..=dimension).rev().map(|index| {
        let variant = summand(index);
        quote! { #sum::#variant(future) => #sum::#variant(future.await), }
    });

    let module_doc = format!(" Asynchronous evolution of [`{sum}`] values.");
    let evolve_doc = format!(" Applies the evolver of the active variant of a [`{sum}`].");
    let get_doc = " Awaits the payload of the active variant.".to_string();

    quote! {
        #![doc = #module_doc]

        use std::future::Future;

        use #product_path;
        use #sum_path;

        #[doc = #evolve_doc]
        pub fn #evolve<#(#values,)* #(#futures),*>(
            evolvers: #product<#(impl FnOnce(#values) -> #futures),*>,
            sum: #sum<#(#values),*>,
        ) -> #sum<#(#futures),*>
        #bounds
        {
            match sum {
                #(#evolve_arms)*
            }
        }

        #[doc = #get_doc]
        pub async fn #get<#(#futures),*>(
            sum: #sum<#(#futures),*>,
        ) -> #sum<#(#futures::Output),*>
        where
            #(#futures: Future),*
        {
            match sum {
                #(#get_arms)*
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{format_generated_code, function_names, location, parse_generated};

    // === products ===

    #[test]
    fn evolving_product_declares_evolve_and_get() {
        let file = parse_generated(&generate_evolving_product(3, &location("products")));
        assert_eq!(function_names(&file), vec!["evolve_product3", "get_product3"]);
    }

    #[test]
    fn evolving_product_bounds_futures_by_slot_type() {
        let code =
            format_generated_code(&generate_evolving_product(2, &location("products"))).expect("format");
        assert!(code.contains("use crate::products::product_2::Product2;"));
        assert!(code.contains("V2: Future<Output = T2>"));
        assert!(code.contains("V1: Future<Output = T1>"));
        assert!(code.contains("factor2: (evolvers.factor2)(product.factor2)"));
    }

    #[test]
    fn get_product_awaits_high_to_low() {
        let code =
            format_generated_code(&generate_evolving_product(3, &location("products"))).expect("format");
        let third = code.find("let factor3 = product.factor3.await;").expect("awaits factor3");
        let first = code.find("let factor1 = product.factor1.await;").expect("awaits factor1");
        assert!(third < first);
        assert!(code.contains("pub async fn get_product3"));
    }

    // === sums ===

    #[test]
    fn evolving_sum_imports_both_families() {
        let code = format_generated_code(&generate_evolving_sum(
            2,
            &location("products"),
            &location("sums"),
        ))
        .expect("format");
        assert!(code.contains("use crate::products::product_2::Product2;"));
        assert!(code.contains("use crate::sums::sum_2::Sum2;"));
    }

    #[test]
    fn evolving_sum_has_one_arm_per_variant() {
        let code = format_generated_code(&generate_evolving_sum(
            3,
            &location("products"),
            &location("sums"),
        ))
        .expect("format");
        for index in 1..=3 {
            assert!(code.contains(&format!(
                "Sum3::Summand{index}(value) => Sum3::Summand{index}((evolvers.factor{index})(value))"
            )));
            assert!(code.contains(&format!(
                "Sum3::Summand{index}(future) => Sum3::Summand{index}(future.await)"
            )));
        }
        assert!(!code.contains("_ =>"));
    }
}
