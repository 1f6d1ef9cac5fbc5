//! Product arithmetic generation.
//!
//! For dimension N and every split point `first` in `1..N`, the artifact
//! holds `timesN_first`, which multiplies a `second`-product of the high
//! factors with a `first`-product of the low factors, and its inverse
//! `splitN_first`. A side that is one factor wide is a bare value.

use algebraic_define::ResolvedLocation;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::naming::{factor, file_item_path, generic_idents, product_module, product_type};

/// Generates the arithmetic artifact for `dimension`.
///
/// `location` is the products package; the artifact imports
/// `Product2..=ProductN` from their file modules there.
pub fn generate_product_arithmetic(dimension: usize, location: &ResolvedLocation) -> TokenStream {
    let module_doc = format!(" Splitting and recombining products of {dimension} factors.");
    let imports = (2..=dimension).map(|width| {
        let path = file_item_path(location, &product_module(width), &product_type(width));
        quote! { use #path; }
    });
    let splits = (1..dimension).map(|first| generate_split_point(dimension, first));
    // Both sides are real products only from dimension 4 on.
    let mul_import = if dimension >= 4 {
        quote! { use std::ops::Mul; }
    } else {
        TokenStream::new()
    };

    quote! {
        #![doc = #module_doc]

        #mul_import
        #(#imports)*

        #(#splits)*
    }
}

/// Type of a side spanning slots `from..=to`, or the bare slot when one wide.
fn side_type(from: usize, to: usize) -> TokenStream {
    let width = to - from + 1;
    let params = generic_idents(to, "F", from);
    if width == 1 {
        quote! { #(#params)* }
    } else {
        let name = product_type(width);
        quote! { #name<#(#params),*> }
    }
}

fn generate_split_point(dimension: usize, first: usize) -> TokenStream {
    let second = dimension - first;
    let name = product_type(dimension);
    let params = generic_idents(dimension, "F", 1);
    let high_type = side_type(first + 1, dimension);
    let low_type = side_type(1, first);
    let times = format_ident!("times{}_{}", dimension, first);
    let split = format_ident!("split{}_{}", dimension, first);
    let pair = product_type(2);

    // Result slot `first + j` comes from high factor `j`, slot `j <= first` from low.
    let combined_fields = (1..=dimension).rev().map(|slot| {
        let field = factor(slot);
        if slot > first {
            side_access(quote! { high }, second, slot - first, &field)
        } else {
            side_access(quote! { low }, first, slot, &field)
        }
    });

    let high_value = side_value(first + 1, dimension);
    let low_value = side_value(1, first);

    let times_doc = format!(
        " Multiplies {} high factor(s) with {first} low factor(s) into a [`{name}`].",
        second
    );
    let split_doc = format!(
        " Splits a [`{name}`] into its {second} high and {first} low factor(s); inverse of [`{times}`]."
    );

    let mul_impl = if first >= 2 && second >= 2 {
        quote! {
            impl<#(#params),*> Mul<#low_type> for #high_type {
                type Output = #name<#(#params),*>;

                fn mul(self, low: #low_type) -> Self::Output {
                    #times(self, low)
                }
            }
        }
    } else {
        TokenStream::new()
    };

    quote! {
        #[doc = #times_doc]
        pub fn #times<#(#params),*>(high: #high_type, low: #low_type) -> #name<#(#params),*> {
            #name {
                #(#combined_fields,)*
            }
        }

        #[doc = #split_doc]
        pub fn #split<#(#params),*>(product: #name<#(#params),*>) -> #pair<#high_type, #low_type> {
            #pair {
                factor2: #high_value,
                factor1: #low_value,
            }
        }

        #mul_impl
    }
}

/// `field: side` for a bare side, `field: side.factorJ` otherwise.
fn side_access(
    side: TokenStream,
    width: usize,
    index: usize,
    field: &proc_macro2::Ident,
) -> TokenStream {
    if width == 1 {
        quote! { #field: #side }
    } else {
        let inner = factor(index);
        quote! { #field: #side.#inner }
    }
}

/// Rebuilds the side spanning `from..=to` out of `product`.
fn side_value(from: usize, to: usize) -> TokenStream {
    let width = to - from + 1;
    if width == 1 {
        let field = factor(from);
        return quote! { product.#field };
    }
    let name = product_type(width);
    let fields = (from..=to).rev().map(|slot| {
        let inner = factor(slot - from + 1);
        let outer = factor(slot);
        quote! { #inner: product.#outer }
    });
    quote! { #name { #(#fields),* } }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{format_generated_code, function_names, location, parse_generated};

    #[test]
    fn every_split_point_has_times_and_split() {
        let file = parse_generated(&generate_product_arithmetic(5, &location("products")));
        let names = function_names(&file);
        for first in 1..5 {
            assert!(names.contains(&format!("times5_{first}")));
            assert!(names.contains(&format!("split5_{first}")));
        }
        assert_eq!(names.len(), 8);
    }

    #[test]
    fn low_side_fills_lowest_slots() {
        let code =
            format_generated_code(&generate_product_arithmetic(5, &location("products"))).expect("format");
        assert!(code.contains("high: Product3<F5, F4, F3>"));
        assert!(code.contains("low: Product2<F2, F1>"));
        assert!(code.contains("factor5: high.factor3"));
        assert!(code.contains("factor3: high.factor1"));
        assert!(code.contains("factor2: low.factor2"));
        assert!(code.contains("factor1: low.factor1"));
    }

    #[test]
    fn one_wide_sides_are_bare_values() {
        // first = 1: the low side is the bare F1
        let low_bare = generate_split_point(3, 1).to_string();
        assert!(low_bare.contains("low : F1"));
        assert!(low_bare.contains("factor1 : low ,"));
        assert!(low_bare.contains("factor1 : product . factor1"));

        // first = 2: the high side is the bare F3
        let high_bare = generate_split_point(3, 2).to_string();
        assert!(high_bare.contains("high : F3"));
        assert!(high_bare.contains("factor3 : high ,"));
        assert!(high_bare.contains("factor2 : product . factor3"));
    }

    #[test]
    fn mul_only_between_real_products() {
        let narrow =
            format_generated_code(&generate_product_arithmetic(3, &location("products"))).expect("format");
        assert!(!narrow.contains("impl<"));
        assert!(!narrow.contains("use std::ops::Mul;"));

        let wide =
            format_generated_code(&generate_product_arithmetic(4, &location("products"))).expect("format");
        assert!(wide.contains("use std::ops::Mul;"));
        assert!(wide.contains("Mul<Product2<F2, F1>> for Product2<F4, F3>"));
        assert!(wide.contains("type Output = Product4<F4, F3, F2, F1>;"));
    }

    #[test]
    fn imports_every_width() {
        let code =
            format_generated_code(&generate_product_arithmetic(4, &location("products"))).expect("format");
        assert!(code.contains("use crate::products::product_2::Product2;"));
        assert!(code.contains("use crate::products::product_3::Product3;"));
        assert!(code.contains("use crate::products::product_4::Product4;"));
    }

    #[test]
    fn dimension_two_splits_into_bare_values() {
        let code =
            format_generated_code(&generate_product_arithmetic(2, &location("products"))).expect("format");
        assert!(code.contains("pub fn times2_1<F2, F1>(high: F2, low: F1) -> Product2<F2, F1>"));
        assert!(code.contains("pub fn split2_1<F2, F1>(product: Product2<F2, F1>) -> Product2<F2, F1>"));
    }
}
