//! Product family generation.
//!
//! Generates, for dimension N, the `ProductN` struct together with its
//! smart constructor, factor-wise map, curried projections and per-slot
//! map combinators.

use algebraic_define::ResolvedLocation;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::naming::{
    PRODUCT_MARKER_MODULE, TypeModifier, factor, file_item_path, generic_idents,
    generic_idents_with_substitution, generic_types, indexed_idents, map_slot, product_type,
    projection,
};

/// Functions with more parameters than this trip `clippy::too_many_arguments`.
const CLIPPY_ARGUMENT_LIMIT: usize = 7;

/// Generates the `Product` marker trait.
pub fn generate_product_marker() -> TokenStream {
    quote! {
        //! Marker capability shared by all product types.

        /// Implemented by every generated `ProductN`.
        pub trait Product {}
    }
}

/// Generates the product type of `dimension` factors.
///
/// `location` is the products package the artifact is written to.
///
/// ## Examples
///
/// ```ignore
/// // generate_product(2, &location) produces:
/// pub struct Product2<F2, F1> {
///     pub factor2: F2,
///     pub factor1: F1,
/// }
///
/// pub fn product2<F2, F1>(factor2: F2, factor1: F1) -> Product2<F2, F1>;
/// pub fn map_product2<S2, S1, T2, T1>(f2: impl Fn(S2) -> T2, f1: impl Fn(S1) -> T1)
///     -> impl Fn(Product2<S2, S1>) -> Product2<T2, T1>;
/// pub fn pi2_2<F2, F1>() -> impl Fn(Product2<F2, F1>) -> F2;
/// pub fn pi2_1<F2, F1>() -> impl Fn(Product2<F2, F1>) -> F1;
///
/// impl<F2, F1> Product2<F2, F1> {
///     pub fn map2<G2>(self, f: impl FnOnce(F2) -> G2) -> Product2<G2, F1>;
///     pub fn map1<G1>(self, f: impl FnOnce(F1) -> G1) -> Product2<F2, G1>;
///     pub fn as_refs(&self) -> Product2<&F2, &F1>;
/// }
/// ```
pub fn generate_product(dimension: usize, location: &ResolvedLocation) -> TokenStream {
    let name = product_type(dimension);
    let marker = file_item_path(location, PRODUCT_MARKER_MODULE, &format_ident!("Product"));
    let params = generic_idents(dimension, "F", 1);
    let factors = indexed_idents(dimension, "factor");

    let module_doc = format!(" Product of {dimension} factors.");
    let struct_doc = format!(
        " A product of {dimension} independently typed factors, `factor{dimension}` down to `factor1`."
    );

    let constructor = generate_constructor(dimension);
    let map_all = generate_map_all(dimension);
    let projections = (1..=dimension).map(|index| generate_projection(dimension, index));
    let maps = (1..=dimension).rev().map(|index| generate_map(dimension, index));
    let ref_params = generic_types(dimension, "F", 1, TypeModifier::Ref);

    quote! {
        #![doc = #module_doc]

        use #marker;

        #[doc = #struct_doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct #name<#(#params),*> {
            #(pub #factors: #params,)*
        }

        impl<#(#params),*> Product for #name<#(#params),*> {}

        #constructor

        #map_all

        #(#projections)*

        impl<#(#params),*> #name<#(#params),*> {
            #(#maps)*

            /// Borrows every factor.
            pub fn as_refs(&self) -> #name<#(#ref_params),*> {
                #name {
                    #(#factors: &self.#factors,)*
                }
            }
        }
    }
}

/// `productN(factorN, .., factor1)`
fn generate_constructor(dimension: usize) -> TokenStream {
    let name = product_type(dimension);
    let function = format_ident!("product{}", dimension);
    let params = generic_idents(dimension, "F", 1);
    let factors = indexed_idents(dimension, "factor");
    let doc = format!(" Creates a [`{name}`] from its factors.");
    let allow = allow_many_arguments(dimension);

    quote! {
        #[doc = #doc]
        #allow
        pub fn #function<#(#params),*>(#(#factors: #params),*) -> #name<#(#params),*> {
            #name { #(#factors),* }
        }
    }
}

/// `map_productN(fN, .., f1)`, the product of N functions.
fn generate_map_all(dimension: usize) -> TokenStream {
    let name = product_type(dimension);
    let function = format_ident!("map_product{}", dimension);
    let sources = generic_idents(dimension, "S", 1);
    let targets = generic_idents(dimension, "T", 1);
    let functions = indexed_idents(dimension, "f");
    let factors = indexed_idents(dimension, "factor");
    let allow = allow_many_arguments(dimension);

    quote! {
        /// Applies one function per factor.
        #allow
        pub fn #function<#(#sources,)* #(#targets),*>(
            #(#functions: impl Fn(#sources) -> #targets),*
        ) -> impl Fn(#name<#(#sources),*>) -> #name<#(#targets),*> {
            move |product: #name<#(#sources),*>| #name {
                #(#factors: #functions(product.#factors),)*
            }
        }
    }
}

/// `piN_I()`, the curried projection onto slot `index`.
fn generate_projection(dimension: usize, index: usize) -> TokenStream {
    let name = product_type(dimension);
    let function = projection(dimension, index);
    let params = generic_idents(dimension, "F", 1);
    let slot = format_ident!("F{}", index);
    let field = factor(index);
    let doc = format!(" Projection of a [`{name}`] onto `{field}`.");

    quote! {
        #[doc = #doc]
        pub fn #function<#(#params),*>() -> impl Fn(#name<#(#params),*>) -> #slot {
            |product: #name<#(#params),*>| product.#field
        }
    }
}

/// `mapI(f)`, changing only slot `index`.
fn generate_map(dimension: usize, index: usize) -> TokenStream {
    let name = product_type(dimension);
    let method = map_slot(index);
    let slot = format_ident!("F{}", index);
    let mapped = format_ident!("G{}", index);
    let result_params = generic_idents_with_substitution(dimension, "F", index, "G");
    let doc = format!(" Maps `factor{index}`, keeping every other factor.");

    let fields = (1..=dimension).rev().map(|i| {
        let field = factor(i);
        if i == index {
            quote! { #field: f(self.#field) }
        } else {
            quote! { #field: self.#field }
        }
    });

    quote! {
        #[doc = #doc]
        pub fn #method<#mapped>(self, f: impl FnOnce(#slot) -> #mapped) -> #name<#(#result_params),*> {
            #name { #(#fields,)* }
        }
    }
}

/// `#[allow(clippy::too_many_arguments)]` for wide functions.
pub(crate) fn allow_many_arguments(arguments: usize) -> TokenStream {
    if arguments > CLIPPY_ARGUMENT_LIMIT {
        quote! { #[allow(clippy::too_many_arguments)] }
    } else {
        TokenStream::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        format_generated_code, function_names, generic_count, inherent_method_names, location,
        parse_generated,
    };

    // === marker ===

    #[test]
    fn marker_declares_trait() {
        let code = format_generated_code(&generate_product_marker()).expect("format");
        assert!(code.contains("pub trait Product {}"));
    }

    // === product type ===

    #[test]
    fn product_two_has_expected_shape() {
        let code = format_generated_code(&generate_product(2, &location("products"))).expect("format");

        assert!(code.contains("use crate::products::product::Product;"));
        assert!(code.contains("pub struct Product2<F2, F1>"));
        assert!(code.contains("pub factor2: F2"));
        assert!(code.contains("pub factor1: F1"));
        assert!(code.contains("impl<F2, F1> Product for Product2<F2, F1> {}"));
        assert!(code.contains("pub fn product2<F2, F1>(factor2: F2, factor1: F1) -> Product2<F2, F1>"));
        assert!(code.contains("pub fn map1<G1>(self, f: impl FnOnce(F1) -> G1) -> Product2<F2, G1>"));
        assert!(code.contains("pub fn map2<G2>(self, f: impl FnOnce(F2) -> G2) -> Product2<G2, F1>"));
        assert!(code.contains("pub fn as_refs(&self) -> Product2<&F2, &F1>"));
    }

    #[test]
    fn product_uses_domain_in_marker_path() {
        let location = algebraic_define::ResolvedLocation::new("src", "algebra", "math::products");
        let code = format_generated_code(&generate_product(3, &location)).expect("format");
        assert!(code.contains("use crate::algebra::math::products::product::Product;"));
    }

    #[test]
    fn dimension_consistency_for_small_and_wide_products() {
        for dimension in [2, 3, 5, 10] {
            let file = parse_generated(&generate_product(dimension, &location("products")));
            let name = format!("Product{dimension}");

            assert_eq!(generic_count(&file, &name), Some(dimension));

            let projections = function_names(&file)
                .into_iter()
                .filter(|f| f.starts_with(&format!("pi{dimension}_")))
                .count();
            assert_eq!(projections, dimension);

            let maps: Vec<_> = inherent_method_names(&file)
                .into_iter()
                .filter(|m| m.starts_with("map"))
                .collect();
            assert_eq!(maps.len(), dimension);
            for index in 1..=dimension {
                assert!(maps.contains(&format!("map{index}")));
            }

            let fields = file.items.iter().find_map(|item| match item {
                syn::Item::Struct(s) if s.ident == name.as_str() => Some(s.fields.len()),
                _ => None,
            });
            assert_eq!(fields, Some(dimension));
        }
    }

    #[test]
    fn wide_constructor_allows_many_arguments() {
        let narrow = format_generated_code(&generate_product(7, &location("products"))).expect("format");
        assert!(!narrow.contains("too_many_arguments"));

        let wide = format_generated_code(&generate_product(8, &location("products"))).expect("format");
        assert!(wide.contains("#[allow(clippy::too_many_arguments)]"));
    }

    // === combinators ===

    #[test]
    fn projection_is_curried() {
        let code = format_generated_code(&generate_product(3, &location("products"))).expect("format");
        assert!(code.contains("pub fn pi3_2<F3, F2, F1>() -> impl Fn(Product3<F3, F2, F1>) -> F2"));
        assert!(code.contains("product.factor2"));
    }

    #[test]
    fn map_product_applies_each_function() {
        let code = format_generated_code(&generate_product(2, &location("products"))).expect("format");
        assert!(code.contains("pub fn map_product2<S2, S1, T2, T1>("));
        assert!(code.contains("factor2: f2(product.factor2)"));
        assert!(code.contains("factor1: f1(product.factor1)"));
    }

    #[test]
    fn map_changes_only_target_slot() {
        let map = generate_map(3, 2);
        let tokens = quote! {
            impl<F3, F2, F1> Product3<F3, F2, F1> { #map }
        };
        let code = format_generated_code(&tokens).expect("format");
        assert!(code.contains("-> Product3<F3, G2, F1>"));
        assert!(code.contains("factor2: f(self.factor2)"));
        assert!(code.contains("factor3: self.factor3"));
        assert!(code.contains("factor1: self.factor1"));
    }
}
