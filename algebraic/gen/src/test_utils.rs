//! Shared test utilities for algebraic-gen tests.
//!
//! This module provides fixtures and helpers for inspecting generated code
//! across the codebase.

use algebraic_define::{
    FieldDescriptor, RecordDescriptor, ResolvedLocation, TypeDescriptor, VariantDescriptor,
    VariantSetDescriptor,
};
use proc_macro2::TokenStream;

/// Validates that generated code is syntactically correct.
///
/// ## Errors
///
/// Returns an error string if the generated code fails to parse.
pub fn validate_generated_code(tokens: &TokenStream) -> Result<(), String> {
    syn::parse2::<syn::File>(tokens.clone()).map_err(|e| e.to_string())?;
    Ok(())
}

/// Formats generated code using prettyplease.
///
/// ## Errors
///
/// Returns an error string if the code fails to parse.
pub fn format_generated_code(tokens: &TokenStream) -> Result<String, String> {
    let file = syn::parse2::<syn::File>(tokens.clone()).map_err(|e| e.to_string())?;
    Ok(prettyplease::unparse(&file))
}

/// Parses generated code, panicking with the token dump on failure.
pub fn parse_generated(tokens: &TokenStream) -> syn::File {
    syn::parse2::<syn::File>(tokens.clone())
        .unwrap_or_else(|e| panic!("generated code does not parse: {e}\n{tokens}"))
}

/// Names of the free functions in a file.
pub fn function_names(file: &syn::File) -> Vec<String> {
    file.items
        .iter()
        .filter_map(|item| match item {
            syn::Item::Fn(f) => Some(f.sig.ident.to_string()),
            _ => None,
        })
        .collect()
}

/// Names of the methods of all inherent impls in a file.
pub fn inherent_method_names(file: &syn::File) -> Vec<String> {
    file.items
        .iter()
        .filter_map(|item| match item {
            syn::Item::Impl(i) if i.trait_.is_none() => Some(i),
            _ => None,
        })
        .flat_map(|i| i.items.iter())
        .filter_map(|item| match item {
            syn::ImplItem::Fn(f) => Some(f.sig.ident.to_string()),
            _ => None,
        })
        .collect()
}

/// Names of the methods declared by the trait `name`.
pub fn trait_method_names(file: &syn::File, name: &str) -> Vec<String> {
    file.items
        .iter()
        .filter_map(|item| match item {
            syn::Item::Trait(t) if t.ident == name => Some(t),
            _ => None,
        })
        .flat_map(|t| t.items.iter())
        .filter_map(|item| match item {
            syn::TraitItem::Fn(f) => Some(f.sig.ident.to_string()),
            _ => None,
        })
        .collect()
}

/// Number of generic parameters of the struct or enum `name`.
pub fn generic_count(file: &syn::File, name: &str) -> Option<usize> {
    file.items.iter().find_map(|item| match item {
        syn::Item::Struct(s) if s.ident == name => Some(s.generics.params.len()),
        syn::Item::Enum(e) if e.ident == name => Some(e.generics.params.len()),
        _ => None,
    })
}

/// A location in the default source root with an empty domain.
pub fn location(package: &str) -> ResolvedLocation {
    ResolvedLocation::new("src", "", package)
}

/// `Point { x: i32, y: String }`
pub fn make_point() -> RecordDescriptor {
    RecordDescriptor::new("Point")
        .field(FieldDescriptor::new("x", TypeDescriptor::new("i32")))
        .field(FieldDescriptor::new("y", TypeDescriptor::new("String")))
}

/// A record with three fields, one of them defaulted and generic.
pub fn make_tagged() -> RecordDescriptor {
    RecordDescriptor::new("Tagged")
        .doc("A value with a label and a weight.")
        .field(FieldDescriptor::new("value", TypeDescriptor::variable("T")))
        .field(FieldDescriptor::new("label", TypeDescriptor::new("String")))
        .field(FieldDescriptor::new("weight", TypeDescriptor::new("u32")).default_value("1"))
}

/// A three-variant shape set.
///
/// - base field `label: String`
/// - `Circle { label, radius: f64 }` overrides `label`
/// - `Square { label, side: f64 }` overrides `label`
/// - `Dot {}` supplies `label` as a default value
pub fn make_shape() -> VariantSetDescriptor {
    VariantSetDescriptor::new("Shape")
        .field(FieldDescriptor::new("label", TypeDescriptor::new("String")))
        .variant(
            VariantDescriptor::new("Circle")
                .overriding(FieldDescriptor::new("label", TypeDescriptor::new("String")))
                .field(FieldDescriptor::new("radius", TypeDescriptor::new("f64"))),
        )
        .variant(
            VariantDescriptor::new("Square")
                .overriding(FieldDescriptor::new("label", TypeDescriptor::new("String")))
                .field(FieldDescriptor::new("side", TypeDescriptor::new("f64"))),
        )
        .variant(VariantDescriptor::new("Dot").base_value("label", "String::from(\"dot\")"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_point_has_two_fields() {
        let point = make_point();
        assert_eq!(point.fields.len(), 2);
        assert_eq!(point.fields[0].name, "x");
    }

    #[test]
    fn make_shape_has_three_variants() {
        let shape = make_shape();
        assert_eq!(shape.variants.len(), 3);
        assert!(shape.variants[2].fields.is_empty());
    }

    #[test]
    fn format_generated_code_rejects_garbage() {
        let tokens = quote::quote! { fn };
        assert!(format_generated_code(&tokens).is_err());
        assert!(validate_generated_code(&tokens).is_err());
    }
}
