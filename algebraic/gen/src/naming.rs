//! Naming and signature utilities.
//!
//! Every family generator calls into this module, so slot `i` of a
//! product, a sum, a lens or a prism always maps to the same symbol. All
//! functions are pure.
//!
//! ## Slot order
//!
//! Lists run from the most significant index down to the least:
//!
//! ```
//! use algebraic_gen::naming::generic_names;
//!
//! assert_eq!(generic_names(3, "F", 1), vec!["F3", "F2", "F1"]);
//! ```

use algebraic_define::location::path_segments;
use algebraic_define::{ArtifactKind, Location, OutputOptions, ResolvedLocation};
use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};
use strum::IntoEnumIterator;

/// How a generic slot is referenced.
///
/// Rust infers variance from how a parameter is used, so generated slots
/// carry no variance annotation. A modifier prefixes every slot instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeModifier {
    /// `F3`
    Owned,
    /// `&F3`
    Ref,
    /// `&mut F3`
    RefMut,
}

impl TypeModifier {
    fn prefix(self) -> &'static str {
        match self {
            Self::Owned => "",
            Self::Ref => "&",
            Self::RefMut => "&mut ",
        }
    }

    fn apply(self, ident: &Ident) -> TokenStream {
        match self {
            Self::Owned => quote! { #ident },
            Self::Ref => quote! { &#ident },
            Self::RefMut => quote! { &mut #ident },
        }
    }
}

/// Generic parameter names `base<dimension>` down to `base<from>`.
pub fn generic_names(dimension: usize, base: &str, from: usize) -> Vec<String> {
    (from..=dimension).rev().map(|i| format!("{base}{i}")).collect()
}

/// Generic parameter names with a modifier prefix, e.g. `&F2, &F1`.
pub fn generic_names_with_modifier(
    dimension: usize,
    base: &str,
    from: usize,
    modifier: TypeModifier,
) -> Vec<String> {
    generic_names(dimension, base, from)
        .into_iter()
        .map(|name| format!("{}{name}", modifier.prefix()))
        .collect()
}

/// Like [`generic_names`], but slot `target` uses `substitute` as its letter.
///
/// ```
/// use algebraic_gen::naming::generic_names_with_substitution;
///
/// assert_eq!(
///     generic_names_with_substitution(3, "F", 2, "G"),
///     vec!["F3", "G2", "F1"]
/// );
/// ```
pub fn generic_names_with_substitution(
    dimension: usize,
    base: &str,
    target: usize,
    substitute: &str,
) -> Vec<String> {
    (1..=dimension)
        .rev()
        .map(|i| {
            let letter = if i == target { substitute } else { base };
            format!("{letter}{i}")
        })
        .collect()
}

/// Token form of [`generic_names`].
pub fn generic_idents(dimension: usize, base: &str, from: usize) -> Vec<Ident> {
    generic_names(dimension, base, from)
        .iter()
        .map(|name| format_ident!("{}", name))
        .collect()
}

/// Token form of [`generic_names_with_modifier`].
pub fn generic_types(
    dimension: usize,
    base: &str,
    from: usize,
    modifier: TypeModifier,
) -> Vec<TokenStream> {
    generic_idents(dimension, base, from)
        .iter()
        .map(|ident| modifier.apply(ident))
        .collect()
}

/// Token form of [`generic_names_with_substitution`].
pub fn generic_idents_with_substitution(
    dimension: usize,
    base: &str,
    target: usize,
    substitute: &str,
) -> Vec<Ident> {
    generic_names_with_substitution(dimension, base, target, substitute)
        .iter()
        .map(|name| format_ident!("{}", name))
        .collect()
}

/// Identifiers `prefix<dimension>` down to `prefix1`.
pub fn indexed_idents(dimension: usize, prefix: &str) -> Vec<Ident> {
    (1..=dimension)
        .rev()
        .map(|i| format_ident!("{}{}", prefix, i))
        .collect()
}

/// `ProductN`
pub fn product_type(dimension: usize) -> Ident {
    format_ident!("Product{}", dimension)
}

/// `SumN`
pub fn sum_type(dimension: usize) -> Ident {
    format_ident!("Sum{}", dimension)
}

/// `factorI`
pub fn factor(index: usize) -> Ident {
    format_ident!("factor{}", index)
}

/// `SummandI`
pub fn summand(index: usize) -> Ident {
    format_ident!("Summand{}", index)
}

/// `mapI`
pub fn map_slot(index: usize) -> Ident {
    format_ident!("map{}", index)
}

/// `piN_I`
pub fn projection(dimension: usize, index: usize) -> Ident {
    format_ident!("pi{}_{}", dimension, index)
}

/// `iotaN_I`
pub fn injection(dimension: usize, index: usize) -> Ident {
    format_ident!("iota{}_{}", dimension, index)
}

/// File module of product N, `product_N`.
pub fn product_module(dimension: usize) -> String {
    format!("product_{dimension}")
}

/// File module of sum N, `sum_N`.
pub fn sum_module(dimension: usize) -> String {
    format!("sum_{dimension}")
}

/// File module holding the `Product` marker trait.
pub const PRODUCT_MARKER_MODULE: &str = "product";

/// File module holding the `Sum` marker trait.
pub const SUM_MARKER_MODULE: &str = "sum";

/// File module of the setter support functions.
pub const FUNCTIONS_MODULE: &str = "functions";

/// Replaces the trailing kind segment of `package` with `kind`'s folder.
///
/// A package that does not end in a kind folder gets the folder appended.
/// The mapping is idempotent, and the empty package maps to the folder
/// itself.
///
/// ```
/// use algebraic_define::ArtifactKind;
/// use algebraic_gen::naming::derive_package;
///
/// assert_eq!(derive_package(ArtifactKind::Products, "app::sums"), "app::products");
/// assert_eq!(derive_package(ArtifactKind::Products, "app::products"), "app::products");
/// assert_eq!(derive_package(ArtifactKind::Sums, ""), "sums");
/// assert_eq!(derive_package(ArtifactKind::Sums, "app"), "app::sums");
/// ```
pub fn derive_package(kind: ArtifactKind, package: &str) -> String {
    let Some(folder) = kind.folder() else {
        return package.to_string();
    };
    let mut segments: Vec<&str> = path_segments(package).collect();
    let ends_in_kind = segments.last().is_some_and(|last| {
        ArtifactKind::iter().any(|other| other.folder() == Some(*last))
    });
    if ends_in_kind {
        segments.pop();
    }
    segments.push(folder);
    segments.join("::")
}

/// The location of `kind`'s package next to `location`.
pub fn sibling(location: &ResolvedLocation, kind: ArtifactKind) -> ResolvedLocation {
    location.with_package(derive_package(kind, &location.package))
}

/// The location of a record or variant set.
///
/// Unlike family kinds, optics keep their declared package as is; only a
/// missing package falls back to the kind folder.
pub fn optics_location(
    kind: ArtifactKind,
    location: &Location,
    options: &OutputOptions,
) -> ResolvedLocation {
    location.resolve(options, kind.folder().unwrap_or_default())
}

/// Joins the non-empty segments of several module paths with `::`.
pub fn qualified<'a>(paths: impl IntoIterator<Item = &'a str>) -> String {
    paths
        .into_iter()
        .flat_map(path_segments)
        .collect::<Vec<_>>()
        .join("::")
}

/// `crate::<module path>` as tokens.
pub fn module_path_tokens(module_path: &str) -> TokenStream {
    let segments = path_segments(module_path).map(|segment| format_ident!("{}", segment));
    quote! { crate #(:: #segments)* }
}

/// `crate::<location module path>::<item>` as tokens.
pub fn item_path(location: &ResolvedLocation, item: &Ident) -> TokenStream {
    let module = module_path_tokens(&location.module_path());
    quote! { #module :: #item }
}

/// `crate::<location module path>::<file module>::<item>` as tokens.
///
/// Generated code names items through their defining file module, so it
/// does not depend on index re-exports.
pub fn file_item_path(location: &ResolvedLocation, file_module: &str, item: &Ident) -> TokenStream {
    let module = module_path_tokens(&qualified([location.module_path().as_str(), file_module]));
    quote! { #module :: #item }
}

/// Converts an UpperCamelCase name to snake_case.
pub fn snake_case(name: &str) -> String {
    let mut result = String::new();
    let mut prev_lowercase = false;

    for ch in name.chars() {
        if ch.is_uppercase() {
            if prev_lowercase {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
            prev_lowercase = false;
        } else {
            result.push(ch);
            prev_lowercase = ch.is_lowercase() || ch.is_ascii_digit();
        }
    }

    result
}

/// Uppercases the first character, e.g. `label` to `Label`.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // === generic lists ===

    #[test]
    fn generic_names_run_high_to_low() {
        assert_eq!(generic_names(4, "S", 1), vec!["S4", "S3", "S2", "S1"]);
    }

    #[test]
    fn generic_names_respect_from_index() {
        assert_eq!(generic_names(5, "F", 3), vec!["F5", "F4", "F3"]);
        assert!(generic_names(2, "F", 3).is_empty());
    }

    #[test]
    fn modifier_prefixes_every_slot() {
        assert_eq!(
            generic_names_with_modifier(2, "F", 1, TypeModifier::Ref),
            vec!["&F2", "&F1"]
        );
        assert_eq!(
            generic_names_with_modifier(2, "F", 1, TypeModifier::RefMut),
            vec!["&mut F2", "&mut F1"]
        );
        let tokens = generic_types(2, "F", 1, TypeModifier::Ref);
        assert_eq!(tokens[0].to_string(), "& F2");
    }

    #[test]
    fn substitution_replaces_only_target() {
        assert_eq!(
            generic_names_with_substitution(3, "F", 1, "G"),
            vec!["F3", "F2", "G1"]
        );
        assert_eq!(
            generic_names_with_substitution(3, "F", 3, "G"),
            vec!["G3", "F2", "F1"]
        );
    }

    #[test]
    fn indexed_idents_match_generic_order() {
        let idents: Vec<String> = indexed_idents(3, "factor").iter().map(|i| i.to_string()).collect();
        assert_eq!(idents, vec!["factor3", "factor2", "factor1"]);
    }

    #[test]
    fn family_names_are_dimension_qualified() {
        assert_eq!(product_type(3).to_string(), "Product3");
        assert_eq!(sum_type(2).to_string(), "Sum2");
        assert_eq!(projection(3, 1).to_string(), "pi3_1");
        assert_eq!(injection(4, 2).to_string(), "iota4_2");
        assert_eq!(map_slot(2).to_string(), "map2");
    }

    // === packages ===

    #[test]
    fn derive_package_of_empty_is_folder() {
        for kind in ArtifactKind::iter() {
            if let Some(folder) = kind.folder() {
                assert_eq!(derive_package(kind, ""), folder);
            }
        }
    }

    #[test]
    fn derive_package_replaces_any_kind_segment() {
        assert_eq!(derive_package(ArtifactKind::Duality, "app::evoleq"), "app::duality");
        assert_eq!(derive_package(ArtifactKind::Keys, "keys"), "keys");
    }

    #[test]
    fn sibling_keeps_root_and_domain() {
        let location = ResolvedLocation::new("gen", "algebra", "math::duality");
        let products = sibling(&location, ArtifactKind::Products);
        assert_eq!(products, ResolvedLocation::new("gen", "algebra", "math::products"));
    }

    #[test]
    fn optics_location_keeps_declared_package() {
        let options = OutputOptions::default();
        let declared = optics_location(ArtifactKind::Lenses, &Location::package("model"), &options);
        assert_eq!(declared, ResolvedLocation::new("src", "", "model"));

        let defaulted = optics_location(ArtifactKind::Prisms, &Location::default(), &options);
        assert_eq!(defaulted, ResolvedLocation::new("src", "", "prisms"));
    }

    #[test]
    fn qualified_skips_empty_segments() {
        assert_eq!(qualified(["", "algebra", "keys"]), "algebra::keys");
        assert_eq!(qualified(["", ""]), "");
    }

    #[test]
    fn file_item_path_goes_through_file_module() {
        let location = ResolvedLocation::new("src", "algebra", "products");
        let path = file_item_path(&location, &product_module(3), &product_type(3));
        assert_eq!(path.to_string(), "crate :: algebra :: products :: product_3 :: Product3");
    }

    #[test]
    fn item_path_starts_at_crate() {
        let location = ResolvedLocation::new("src", "", "products");
        let path = item_path(&location, &product_type(2));
        assert_eq!(path.to_string(), "crate :: products :: Product2");
    }

    // === case conversion ===

    #[test]
    fn snake_case_converts_camel_case() {
        assert_eq!(snake_case("Point"), "point");
        assert_eq!(snake_case("UserProfile"), "user_profile");
        assert_eq!(snake_case("Shape2D"), "shape2_d");
        assert_eq!(snake_case("already_snake"), "already_snake");
    }

    #[test]
    fn capitalize_first_char() {
        assert_eq!(capitalize("label"), "Label");
        assert_eq!(capitalize(""), "");
    }

    proptest! {
        #[test]
        fn derive_package_is_idempotent(
            segments in prop::collection::vec("[a-z]{1,6}", 0..4),
            kind_index in 0usize..7
        ) {
            let kind = ArtifactKind::iter().nth(kind_index).unwrap();
            let package = segments.join("::");
            let once = derive_package(kind, &package);
            let twice = derive_package(kind, &once);
            prop_assert_eq!(&once, &twice);
            prop_assert!(once.ends_with(kind.folder().unwrap()));
        }

        #[test]
        fn generic_names_have_dimension_len(dimension in 2usize..16) {
            let names = generic_names(dimension, "F", 1);
            prop_assert_eq!(names.len(), dimension);
            prop_assert_eq!(names.first().cloned(), Some(format!("F{dimension}")));
            prop_assert_eq!(names.last().cloned(), Some("F1".to_string()));
        }
    }
}
