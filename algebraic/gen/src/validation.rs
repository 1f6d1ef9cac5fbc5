//! Pre-generation validation of the declarative model.
//!
//! Every declaration is checked before any artifact is generated, so a
//! configuration error aborts the whole run instead of leaving a partial
//! family behind.
//!
//! ## Validation Checks
//!
//! - **Syntax**: names, module paths, types, default values and modifiers
//!   must be valid Rust, and so must the file module derived from each
//!   type name; edition 2024 reserved words are rejected
//! - **Records**: at least one field, unique field names
//! - **Variant sets**: at least two variants, overrides consistent with the
//!   base fields, a value for every base field in every variant
//! - **Generated names**: no two generated methods of a type collide
//! - **Key groups**: at least one key
//!
//! ## Examples
//!
//! ```
//! use algebraic_define::prelude::*;
//! use algebraic_gen::validation::validate_record;
//!
//! let point = RecordDescriptor::new("Point")
//!     .field(FieldDescriptor::new("x", TypeDescriptor::new("i32")));
//! assert!(validate_record(&point).is_ok());
//!
//! assert!(validate_record(&RecordDescriptor::new("Empty")).is_err());
//! ```

use std::collections::BTreeSet;

use algebraic_define::location::path_segments;
use algebraic_define::{
    AlgebraicTypes, FieldDescriptor, KeyGroup, Location, RecordDescriptor, VariantSetDescriptor,
};

use crate::codegen::keys_module;
use crate::codegen::optics::lens::setter_name;
use crate::codegen::optics::prism::variant_setter_name;
use crate::codegen::optics::{SharedPrismParameter, collect_shared_parameters};
use crate::codegen::optics::shared::same_type;
use crate::errors::GeneratorError;
use crate::naming::snake_case;
use crate::syntax;

/// Methods every lens and prism type defines besides its field methods.
const TRANSACTIONAL_METHODS: [&str; 4] = ["set", "transaction", "set_async", "transaction_async"];

/// Validates the whole configuration.
///
/// ## Errors
///
/// Returns the first violation found; records are checked before variant
/// sets, variant sets before key groups.
pub fn validate_types(config: &AlgebraicTypes) -> Result<(), GeneratorError> {
    for selection in [
        &config.products,
        &config.sums,
        &config.dualities,
        &config.product_arithmetics,
        &config.evoleq_products,
        &config.evoleq_sums,
    ]
    .into_iter()
    .flatten()
    {
        for simple in selection.simplify()? {
            validate_location("selection", &simple.location)?;
        }
    }
    validate_location("module", &config.module)?;
    validate_location("output", &Location {
        source_root: None,
        domain: Some(config.output.domain.clone()),
        package: None,
    })?;

    for record in &config.data_classes {
        validate_record(record)?;
    }
    for set in &config.sealed_classes {
        validate_variant_set(set)?;
    }
    for group in &config.keys {
        validate_key_group(group)?;
    }
    Ok(())
}

/// Every domain and package segment must be a Rust identifier.
pub fn validate_location(owner: &str, location: &Location) -> Result<(), GeneratorError> {
    for path in [&location.domain, &location.package].into_iter().flatten() {
        for segment in path_segments(path) {
            syntax::ident(owner, "module name", segment)?;
        }
    }
    Ok(())
}

fn validate_fields(owner: &str, fields: &[FieldDescriptor]) -> Result<(), GeneratorError> {
    let mut names = BTreeSet::new();
    for field in fields {
        syntax::ident(owner, "field name", &field.name)?;
        syntax::ty(owner, &field.ty.name)?;
        for variable in field.ty.type_variables() {
            syntax::ident(owner, "type variable", &variable)?;
        }
        if let Some(value) = &field.default_value {
            syntax::expr(owner, value)?;
        }
        for modifier in &field.modifiers {
            syntax::meta(owner, modifier)?;
        }
        if !names.insert(field.name.as_str()) {
            return Err(GeneratorError::DuplicateDeclaration {
                name: format!("{owner}.{}", field.name),
                reason: "field is declared twice".to_string(),
            });
        }
    }
    Ok(())
}

fn ensure_unique(
    owner: &str,
    scope: &str,
    names: impl IntoIterator<Item = String>,
) -> Result<(), GeneratorError> {
    let mut seen = BTreeSet::new();
    for name in names {
        if !seen.insert(name.clone()) {
            return Err(GeneratorError::DuplicateDeclaration {
                name: format!("{owner}::{name}"),
                reason: format!("generated twice as {scope}"),
            });
        }
    }
    Ok(())
}

/// Validates a record before lens generation.
///
/// ## Errors
///
/// Returns `GeneratorError::EmptyRecord` for a record without fields,
/// `GeneratorError::InvalidSyntax` for invalid model text and
/// `GeneratorError::DuplicateDeclaration` for colliding names.
pub fn validate_record(record: &RecordDescriptor) -> Result<(), GeneratorError> {
    let owner = record.name.as_str();
    syntax::ident(owner, "record name", owner)?;
    syntax::ident(owner, "module name", &snake_case(owner))?;
    validate_location(owner, &record.location)?;
    if record.fields.is_empty() {
        return Err(GeneratorError::EmptyRecord(owner.to_string()));
    }
    validate_fields(owner, &record.fields)?;

    let setters: Vec<String> = record
        .fields
        .iter()
        .map(|f| setter_name(&f.name, record.setters_suffix.as_deref()))
        .collect();
    for setter in &setters {
        syntax::ident(owner, "setter name", setter)?;
    }

    let inherent = std::iter::once("new".to_string())
        .chain(setters.iter().cloned())
        .chain(setters.iter().map(|s| format!("{s}_async")))
        .chain(TRANSACTIONAL_METHODS.iter().map(|m| m.to_string()));
    ensure_unique(owner, "a method", inherent)
}

/// Validates a variant set before prism generation.
///
/// ## Errors
///
/// Returns `GeneratorError::TooFewVariants`, `OverrideNotInParent`,
/// `OverrideNotInVariant`, `MissingBaseValue` or
/// `SharedParameterTypeClash` for inconsistent declarations, plus the
/// syntax and duplicate errors of [`validate_record`].
pub fn validate_variant_set(set: &VariantSetDescriptor) -> Result<(), GeneratorError> {
    let owner = set.name.as_str();
    syntax::ident(owner, "variant set name", owner)?;
    syntax::ident(owner, "module name", &snake_case(owner))?;
    validate_location(owner, &set.location)?;
    if set.variants.len() < 2 {
        return Err(GeneratorError::TooFewVariants {
            owner: owner.to_string(),
            count: set.variants.len(),
        });
    }
    validate_fields(owner, &set.fields)?;
    ensure_unique(owner, "a variant", set.variants.iter().map(|v| v.name.clone()))?;

    for variant in &set.variants {
        syntax::ident(owner, "variant name", &variant.name)?;
        validate_fields(owner, &variant.fields)?;

        for overridden in &variant.overrides {
            let Some(base) = set.fields.iter().find(|f| &f.name == overridden) else {
                return Err(GeneratorError::OverrideNotInParent {
                    owner: owner.to_string(),
                    variant: variant.name.clone(),
                    field: overridden.clone(),
                });
            };
            let Some(own) = variant.fields.iter().find(|f| &f.name == overridden) else {
                return Err(GeneratorError::OverrideNotInVariant {
                    owner: owner.to_string(),
                    variant: variant.name.clone(),
                    field: overridden.clone(),
                });
            };
            if !same_type(&base.ty, &own.ty) {
                return Err(GeneratorError::SharedParameterTypeClash {
                    owner: owner.to_string(),
                    field: overridden.clone(),
                    first: base.ty.name.clone(),
                    second: own.ty.name.clone(),
                });
            }
        }

        for base in &set.fields {
            if variant.overrides.contains(&base.name) {
                continue;
            }
            match variant.default_values.get(&base.name) {
                Some(value) => {
                    syntax::expr(owner, value)?;
                }
                None => {
                    return Err(GeneratorError::MissingBaseValue {
                        owner: owner.to_string(),
                        variant: variant.name.clone(),
                        field: base.name.clone(),
                    });
                }
            }
        }
    }

    let variant_variables: BTreeSet<String> = set
        .variants
        .iter()
        .flat_map(|v| v.fields.iter())
        .flat_map(|f| f.ty.type_variables())
        .collect();
    for base in &set.fields {
        if let Some(missing) = base
            .ty
            .type_variables()
            .into_iter()
            .find(|v| !variant_variables.contains(v))
        {
            return Err(GeneratorError::ConfigError(format!(
                "Base field '{}' of '{owner}' uses type variable '{missing}', which no variant field carries",
                base.name
            )));
        }
    }

    let shared: Vec<SharedPrismParameter> = collect_shared_parameters(set)?;

    let inherent = set
        .fields
        .iter()
        .map(|f| f.name.clone())
        .chain(set.variants.iter().map(|v| snake_case(&v.name)))
        .chain(TRANSACTIONAL_METHODS.iter().map(|m| m.to_string()));
    ensure_unique(owner, "a method", inherent)?;

    let suffix = set.setters_suffix.as_deref();
    let trait_methods: Vec<String> = shared
        .iter()
        .map(|p| setter_name(&p.name, suffix))
        .chain(set.variants.iter().flat_map(|v| {
            v.fields
                .iter()
                .map(move |f| variant_setter_name(&f.name, &v.name, suffix))
        }))
        .collect();
    for method in &trait_methods {
        syntax::ident(owner, "setter name", method)?;
    }
    for variant in &set.variants {
        syntax::ident(owner, "constructor name", &snake_case(&variant.name))?;
    }
    ensure_unique(owner, "a setter", trait_methods)
}

/// Validates a key group.
///
/// ## Errors
///
/// Returns `GeneratorError::ConfigError` for an empty group and
/// `GeneratorError::InvalidSyntax` for a prefix that is not an identifier.
pub fn validate_key_group(group: &KeyGroup) -> Result<(), GeneratorError> {
    syntax::ident(&group.prefix, "key prefix", &group.prefix)?;
    syntax::ident(&group.prefix, "module name", &keys_module(&group.prefix))?;
    validate_location(&group.prefix, &group.location)?;
    if group.count == 0 {
        return Err(GeneratorError::ConfigError(format!(
            "Key group '{}' declares no keys",
            group.prefix
        )));
    }
    Ok(())
}
