//! Fields shared across the variants of a variant set.

use algebraic_define::{TypeDescriptor, VariantSetDescriptor};

use crate::errors::GeneratorError;

/// A field name and type recurring in at least two variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedPrismParameter {
    pub name: String,
    pub ty: TypeDescriptor,
    /// `(variant index, field index)` pairs, both 1-based, in declaration order.
    pub occurrences: Vec<(usize, usize)>,
}

impl SharedPrismParameter {
    /// True when every one of `variants` variants carries this field.
    pub fn covers(&self, variants: usize) -> bool {
        self.occurrences.len() == variants
    }
}

/// Type names compared without whitespace, so `Vec<i32>` equals `Vec< i32 >`.
pub(crate) fn same_type(a: &TypeDescriptor, b: &TypeDescriptor) -> bool {
    let normalize = |name: &str| name.split_whitespace().collect::<String>();
    normalize(&a.name) == normalize(&b.name)
}

/// Collects the shared parameters of `set`, ordered by first appearance.
///
/// ## Errors
///
/// Returns `GeneratorError::SharedParameterTypeClash` when a field name
/// recurs with a different type.
pub fn collect_shared_parameters(
    set: &VariantSetDescriptor,
) -> Result<Vec<SharedPrismParameter>, GeneratorError> {
    let mut seen: Vec<SharedPrismParameter> = Vec::new();

    for (variant_index, variant) in set.variants.iter().enumerate() {
        for (field_index, field) in variant.fields.iter().enumerate() {
            let occurrence = (variant_index + 1, field_index + 1);
            match seen.iter_mut().find(|p| p.name == field.name) {
                Some(parameter) if same_type(&parameter.ty, &field.ty) => {
                    parameter.occurrences.push(occurrence);
                }
                Some(parameter) => {
                    return Err(GeneratorError::SharedParameterTypeClash {
                        owner: set.name.clone(),
                        field: field.name.clone(),
                        first: parameter.ty.name.clone(),
                        second: field.ty.name.clone(),
                    });
                }
                None => seen.push(SharedPrismParameter {
                    name: field.name.clone(),
                    ty: field.ty.clone(),
                    occurrences: vec![occurrence],
                }),
            }
        }
    }

    seen.retain(|parameter| parameter.occurrences.len() >= 2);
    Ok(seen)
}
