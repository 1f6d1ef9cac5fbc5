//! The complete generation request.

use serde::{Deserialize, Serialize};

use crate::declarations::{KeyGroup, RecordDescriptor, VariantSetDescriptor};
use crate::location::{Location, OutputOptions};
use crate::selection::DimensionSelection;

/// Everything one generator run produces, as an immutable value.
///
/// ## Examples
///
/// ```
/// use algebraic_define::{AlgebraicTypes, DimensionSelection};
///
/// let config = AlgebraicTypes {
///     products: Some(DimensionSelection::range(2, 4)),
///     dualities: Some(DimensionSelection::single(3)),
///     ..AlgebraicTypes::default()
/// };
///
/// assert!(config.sums.is_none());
/// assert!(config.output.module_index);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AlgebraicTypes {
    /// Output defaults.
    pub output: OutputOptions,
    /// Location fields forced onto every dimension selection, overriding
    /// the selections' own.
    pub module: Location,
    /// Product families.
    pub products: Option<DimensionSelection>,
    /// Sum families.
    pub sums: Option<DimensionSelection>,
    /// Duality transforms. Implies products and sums of the same dimension.
    pub dualities: Option<DimensionSelection>,
    /// Product arithmetic. Implies every product up to the dimension.
    pub product_arithmetics: Option<DimensionSelection>,
    /// Asynchronous evolution over products.
    pub evoleq_products: Option<DimensionSelection>,
    /// Asynchronous evolution over sums.
    pub evoleq_sums: Option<DimensionSelection>,
    /// Key groups.
    pub keys: Vec<KeyGroup>,
    /// Records that receive lenses.
    pub data_classes: Vec<RecordDescriptor>,
    /// Variant sets that receive prisms.
    pub sealed_classes: Vec<VariantSetDescriptor>,
}

impl AlgebraicTypes {
    /// True when nothing at all is requested.
    pub fn is_empty(&self) -> bool {
        self.products.is_none()
            && self.sums.is_none()
            && self.dualities.is_none()
            && self.product_arithmetics.is_none()
            && self.evoleq_products.is_none()
            && self.evoleq_sums.is_none()
            && self.keys.is_empty()
            && self.data_classes.is_empty()
            && self.sealed_classes.is_empty()
    }
}
