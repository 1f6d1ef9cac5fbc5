//! Optics generation.
//!
//! Records receive lens families and variant sets receive prism families.
//! Both are built from setter shapes: the product (or bare setter, or unit)
//! holding one boxed setter per field.
//!
//! ## Modules
//!
//! - [`support`] - The shared `functions.rs` with setter aliases and combinators
//! - [`lens`] - Records, their transactions and product setters
//! - [`prism`] - Variant sets, their transactions and shared parameters
//! - [`shared`] - Detection of fields recurring across variants

mod fields;
mod shape;

pub mod lens;
pub mod prism;
pub mod shared;
pub mod support;

use algebraic_define::ResolvedLocation;

pub use lens::generate_lens;
pub use prism::generate_prism;
pub use shared::{SharedPrismParameter, collect_shared_parameters};
pub use support::generate_optics_support;

/// Where optics find the code they build on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpticsPaths {
    /// Package of `ProductN`.
    pub products: ResolvedLocation,
    /// Package of `SumN`.
    pub sums: ResolvedLocation,
    /// Package of the shared `functions.rs`.
    pub support: ResolvedLocation,
}
