//! Code generation modules for algebraic types.
//!
//! Each submodule produces the tokens of one artifact kind. Generators are
//! pure: they take a dimension or a declaration plus the resolved locations
//! of the artifacts they reference, and return a `proc_macro2::TokenStream`.
//!
//! ## Submodules
//!
//! - [`products`] - `ProductN` structs and the `Product` marker
//! - [`sums`] - `SumN` enums and the `Sum` marker
//! - [`arithmetic`] - Splitting and recombining products
//! - [`duality`] - Functions out of sums versus products of functions
//! - [`evoleq`] - Asynchronous evolution of products and sums
//! - [`optics`] - Lenses for records and prisms for variant sets
//! - [`keys`] - Enumerated key groups
//! - [`module_index`] - `mod.rs` / `lib.rs` index files
//!
//! ## Cross-file references
//!
//! Generated files name each other through their defining file module,
//! e.g. `crate::products::product_3::Product3`, built with
//! [`crate::naming::file_item_path`].
//!
//! See [`crate::orchestrator`] for how jobs are planned and run, and
//! [`crate::output`] for validation, formatting and writing.

pub mod arithmetic;
pub mod duality;
pub mod evoleq;
pub mod keys;
pub mod module_index;
pub mod optics;
pub mod products;
pub mod sums;

pub use arithmetic::generate_product_arithmetic;
pub use duality::generate_duality;
pub use evoleq::{generate_evolving_product, generate_evolving_sum};
pub use keys::{generate_keys, keys_module};
pub use module_index::generate_module_index;
pub use optics::{
    OpticsPaths, SharedPrismParameter, collect_shared_parameters, generate_lens,
    generate_optics_support, generate_prism,
};
pub use products::{generate_product, generate_product_marker};
pub use sums::{generate_sum, generate_sum_marker};
