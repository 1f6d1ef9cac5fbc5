//! Algebraic Type Definition Library
//!
//! This crate provides the declarative model consumed by `algebraic-gen`:
//! which product and sum dimensions to generate, and which user records
//! and variant sets receive optics.
//!
//! ## Core Types
//!
//! ### Selections and locations
//!
//! - [`DimensionSelection`] - Single, range, list or composite sets of dimensions
//! - [`Location`] - Partially specified output location (source root, domain, package)
//! - [`ResolvedLocation`] - Fully specified output location
//! - [`OutputOptions`] - Defaults for open location fields
//! - [`ArtifactKind`] - Logical kinds of generated artifacts and their folders
//!
//! ### Declarations
//!
//! - [`TypeDescriptor`] - A referenced type with generics, imports and serialization
//! - [`FieldDescriptor`] - A field with default value, modifiers and docs
//! - [`RecordDescriptor`] - A record that receives lenses
//! - [`VariantSetDescriptor`] / [`VariantDescriptor`] - A closed variant set that receives prisms
//! - [`KeyGroup`] - An enumerated key tag family
//! - [`AlgebraicTypes`] - The complete generation request
//!
//! ## Examples
//!
//! ```
//! use algebraic_define::prelude::*;
//!
//! let config = AlgebraicTypes {
//!     products: Some(DimensionSelection::list([2, 3, 5])),
//!     data_classes: vec![
//!         RecordDescriptor::new("Point")
//!             .field(FieldDescriptor::new("x", TypeDescriptor::new("i32")))
//!             .field(FieldDescriptor::new("y", TypeDescriptor::new("String"))),
//!     ],
//!     ..AlgebraicTypes::default()
//! };
//!
//! let dimensions = config.products.as_ref().unwrap().simplify().unwrap();
//! assert_eq!(dimensions.len(), 3);
//! ```
//!
//! Ready-made models live in the separate `algebraic-definitions` crate.

pub mod config;
pub mod declarations;
pub mod error;
pub mod kind;
pub mod location;
pub mod prelude;
pub mod selection;
pub mod types;

// Re-export main types at crate root
pub use config::AlgebraicTypes;
pub use declarations::{KeyGroup, RecordDescriptor, VariantDescriptor, VariantSetDescriptor};
pub use error::DefinitionError;
pub use kind::ArtifactKind;
pub use location::{Location, OutputOptions, ResolvedLocation};
pub use selection::{DimensionSelection, MIN_DIMENSION, SimpleSelection};
pub use types::{
    FieldDescriptor, Generic, GenericKind, SerializationKind, TypeDescriptor, TypeDescriptorDef,
};
