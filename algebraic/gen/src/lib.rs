//! Algebraic type code generator library.
//!
//! This crate generates Rust source for N-ary products and sums, the
//! identities relating them, and optics over user types, from models
//! created with `algebraic-define`. The generated code includes:
//!
//! - `ProductN` structs with constructors, projections and slot maps
//! - `SumN` enums with catamorphisms, injections and slot maps
//! - Duality and arithmetic identities between products and sums
//! - Asynchronous evolution of products and sums
//! - Lens families for records and prism families for variant sets
//! - Enumerated key groups
//!
//! ## Modules
//!
//! - [`codegen`] - Token generation for each artifact kind
//! - [`orchestrator`] - Planning jobs and running them into artifacts
//! - [`output`] - Validation, formatting and file writing
//! - [`validation`] - Declaration checks run before generation
//! - [`serialization`] - Propagation of serializability across declarations
//! - [`naming`] - Shared naming and signature utilities
//! - [`syntax`] - Parsing model-supplied names, types and expressions
//! - [`config`] - TOML configuration loading
//! - [`cargo_gen`] - Cargo.toml generation for standalone output crates
//! - [`errors`] - Error types for the generator
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::path::Path;
//! use algebraic_define::prelude::*;
//! use algebraic_gen::orchestrator::{execute, managed_directories, plan};
//! use algebraic_gen::output::write_artifacts;
//!
//! let config = AlgebraicTypes {
//!     products: Some(DimensionSelection::range(2, 4)),
//!     ..AlgebraicTypes::default()
//! };
//!
//! let plan = plan(&config).unwrap();
//! let artifacts = execute(&plan).unwrap();
//! write_artifacts(&artifacts, Path::new("generated"), &managed_directories(&plan), false).unwrap();
//! ```

pub mod cargo_gen;
pub mod codegen;
pub mod config;
pub mod errors;
pub mod naming;
pub mod orchestrator;
pub mod output;
pub mod serialization;
pub mod syntax;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_utils;
