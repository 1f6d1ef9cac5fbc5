//! Errors raised while building or flattening a declarative model.

use thiserror::Error;

/// Model-level invariant violations.
///
/// These are detected before any code is generated, either while a
/// [`DimensionSelection`](crate::DimensionSelection) is flattened or while
/// a raw configuration shape is converted into the model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    /// Products and sums only exist for two or more slots.
    #[error("Invalid dimension {dimension}: dimensions must be at least 2")]
    InvalidDimension {
        /// The rejected dimension.
        dimension: usize,
    },

    /// A range selection whose lower bound exceeds its upper bound.
    #[error("Empty dimension range {from}..={to}")]
    EmptyRange {
        /// Inclusive lower bound.
        from: usize,
        /// Inclusive upper bound.
        to: usize,
    },

    /// A list or composite selection without any members.
    #[error("Empty {0} selection")]
    EmptySelection(&'static str),

    /// A type that lists type variables without being declared parametric.
    #[error("Type '{name}' lists type variables {variables:?} but is not declared parametric")]
    GenericMismatch {
        /// The offending type name.
        name: String,
        /// The type variables that were supplied anyway.
        variables: Vec<String>,
    },
}
