//! Error types for the algebraic type generator.

use algebraic_define::DefinitionError;
use thiserror::Error;

/// Errors that can occur during code generation.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The declarative model violates one of its own invariants
    #[error(transparent)]
    Definition(#[from] DefinitionError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Failed to read a configuration file
    #[error("Failed to read configuration '{path}': {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a configuration file
    #[error("Failed to parse configuration '{path}': {message}")]
    ConfigParse { path: String, message: String },

    /// A variant overrides a field its parent does not declare.
    #[error(
        "Variant '{variant}' of '{owner}' overrides '{field}', which is not a field of '{owner}'"
    )]
    OverrideNotInParent {
        /// The variant set.
        owner: String,
        /// The variant carrying the override.
        variant: String,
        /// The overridden field name.
        field: String,
    },

    /// A variant marks a field as override without declaring it.
    #[error("Variant '{variant}' of '{owner}' overrides '{field}' but declares no such field")]
    OverrideNotInVariant {
        owner: String,
        variant: String,
        field: String,
    },

    /// A variant neither overrides a base field nor supplies its value.
    #[error(
        "Variant '{variant}' of '{owner}' supplies no value for base field '{field}': override it or add a default value"
    )]
    MissingBaseValue {
        owner: String,
        variant: String,
        field: String,
    },

    /// The same field name carries different types across variants.
    #[error(
        "Field '{field}' of '{owner}' is typed inconsistently across variants: '{first}' and '{second}'"
    )]
    SharedParameterTypeClash {
        /// The variant set.
        owner: String,
        /// The clashing field name.
        field: String,
        /// The type seen first.
        first: String,
        /// The conflicting type.
        second: String,
    },

    /// A record without fields has no lens.
    #[error("Record '{0}' declares no fields")]
    EmptyRecord(String),

    /// A variant set needs at least two variants to form a sum.
    #[error("Variant set '{owner}' declares {count} variant(s); at least 2 are required")]
    TooFewVariants { owner: String, count: usize },

    /// Two declarations would produce the same artifact or name.
    #[error("Duplicate declaration '{name}': {reason}")]
    DuplicateDeclaration { name: String, reason: String },

    /// Two key groups with the same prefix and location disagree.
    #[error("Key group '{prefix}' is declared with counts {first} and {second} at the same location")]
    ConflictingKeyGroup {
        prefix: String,
        first: usize,
        second: usize,
    },

    /// A name, type or expression supplied by the model is not valid Rust.
    #[error("Invalid {what} in '{owner}': {source}")]
    InvalidSyntax {
        /// The declaration the text belongs to.
        owner: String,
        /// What the text was meant to be, e.g. "type `Vec<`".
        what: String,
        #[source]
        source: syn::Error,
    },

    /// Failed to generate code
    #[error("Code generation failed: {0}")]
    CodeGenError(String),

    /// Failed to write output file
    #[error("Failed to write output file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to clear a managed output directory
    #[error("Failed to clear output directory '{path}': {source}")]
    ClearError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
