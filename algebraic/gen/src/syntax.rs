//! Parsing of the Rust snippets carried by the declarative model.
//!
//! Type names, default values, modifiers and identifiers are plain strings
//! in the model. They are parsed with `syn` before they reach generated
//! code. A failure is reported against the declaration that owns the text.

use proc_macro2::{Ident, Span};
use syn::parse::Parser;

use crate::errors::GeneratorError;

fn invalid(owner: &str, what: String, source: syn::Error) -> GeneratorError {
    GeneratorError::InvalidSyntax {
        owner: owner.to_string(),
        what,
        source,
    }
}

/// Words reserved by edition 2024 that `syn` still parses as identifiers.
const RESERVED_IDENTS: [&str; 1] = ["gen"];

/// Parses an identifier. Keywords and reserved words are rejected.
pub fn ident(owner: &str, kind: &str, text: &str) -> Result<Ident, GeneratorError> {
    let what = || format!("{kind} `{text}`");
    if RESERVED_IDENTS.contains(&text) {
        let reserved = syn::Error::new(Span::call_site(), format!("`{text}` is a reserved keyword"));
        return Err(invalid(owner, what(), reserved));
    }
    syn::parse_str::<Ident>(text).map_err(|e| invalid(owner, what(), e))
}

/// Parses a type.
pub fn ty(owner: &str, text: &str) -> Result<syn::Type, GeneratorError> {
    syn::parse_str::<syn::Type>(text).map_err(|e| invalid(owner, format!("type `{text}`"), e))
}

/// Parses an expression, e.g. a default value.
pub fn expr(owner: &str, text: &str) -> Result<syn::Expr, GeneratorError> {
    syn::parse_str::<syn::Expr>(text).map_err(|e| invalid(owner, format!("expression `{text}`"), e))
}

/// Parses the body of an attribute, e.g. `allow(dead_code)`.
pub fn meta(owner: &str, text: &str) -> Result<syn::Meta, GeneratorError> {
    syn::parse_str::<syn::Meta>(text).map_err(|e| invalid(owner, format!("attribute `{text}`"), e))
}

/// Parses a `::`-separated path, e.g. an import or a serializer module.
pub fn path(owner: &str, text: &str) -> Result<syn::Path, GeneratorError> {
    syn::Path::parse_mod_style
        .parse_str(text)
        .map_err(|e| invalid(owner, format!("path `{text}`"), e))
}
