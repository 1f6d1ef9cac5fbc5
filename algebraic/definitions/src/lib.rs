//! Algebraic Type Definitions
//!
//! This crate contains ready-made generation requests built from the
//! primitives in `algebraic-define`. Each preset lives in its own module and
//! is selectable by name from the `algebraic-gen` CLI.
//!
//! ## Available Presets
//!
//! - [`geometry`] - Products, sums, dualities and optics over plane shapes
//! - [`accounts`] - Key groups, evoleq and serializable optics for a ledger
//!
//! ## Examples
//!
//! ```
//! use algebraic_definitions::preset;
//!
//! let config = preset("geometry").unwrap();
//! assert_eq!(config.data_classes[0].name, "Point");
//! assert!(preset("unknown").is_none());
//! ```

pub mod accounts;
pub mod geometry;

use algebraic_define::AlgebraicTypes;

pub use accounts::define_accounts;
pub use geometry::define_geometry;

/// Names accepted by [`preset`].
pub const PRESET_NAMES: &[&str] = &["geometry", "accounts"];

/// Returns the preset called `name`.
pub fn preset(name: &str) -> Option<AlgebraicTypes> {
    match name {
        "geometry" => Some(define_geometry()),
        "accounts" => Some(define_accounts()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_name_resolves() {
        for name in PRESET_NAMES {
            assert!(preset(name).is_some(), "{name}");
        }
    }

    #[test]
    fn presets_survive_json() {
        for name in PRESET_NAMES {
            let config = preset(name).unwrap();
            let json = serde_json::to_string(&config).unwrap();
            let back: AlgebraicTypes = serde_json::from_str(&json).unwrap();
            assert_eq!(back, config, "{name}");
        }
    }
}
