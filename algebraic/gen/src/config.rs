//! Loading generation requests from TOML.
//!
//! The file format is the serde form of [`AlgebraicTypes`]:
//!
//! ```toml
//! [output]
//! domain = "algebra"
//!
//! [products]
//! range = { from = 2, to = 5 }
//!
//! [[data_classes]]
//! name = "Point"
//! fields = [
//!     { name = "x", type = { name = "i32" } },
//!     { name = "y", type = { name = "i32" }, default_value = "0" },
//! ]
//! ```

use std::fs;
use std::path::Path;

use algebraic_define::AlgebraicTypes;
use tracing::debug;

use crate::errors::GeneratorError;

/// Parses a configuration from TOML text.
///
/// `origin` names the source in error messages.
///
/// ## Errors
///
/// Returns `GeneratorError::ConfigParse` for malformed TOML or unknown keys.
pub fn parse_config(text: &str, origin: &str) -> Result<AlgebraicTypes, GeneratorError> {
    toml::from_str(text).map_err(|e| GeneratorError::ConfigParse {
        path: origin.to_string(),
        message: e.to_string(),
    })
}

/// Reads and parses the configuration file at `path`.
///
/// ## Errors
///
/// - `GeneratorError::ConfigRead` if the file cannot be read
/// - `GeneratorError::ConfigParse` if its content is not a valid configuration
pub fn load_config(path: &Path) -> Result<AlgebraicTypes, GeneratorError> {
    let origin = path.display().to_string();
    debug!(path = %origin, "Loading configuration");

    let text = fs::read_to_string(path).map_err(|e| GeneratorError::ConfigRead {
        path: origin.clone(),
        source: e,
    })?;
    parse_config(&text, &origin)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn load_config_reads_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("algebra.toml");
        fs::write(
            &path,
            r#"
            [sums]
            single = { dimension = 3 }

            [[keys]]
            prefix = "Column"
            count = 4
            "#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert!(config.sums.is_some());
        assert_eq!(config.keys[0].prefix, "Column");
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_config(&temp_dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, GeneratorError::ConfigRead { .. }));
    }

    #[test]
    fn unknown_key_is_a_parse_error() {
        let err = parse_config("dualitys = { single = { dimension = 2 } }", "inline").unwrap_err();
        match err {
            GeneratorError::ConfigParse { path, .. } => assert_eq!(path, "inline"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_text_is_an_empty_configuration() {
        assert!(parse_config("", "inline").unwrap().is_empty());
    }
}
