//! Cargo.toml generation for standalone generated crates.
//!
//! Generated code normally lives inside a host crate. For tests and for
//! publishing the generated tree on its own, the generator can write a
//! minimal manifest next to the source root.

use std::path::Path;

use tracing::debug;

use crate::errors::GeneratorError;
use crate::output::write_atomic;

/// Renders the manifest of a generated crate named `package_name`.
///
/// `serde` is a dependency only when some generated type serializes. The
/// empty `[workspace]` table keeps the crate out of any enclosing workspace.
pub fn cargo_toml(package_name: &str, with_serde: bool) -> String {
    let mut manifest = format!(
        r#"[package]
name = "{package_name}"
version = "0.1.0"
edition = "2024"
publish = false

[lib]
path = "src/lib.rs"

[dependencies]
"#
    );

    if with_serde {
        manifest.push_str("serde = { version = \"1.0\", features = [\"derive\"] }\n");
    }

    manifest.push_str(
        r#"
[dev-dependencies]
futures = "0.3"
serde_json = "1.0"

[workspace]
"#,
    );
    manifest
}

/// Writes `Cargo.toml` into `dir`.
///
/// With `dry_run` the manifest is printed instead.
///
/// ## Errors
///
/// Returns `GeneratorError::WriteError` if the file cannot be written.
pub fn write_cargo_toml(
    dir: &Path,
    package_name: &str,
    with_serde: bool,
    dry_run: bool,
) -> Result<(), GeneratorError> {
    let manifest = cargo_toml(package_name, with_serde);
    let path = dir.join("Cargo.toml");

    if dry_run {
        println!("=== {} ===\n{}\n", path.display(), manifest);
        return Ok(());
    }

    debug!(path = %path.display(), "Writing Cargo.toml");
    write_atomic(&path, &manifest)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn manifest_names_the_package() {
        let manifest = cargo_toml("algebra-out", false);
        assert!(manifest.contains("name = \"algebra-out\""));
        assert!(manifest.contains("edition = \"2024\""));
        assert!(manifest.contains("[workspace]"));
    }

    #[test]
    fn serde_is_optional() {
        assert!(!cargo_toml("a", false).contains("serde = {"));
        assert!(cargo_toml("a", true).contains("serde = { version = \"1.0\", features = [\"derive\"] }"));
    }

    #[test]
    fn manifest_is_valid_toml() {
        let parsed: toml::Table = toml::from_str(&cargo_toml("algebra-out", true)).unwrap();
        assert_eq!(parsed["package"]["name"].as_str(), Some("algebra-out"));
        assert!(parsed["dependencies"].get("serde").is_some());
    }

    #[test]
    fn write_cargo_toml_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        write_cargo_toml(temp_dir.path(), "algebra-out", false, false).unwrap();

        let written = fs::read_to_string(temp_dir.path().join("Cargo.toml")).unwrap();
        assert_eq!(written, cargo_toml("algebra-out", false));
    }

    #[test]
    fn dry_run_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        write_cargo_toml(temp_dir.path(), "algebra-out", false, true).unwrap();

        assert!(!temp_dir.path().join("Cargo.toml").exists());
    }
}
