//! Validation, formatting and writing of generated artifacts.
//!
//! Every artifact passes through this module twice. First as tokens, when
//! the orchestrator turns a job into formatted source. Then as a finished
//! [`GeneratedArtifact`], when the sink writes the batch to disk.
//!
//! ## Safety Guarantees
//!
//! - **Validation**: All generated code is parsed with `syn` before formatting
//! - **Formatting**: Output is formatted with `prettyplease` for consistent style
//! - **Batching**: Managed directories are cleared only after the whole batch
//!   has been generated, so a failing job leaves the previous output intact
//! - **Atomic writes**: Uses temp file + rename to prevent partial writes

use std::fs;
use std::path::{Path, PathBuf};

use proc_macro2::TokenStream;
use tracing::{debug, info};

use crate::errors::GeneratorError;
use crate::orchestrator::GeneratedArtifact;

/// First line of every generated file.
pub const GENERATED_HEADER: &str =
    "// This code was automatically generated by algebraic-gen. Do not edit manually.";

/// Validates generated code using syn.
///
/// Parses the token stream as a complete Rust file.
///
/// ## Errors
///
/// Returns `GeneratorError::CodeGenError` if the code fails to parse.
pub fn validate_code(tokens: &TokenStream) -> Result<syn::File, GeneratorError> {
    syn::parse2(tokens.clone())
        .map_err(|e| GeneratorError::CodeGenError(format!("Generated code is invalid: {}", e)))
}

/// Formats a parsed file with prettyplease, prefixed by [`GENERATED_HEADER`].
pub fn format_code(file: &syn::File) -> String {
    let formatted = prettyplease::unparse(file);
    format!("{GENERATED_HEADER}\n\n{formatted}")
}

/// Validates and formats `tokens` in one step.
///
/// ## Errors
///
/// Returns `GeneratorError::CodeGenError` if the code fails to parse.
pub fn render_code(tokens: &TokenStream) -> Result<String, GeneratorError> {
    validate_code(tokens).map(|file| format_code(&file))
}

/// Writes content to a file atomically using temp file + rename.
///
/// ## Errors
///
/// Returns `GeneratorError::WriteError` if the parent directories cannot be
/// created, the temp file cannot be written, or the rename fails.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), GeneratorError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| GeneratorError::WriteError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(|e| GeneratorError::WriteError {
        path: temp_path.display().to_string(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| GeneratorError::WriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// Removes every managed directory below `output_root`.
///
/// Directories that do not exist yet are skipped.
///
/// ## Errors
///
/// Returns `GeneratorError::ClearError` if a directory cannot be removed.
pub fn clear_directories(output_root: &Path, directories: &[PathBuf]) -> Result<(), GeneratorError> {
    for directory in directories {
        let path = output_root.join(directory);
        if !path.exists() {
            continue;
        }
        debug!(path = %path.display(), "Clearing managed directory");
        fs::remove_dir_all(&path).map_err(|e| GeneratorError::ClearError {
            path: path.display().to_string(),
            source: e,
        })?;
    }
    Ok(())
}

/// Writes a generated batch below `output_root`.
///
/// Managed directories are cleared first, so files of dimensions that are
/// no longer requested disappear. With `dry_run`, each artifact is printed
/// to stdout as a `=== path ===` block and nothing touches the disk.
///
/// ## Errors
///
/// Returns `GeneratorError::ClearError` or `GeneratorError::WriteError` on
/// filesystem failures.
pub fn write_artifacts(
    artifacts: &[GeneratedArtifact],
    output_root: &Path,
    managed_directories: &[PathBuf],
    dry_run: bool,
) -> Result<(), GeneratorError> {
    if dry_run {
        for artifact in artifacts {
            println!("=== {} ===\n{}\n", artifact.path.display(), artifact.content);
        }
        return Ok(());
    }

    clear_directories(output_root, managed_directories)?;

    for artifact in artifacts {
        let path = output_root.join(&artifact.path);
        debug!(path = %path.display(), kind = %artifact.kind, "Writing artifact");
        write_atomic(&path, &artifact.content)?;
    }

    info!(
        count = artifacts.len(),
        root = %output_root.display(),
        "Wrote generated artifacts"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use algebraic_define::ArtifactKind;
    use quote::quote;
    use tempfile::TempDir;

    use super::*;

    fn artifact(path: &str, content: &str) -> GeneratedArtifact {
        GeneratedArtifact {
            kind: ArtifactKind::Products,
            name: "2".to_string(),
            path: PathBuf::from(path),
            content: content.to_string(),
        }
    }

    // === validate_code tests ===

    #[test]
    fn validate_code_accepts_valid_code() {
        let tokens = quote! { pub struct Product2<F2, F1> { pub factor2: F2, pub factor1: F1 } };
        assert!(validate_code(&tokens).is_ok());
    }

    #[test]
    fn validate_code_rejects_invalid_code() {
        let tokens = quote! { pub struct };
        let err = validate_code(&tokens).unwrap_err();
        assert!(err.to_string().contains("Generated code is invalid"));
    }

    // === format_code tests ===

    #[test]
    fn format_code_prepends_header() {
        let code = render_code(&quote! { pub trait Product {} }).unwrap();
        assert!(code.starts_with(GENERATED_HEADER));
        assert!(code.contains("pub trait Product {}"));
    }

    #[test]
    fn format_code_keeps_inner_doc_first() {
        let code = render_code(&quote! {
            #![doc = " Product marker."]
            pub trait Product {}
        })
        .unwrap();
        let doc = code.find("//! Product marker.").expect("inner doc");
        let item = code.find("pub trait Product").expect("trait");
        assert!(doc < item);
    }

    // === write_atomic tests ===

    #[test]
    fn write_atomic_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("src/products/product_2.rs");

        write_atomic(&file_path, "// content").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "// content");
    }

    #[test]
    fn write_atomic_no_temp_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("clean.rs");

        write_atomic(&file_path, "// content").unwrap();

        assert!(!file_path.with_extension("tmp").exists());
    }

    // === clear_directories tests ===

    #[test]
    fn clear_directories_removes_stale_files() {
        let temp_dir = TempDir::new().unwrap();
        let stale = temp_dir.path().join("src/products/product_9.rs");
        write_atomic(&stale, "// stale").unwrap();

        clear_directories(temp_dir.path(), &[PathBuf::from("src/products")]).unwrap();

        assert!(!stale.exists());
        assert!(temp_dir.path().join("src").exists());
    }

    #[test]
    fn clear_directories_skips_missing() {
        let temp_dir = TempDir::new().unwrap();
        assert!(clear_directories(temp_dir.path(), &[PathBuf::from("src/sums")]).is_ok());
    }

    // === write_artifacts tests ===

    #[test]
    fn write_artifacts_replaces_managed_directory() {
        let temp_dir = TempDir::new().unwrap();
        let stale = temp_dir.path().join("src/products/product_9.rs");
        write_atomic(&stale, "// stale").unwrap();
        let keep = temp_dir.path().join("src/model/point.rs");
        write_atomic(&keep, "// user").unwrap();

        let artifacts = [artifact("src/products/product_2.rs", "// fresh")];
        write_artifacts(
            &artifacts,
            temp_dir.path(),
            &[PathBuf::from("src/products")],
            false,
        )
        .unwrap();

        assert!(!stale.exists());
        assert!(keep.exists());
        let written = fs::read_to_string(temp_dir.path().join("src/products/product_2.rs")).unwrap();
        assert_eq!(written, "// fresh");
    }

    #[test]
    fn write_artifacts_dry_run_touches_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let stale = temp_dir.path().join("src/products/product_9.rs");
        write_atomic(&stale, "// stale").unwrap();

        let artifacts = [artifact("src/products/product_2.rs", "// fresh")];
        write_artifacts(
            &artifacts,
            temp_dir.path(),
            &[PathBuf::from("src/products")],
            true,
        )
        .unwrap();

        assert!(stale.exists());
        assert!(!temp_dir.path().join("src/products/product_2.rs").exists());
    }
}
