//! Output locations of generated artifacts.
//!
//! A location names three things: the source root on disk, the logical
//! domain (the module path from the crate root to the generated tree),
//! and the package below that domain. Packages and domains are Rust
//! module paths separated by `::`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default source root of generated code.
pub const DEFAULT_SOURCE_ROOT: &str = "src";

/// Splits a `::`-separated module path into its non-empty segments.
///
/// ## Examples
///
/// ```
/// use algebraic_define::location::path_segments;
///
/// let segments: Vec<_> = path_segments("app::model").collect();
/// assert_eq!(segments, vec!["app", "model"]);
/// assert_eq!(path_segments("").count(), 0);
/// ```
pub fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split("::").map(str::trim).filter(|segment| !segment.is_empty())
}

/// A partially specified output location.
///
/// Missing fields are inherited from the enclosing selection and finally
/// from [`OutputOptions`].
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Location {
    /// Directory the generated tree is written below.
    pub source_root: Option<String>,
    /// Module path from the crate root to the generated tree.
    pub domain: Option<String>,
    /// Module path of the package below the domain.
    pub package: Option<String>,
}

impl Location {
    /// A location that only names a package.
    pub fn package(package: impl Into<String>) -> Self {
        Self {
            package: Some(package.into()),
            ..Self::default()
        }
    }

    /// Fills the fields missing here from `parent`.
    #[must_use]
    pub fn inherit(&self, parent: &Location) -> Location {
        Location {
            source_root: self.source_root.clone().or_else(|| parent.source_root.clone()),
            domain: self.domain.clone().or_else(|| parent.domain.clone()),
            package: self.package.clone().or_else(|| parent.package.clone()),
        }
    }

    /// Replaces every field that `module` specifies.
    #[must_use]
    pub fn overridden_by(&self, module: &Location) -> Location {
        module.inherit(self)
    }

    /// Resolves this location against the output defaults.
    ///
    /// The package falls back to `default_package`, which callers derive from
    /// the artifact kind.
    pub fn resolve(&self, options: &OutputOptions, default_package: &str) -> ResolvedLocation {
        ResolvedLocation {
            source_root: self
                .source_root
                .clone()
                .unwrap_or_else(|| options.source_root.clone()),
            domain: self.domain.clone().unwrap_or_else(|| options.domain.clone()),
            package: self
                .package
                .clone()
                .unwrap_or_else(|| default_package.to_string()),
        }
    }
}

/// A fully specified output location.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResolvedLocation {
    /// Directory the generated tree is written below.
    pub source_root: String,
    /// Module path from the crate root to the generated tree.
    pub domain: String,
    /// Module path of the package below the domain.
    pub package: String,
}

impl ResolvedLocation {
    /// Creates a resolved location.
    pub fn new(
        source_root: impl Into<String>,
        domain: impl Into<String>,
        package: impl Into<String>,
    ) -> Self {
        Self {
            source_root: source_root.into(),
            domain: domain.into(),
            package: package.into(),
        }
    }

    /// Returns a copy pointing at another package of the same domain.
    #[must_use]
    pub fn with_package(&self, package: impl Into<String>) -> Self {
        Self {
            source_root: self.source_root.clone(),
            domain: self.domain.clone(),
            package: package.into(),
        }
    }

    /// The module path below the crate root, e.g. `algebra::products`.
    pub fn module_path(&self) -> String {
        path_segments(&self.domain)
            .chain(path_segments(&self.package))
            .collect::<Vec<_>>()
            .join("::")
    }

    /// The directory holding this location's files, relative to the output root.
    pub fn directory(&self) -> PathBuf {
        let mut dir = PathBuf::from(&self.source_root);
        for segment in path_segments(&self.domain).chain(path_segments(&self.package)) {
            dir.push(segment);
        }
        dir
    }
}

/// Defaults applied to every location that leaves a field open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputOptions {
    /// Default source root, `src` unless configured.
    pub source_root: String,
    /// Default domain. Empty means the generated tree is the crate root.
    pub domain: String,
    /// Emit a `mod.rs` index in every directory the generator owns.
    pub module_index: bool,
    /// Also index the directories shared with host code: the domain root
    /// (`lib.rs` for an empty domain), its parents and optics packages.
    /// Existing files there are overwritten.
    pub root_index: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            source_root: DEFAULT_SOURCE_ROOT.to_string(),
            domain: String::new(),
            module_index: true,
            root_index: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inherit_prefers_own_fields() {
        let child = Location::package("model");
        let parent = Location {
            source_root: Some("gen".to_string()),
            domain: Some("algebra".to_string()),
            package: Some("other".to_string()),
        };

        let merged = child.inherit(&parent);
        assert_eq!(merged.source_root.as_deref(), Some("gen"));
        assert_eq!(merged.domain.as_deref(), Some("algebra"));
        assert_eq!(merged.package.as_deref(), Some("model"));
    }

    #[test]
    fn overridden_by_prefers_module_fields() {
        let own = Location::package("model");
        let module = Location {
            source_root: Some("gen".to_string()),
            ..Location::default()
        };

        let merged = own.overridden_by(&module);
        assert_eq!(merged.source_root.as_deref(), Some("gen"));
        assert_eq!(merged.package.as_deref(), Some("model"));
    }

    #[test]
    fn resolve_falls_back_to_options() {
        let resolved = Location::default().resolve(&OutputOptions::default(), "sums");
        assert_eq!(resolved, ResolvedLocation::new("src", "", "sums"));
    }

    #[test]
    fn host_directories_are_not_indexed_by_default() {
        let options = OutputOptions::default();
        assert!(options.module_index);
        assert!(!options.root_index);
    }

    #[test]
    fn module_path_skips_empty_domain() {
        assert_eq!(ResolvedLocation::new("src", "", "products").module_path(), "products");
        assert_eq!(
            ResolvedLocation::new("src", "algebra", "app::sums").module_path(),
            "algebra::app::sums"
        );
    }

    #[test]
    fn directory_nests_domain_and_package() {
        let location = ResolvedLocation::new("src", "algebra", "app::sums");
        assert_eq!(location.directory(), PathBuf::from("src/algebra/app/sums"));
    }
}
