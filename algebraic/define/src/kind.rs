//! Logical kinds of generated artifacts.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The logical kind of a generated artifact.
///
/// Every kind except [`ArtifactKind::Index`] owns a canonical folder name,
/// which is also the default package of that kind.
///
/// ## Examples
///
/// ```
/// use algebraic_define::ArtifactKind;
///
/// assert_eq!(ArtifactKind::Products.folder(), Some("products"));
/// assert_eq!(ArtifactKind::Duality.to_string(), "duality");
/// assert_eq!(ArtifactKind::Index.folder(), None);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ArtifactKind {
    /// N-ary product types and their combinators.
    Products,
    /// N-ary sum types and their combinators.
    Sums,
    /// Transforms relating functions out of sums to products of functions.
    Duality,
    /// Asynchronous evolution over products and sums.
    Evoleq,
    /// Lens families over user records.
    Lenses,
    /// Prism families over user variant sets.
    Prisms,
    /// Enumerated key groups.
    Keys,
    /// Module index files (`mod.rs` / `lib.rs`).
    Index,
}

impl ArtifactKind {
    /// Returns the canonical folder name of this kind.
    pub fn folder(self) -> Option<&'static str> {
        match self {
            Self::Products => Some("products"),
            Self::Sums => Some("sums"),
            Self::Duality => Some("duality"),
            Self::Evoleq => Some("evoleq"),
            Self::Lenses => Some("lenses"),
            Self::Prisms => Some("prisms"),
            Self::Keys => Some("keys"),
            Self::Index => None,
        }
    }

    /// Returns true when the generator owns the whole output directory of
    /// this kind and may clear it before a fresh run.
    ///
    /// Optics live in user-chosen packages next to other code, so only the
    /// family kinds are managed.
    pub fn is_managed(self) -> bool {
        matches!(
            self,
            Self::Products | Self::Sums | Self::Duality | Self::Evoleq | Self::Keys
        )
    }
}
