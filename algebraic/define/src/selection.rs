//! Dimension selections.
//!
//! A [`DimensionSelection`] names the dimensions a family generator should
//! produce. Selections nest: a composite unites other selections, and every
//! node may carry a [`Location`] that its children inherit.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::DefinitionError;
use crate::location::Location;

/// Smallest dimension a product or sum can have.
pub const MIN_DIMENSION: usize = 2;

/// The dimensions a family generator should produce.
///
/// ## Examples
///
/// ```
/// use algebraic_define::{DimensionSelection, Location};
///
/// let selection = DimensionSelection::Composite {
///     selections: vec![
///         DimensionSelection::range(2, 3),
///         DimensionSelection::list([3, 5]),
///     ],
///     location: Location::default(),
/// };
///
/// let dimensions: Vec<_> = selection
///     .simplify()
///     .unwrap()
///     .into_iter()
///     .map(|s| s.dimension)
///     .collect();
/// assert_eq!(dimensions, vec![2, 3, 5]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionSelection {
    /// Exactly one dimension.
    Single {
        dimension: usize,
        #[serde(default)]
        location: Location,
    },
    /// The inclusive range `from..=to`.
    Range {
        from: usize,
        to: usize,
        #[serde(default)]
        location: Location,
    },
    /// An explicit list of dimensions.
    List {
        dimensions: Vec<usize>,
        #[serde(default)]
        location: Location,
    },
    /// The union of nested selections.
    Composite {
        selections: Vec<DimensionSelection>,
        #[serde(default)]
        location: Location,
    },
}

/// One flattened (dimension, location) pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SimpleSelection {
    /// The selected dimension, at least [`MIN_DIMENSION`].
    pub dimension: usize,
    /// The location inherited through the selection tree.
    pub location: Location,
}

impl DimensionSelection {
    /// A single dimension at the default location.
    pub fn single(dimension: usize) -> Self {
        Self::Single {
            dimension,
            location: Location::default(),
        }
    }

    /// An inclusive range at the default location.
    pub fn range(from: usize, to: usize) -> Self {
        Self::Range {
            from,
            to,
            location: Location::default(),
        }
    }

    /// A list of dimensions at the default location.
    pub fn list(dimensions: impl IntoIterator<Item = usize>) -> Self {
        Self::List {
            dimensions: dimensions.into_iter().collect(),
            location: Location::default(),
        }
    }

    /// Returns this node's own location.
    pub fn location(&self) -> &Location {
        match self {
            Self::Single { location, .. }
            | Self::Range { location, .. }
            | Self::List { location, .. }
            | Self::Composite { location, .. } => location,
        }
    }

    /// Returns a copy of this selection placed at `location`.
    #[must_use]
    pub fn at(mut self, at: Location) -> Self {
        match &mut self {
            Self::Single { location, .. }
            | Self::Range { location, .. }
            | Self::List { location, .. }
            | Self::Composite { location, .. } => *location = at,
        }
        self
    }

    /// Flattens the selection into a finite set of dimension/location pairs.
    ///
    /// Children inherit the location fields they leave open from their
    /// parent. Duplicates collapse.
    ///
    /// ## Errors
    ///
    /// - [`DefinitionError::InvalidDimension`] for any dimension below 2
    /// - [`DefinitionError::EmptyRange`] when `from > to`
    /// - [`DefinitionError::EmptySelection`] for an empty list or composite
    pub fn simplify(&self) -> Result<BTreeSet<SimpleSelection>, DefinitionError> {
        let mut flattened = BTreeSet::new();
        self.flatten_into(&Location::default(), &mut flattened)?;
        Ok(flattened)
    }

    fn flatten_into(
        &self,
        parent: &Location,
        out: &mut BTreeSet<SimpleSelection>,
    ) -> Result<(), DefinitionError> {
        let location = self.location().inherit(parent);
        match self {
            Self::Single { dimension, .. } => {
                out.insert(checked(*dimension, &location)?);
            }
            Self::Range { from, to, .. } => {
                if from > to {
                    return Err(DefinitionError::EmptyRange {
                        from: *from,
                        to: *to,
                    });
                }
                for dimension in *from..=*to {
                    out.insert(checked(dimension, &location)?);
                }
            }
            Self::List { dimensions, .. } => {
                if dimensions.is_empty() {
                    return Err(DefinitionError::EmptySelection("list"));
                }
                for dimension in dimensions {
                    out.insert(checked(*dimension, &location)?);
                }
            }
            Self::Composite { selections, .. } => {
                if selections.is_empty() {
                    return Err(DefinitionError::EmptySelection("composite"));
                }
                for selection in selections {
                    selection.flatten_into(&location, out)?;
                }
            }
        }
        Ok(())
    }

    /// Returns a copy of the tree where every node's location is overridden
    /// by the fields `module` specifies.
    #[must_use]
    pub fn modularize(&self, module: &Location) -> Self {
        let location = self.location().overridden_by(module);
        match self {
            Self::Single { dimension, .. } => Self::Single {
                dimension: *dimension,
                location,
            },
            Self::Range { from, to, .. } => Self::Range {
                from: *from,
                to: *to,
                location,
            },
            Self::List { dimensions, .. } => Self::List {
                dimensions: dimensions.clone(),
                location,
            },
            Self::Composite { selections, .. } => Self::Composite {
                selections: selections.iter().map(|s| s.modularize(module)).collect(),
                location,
            },
        }
    }
}

fn checked(dimension: usize, location: &Location) -> Result<SimpleSelection, DefinitionError> {
    if dimension < MIN_DIMENSION {
        return Err(DefinitionError::InvalidDimension { dimension });
    }
    Ok(SimpleSelection {
        dimension,
        location: location.clone(),
    })
}
