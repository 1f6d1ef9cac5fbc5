//! Common imports for building algebraic type models.
//!
//! ```
//! use algebraic_define::prelude::*;
//!
//! let point = RecordDescriptor::new("Point")
//!     .field(FieldDescriptor::new("x", TypeDescriptor::new("i32")));
//! assert_eq!(point.name, "Point");
//! ```

pub use crate::config::AlgebraicTypes;
pub use crate::declarations::{KeyGroup, RecordDescriptor, VariantDescriptor, VariantSetDescriptor};
pub use crate::location::{Location, OutputOptions, ResolvedLocation};
pub use crate::selection::DimensionSelection;
pub use crate::types::{FieldDescriptor, Generic, SerializationKind, TypeDescriptor};
