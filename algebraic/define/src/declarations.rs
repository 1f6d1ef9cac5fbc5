//! User type declarations consumed by the optics and key generators.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::location::Location;
use crate::types::{FieldDescriptor, SerializationKind};

/// A record type that receives a lens family.
///
/// ## Examples
///
/// ```
/// use algebraic_define::{FieldDescriptor, RecordDescriptor, TypeDescriptor};
///
/// let point = RecordDescriptor::new("Point")
///     .field(FieldDescriptor::new("x", TypeDescriptor::new("i32")))
///     .field(FieldDescriptor::new("y", TypeDescriptor::new("String")));
///
/// assert_eq!(point.fields.len(), 2);
/// assert!(!point.serializable);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordDescriptor {
    /// Type name, an upper camel case identifier.
    pub name: String,
    /// Where the record and its lenses are generated. The package defaults
    /// to `lenses`.
    #[serde(default)]
    pub location: Location,
    /// Fields in declaration order.
    pub fields: Vec<FieldDescriptor>,
    /// Appended to every generated setter name.
    #[serde(default)]
    pub setters_suffix: Option<String>,
    /// Derive serde implementations for the record.
    #[serde(default)]
    pub serializable: bool,
    /// Doc comment lines.
    #[serde(default)]
    pub doc: Vec<String>,
}

impl RecordDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: Location::default(),
            fields: Vec::new(),
            setters_suffix: None,
            serializable: false,
            doc: Vec::new(),
        }
    }

    #[must_use]
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    #[must_use]
    pub fn setters_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.setters_suffix = Some(suffix.into());
        self
    }

    #[must_use]
    pub fn serializable(mut self) -> Self {
        self.serializable = true;
        self
    }

    #[must_use]
    pub fn doc(mut self, line: impl Into<String>) -> Self {
        self.doc.push(line.into());
        self
    }
}

/// One case of a variant set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariantDescriptor {
    /// Variant name, an upper camel case identifier.
    pub name: String,
    /// The variant's own fields in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    /// Own fields that stand in for base fields of the same name.
    #[serde(default)]
    pub overrides: BTreeSet<String>,
    /// Values of base fields this variant does not override.
    #[serde(default)]
    pub default_values: BTreeMap<String, String>,
    /// Doc comment lines.
    #[serde(default)]
    pub doc: Vec<String>,
}

impl VariantDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            overrides: BTreeSet::new(),
            default_values: BTreeMap::new(),
            doc: Vec::new(),
        }
    }

    #[must_use]
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Adds a field that overrides the base field of the same name.
    #[must_use]
    pub fn overriding(mut self, field: FieldDescriptor) -> Self {
        self.overrides.insert(field.name.clone());
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn base_value(mut self, base_field: impl Into<String>, expression: impl Into<String>) -> Self {
        self.default_values.insert(base_field.into(), expression.into());
        self
    }

    #[must_use]
    pub fn doc(mut self, line: impl Into<String>) -> Self {
        self.doc.push(line.into());
        self
    }
}

/// A closed set of variants that receives a prism family.
///
/// Base fields are readable on every variant: each variant either
/// overrides a base field with an own field or supplies its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariantSetDescriptor {
    /// Type name, an upper camel case identifier.
    pub name: String,
    /// Where the type and its prisms are generated. The package defaults
    /// to `prisms`.
    #[serde(default)]
    pub location: Location,
    /// Base fields shared by all variants.
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    /// The variants in declaration order.
    pub variants: Vec<VariantDescriptor>,
    /// Appended to every shared and per-variant setter name. Setter traits
    /// of equally shaped sets are implemented on the same sum type, so
    /// sets used together need distinct names.
    #[serde(default)]
    pub setters_suffix: Option<String>,
    /// Derive serde implementations for the type.
    #[serde(default)]
    pub serializable: bool,
    /// How the type itself serializes. `Polymorphic` adds a type tag.
    #[serde(default)]
    pub serialization: SerializationKind,
    /// Doc comment lines.
    #[serde(default)]
    pub doc: Vec<String>,
}

impl VariantSetDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: Location::default(),
            fields: Vec::new(),
            variants: Vec::new(),
            setters_suffix: None,
            serializable: false,
            serialization: SerializationKind::None,
            doc: Vec::new(),
        }
    }

    #[must_use]
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn variant(mut self, variant: VariantDescriptor) -> Self {
        self.variants.push(variant);
        self
    }

    #[must_use]
    pub fn setters_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.setters_suffix = Some(suffix.into());
        self
    }

    #[must_use]
    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    #[must_use]
    pub fn serializable(mut self) -> Self {
        self.serializable = true;
        self
    }

    #[must_use]
    pub fn doc(mut self, line: impl Into<String>) -> Self {
        self.doc.push(line.into());
        self
    }
}

/// An enumerated family of key tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyGroup {
    /// Name prefix, an upper camel case identifier.
    pub prefix: String,
    /// Number of numbered keys.
    pub count: usize,
    /// Generate serde implementations through qualified names.
    #[serde(default)]
    pub serializable: bool,
    /// Where the group is generated.
    #[serde(default)]
    pub location: Location,
}

impl KeyGroup {
    pub fn new(prefix: impl Into<String>, count: usize) -> Self {
        Self {
            prefix: prefix.into(),
            count,
            serializable: false,
            location: Location::default(),
        }
    }

    #[must_use]
    pub fn serializable(mut self) -> Self {
        self.serializable = true;
        self
    }
}
