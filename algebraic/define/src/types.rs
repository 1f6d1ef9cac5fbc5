//! Type and field descriptors.
//!
//! These describe the types referenced by user records and variant sets.
//! Type names are written in Rust syntax (`i32`, `Vec<Tag>`, `T`) and are
//! parsed by the generator, so the model itself stays plain data.

use serde::{Deserialize, Serialize};

use crate::error::DefinitionError;

/// How a referenced type relates to type variables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Generic {
    /// A concrete type.
    #[default]
    None,
    /// The type name itself is a type variable, e.g. `T`.
    AsSuch,
    /// A generic container applied to concrete arguments, e.g. `Vec<Tag>`.
    Wrapper,
    /// A type parametric in the listed type variables, e.g. `Vec<T>` in `T`.
    In(Vec<String>),
}

impl Generic {
    /// The type variables this type introduces into its owner.
    pub fn variables(&self, name: &str) -> Vec<String> {
        match self {
            Self::None | Self::Wrapper => Vec::new(),
            Self::AsSuch => vec![name.to_string()],
            Self::In(variables) => variables.clone(),
        }
    }
}

/// Configuration spelling of [`Generic`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenericKind {
    #[default]
    None,
    AsSuch,
    Wrapper,
    In,
}

/// How a field takes part in serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SerializationKind {
    /// Serialized through the type's own implementation.
    #[default]
    None,
    /// Skipped during serialization.
    Transient,
    /// A member of a closed hierarchy serialized with a type tag.
    Polymorphic,
    /// Serialized through an explicit serializer module.
    AsSuch {
        /// Path of a module usable with `#[serde(with = ...)]`.
        #[serde(default)]
        serializer: Option<String>,
    },
}

/// A referenced type.
///
/// ## Examples
///
/// ```
/// use algebraic_define::{Generic, TypeDescriptor};
///
/// let tags = TypeDescriptor::new("Vec<T>").generic(Generic::In(vec!["T".to_string()]));
/// assert_eq!(tags.type_variables(), vec!["T".to_string()]);
///
/// let date = TypeDescriptor::new("NaiveDate").in_package("chrono");
/// assert_eq!(date.base_name(), "NaiveDate");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TypeDescriptorDef", into = "TypeDescriptorDef")]
pub struct TypeDescriptor {
    /// The Rust type as written.
    pub name: String,
    /// Module path for `use`. Empty for primitives and types in scope.
    pub package: String,
    /// Relation to type variables.
    pub generic: Generic,
    /// Nested types that need their own imports.
    pub dependencies: Vec<TypeDescriptor>,
    /// Serialization classification.
    pub serialization: SerializationKind,
}

impl TypeDescriptor {
    /// A concrete type without package.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: String::new(),
            generic: Generic::None,
            dependencies: Vec::new(),
            serialization: SerializationKind::None,
        }
    }

    /// A type variable, e.g. `T`.
    pub fn variable(name: impl Into<String>) -> Self {
        Self::new(name).generic(Generic::AsSuch)
    }

    #[must_use]
    pub fn in_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    #[must_use]
    pub fn generic(mut self, generic: Generic) -> Self {
        self.generic = generic;
        self
    }

    #[must_use]
    pub fn depends_on(mut self, dependency: TypeDescriptor) -> Self {
        self.dependencies.push(dependency);
        self
    }

    #[must_use]
    pub fn serialization(mut self, serialization: SerializationKind) -> Self {
        self.serialization = serialization;
        self
    }

    /// The name without generic arguments, e.g. `Vec` for `Vec<Tag>`.
    pub fn base_name(&self) -> &str {
        self.name
            .split('<')
            .next()
            .unwrap_or(&self.name)
            .trim()
    }

    /// The type variables this type introduces.
    pub fn type_variables(&self) -> Vec<String> {
        self.generic.variables(&self.name)
    }
}

/// Configuration shape of [`TypeDescriptor`].
///
/// Keeps the generic kind and its variables apart, the way a user writes
/// them, and rejects inconsistent combinations on conversion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TypeDescriptorDef {
    pub name: String,
    pub package: String,
    pub generic: GenericKind,
    pub generic_in: Vec<String>,
    pub dependencies: Vec<TypeDescriptor>,
    pub serialization: SerializationKind,
}

impl TryFrom<TypeDescriptorDef> for TypeDescriptor {
    type Error = DefinitionError;

    fn try_from(def: TypeDescriptorDef) -> Result<Self, Self::Error> {
        let generic = match (def.generic, def.generic_in.is_empty()) {
            (GenericKind::In, _) => Generic::In(def.generic_in),
            (_, false) => {
                return Err(DefinitionError::GenericMismatch {
                    name: def.name,
                    variables: def.generic_in,
                });
            }
            (GenericKind::None, true) => Generic::None,
            (GenericKind::AsSuch, true) => Generic::AsSuch,
            (GenericKind::Wrapper, true) => Generic::Wrapper,
        };
        Ok(Self {
            name: def.name,
            package: def.package,
            generic,
            dependencies: def.dependencies,
            serialization: def.serialization,
        })
    }
}

impl From<TypeDescriptor> for TypeDescriptorDef {
    fn from(ty: TypeDescriptor) -> Self {
        let (generic, generic_in) = match ty.generic {
            Generic::None => (GenericKind::None, Vec::new()),
            Generic::AsSuch => (GenericKind::AsSuch, Vec::new()),
            Generic::Wrapper => (GenericKind::Wrapper, Vec::new()),
            Generic::In(variables) => (GenericKind::In, variables),
        };
        Self {
            name: ty.name,
            package: ty.package,
            generic,
            generic_in,
            dependencies: ty.dependencies,
            serialization: ty.serialization,
        }
    }
}

/// A field of a record or variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDescriptor {
    /// Field name, a Rust identifier.
    pub name: String,
    /// Field type.
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
    /// Rust expression used when the field is not supplied.
    #[serde(default)]
    pub default_value: Option<String>,
    /// Extra attribute bodies rendered as `#[...]` on the field.
    #[serde(default)]
    pub modifiers: Vec<String>,
    /// Doc comment lines.
    #[serde(default)]
    pub doc: Vec<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
            default_value: None,
            modifiers: Vec::new(),
            doc: Vec::new(),
        }
    }

    #[must_use]
    pub fn default_value(mut self, expression: impl Into<String>) -> Self {
        self.default_value = Some(expression.into());
        self
    }

    #[must_use]
    pub fn modifier(mut self, attribute: impl Into<String>) -> Self {
        self.modifiers.push(attribute.into());
        self
    }

    #[must_use]
    pub fn doc(mut self, line: impl Into<String>) -> Self {
        self.doc.push(line.into());
        self
    }
}
