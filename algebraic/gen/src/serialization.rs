//! Serialization propagation across declared types.
//!
//! A serializable record or variant set can only derive `Serialize` when
//! the declared types it holds do too. Propagation walks every field of every
//! serializable declaration, resolves field types against the other
//! declarations, and marks the targets serializable. Referenced variant sets
//! additionally become [`SerializationKind::Polymorphic`] so they serialize
//! with a type tag. The walk repeats until nothing changes.

use std::collections::BTreeSet;

use algebraic_define::{
    AlgebraicTypes, ArtifactKind, FieldDescriptor, Generic, SerializationKind, TypeDescriptor,
};
use tracing::debug;

use crate::naming::optics_location;

/// A declaration a field type can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Record(usize),
    Set(usize),
}

/// Name and module path of every declared record and variant set.
struct Declarations {
    entries: Vec<(String, String, Target)>,
}

impl Declarations {
    fn collect(config: &AlgebraicTypes) -> Self {
        let records = config.data_classes.iter().enumerate().map(|(index, record)| {
            let module = optics_location(ArtifactKind::Lenses, &record.location, &config.output);
            (record.name.clone(), module.module_path(), Target::Record(index))
        });
        let sets = config.sealed_classes.iter().enumerate().map(|(index, set)| {
            let module = optics_location(ArtifactKind::Prisms, &set.location, &config.output);
            (set.name.clone(), module.module_path(), Target::Set(index))
        });
        Self {
            entries: records.chain(sets).collect(),
        }
    }

    fn resolve(&self, ty: &TypeDescriptor) -> Option<Target> {
        self.entries
            .iter()
            .find(|(name, module, _)| name == ty.base_name() && package_matches(&ty.package, module))
            .map(|(_, _, target)| *target)
    }
}

/// Whether a field type's package names the module a declaration lives in.
///
/// An empty package matches any module.
fn package_matches(package: &str, module_path: &str) -> bool {
    let package = package.trim();
    package.is_empty()
        || package == module_path
        || package.strip_prefix("crate::") == Some(module_path)
}

/// Pushes `ty` and, recursively, its dependencies.
fn referenced<'a>(ty: &'a TypeDescriptor, out: &mut Vec<&'a TypeDescriptor>) {
    if ty.generic != Generic::AsSuch {
        out.push(ty);
    }
    for dependency in &ty.dependencies {
        referenced(dependency, out);
    }
}

/// Types referenced by the fields of every serializable declaration.
fn serializable_references(config: &AlgebraicTypes) -> Vec<TypeDescriptor> {
    let mut fields: Vec<&FieldDescriptor> = Vec::new();
    for record in config.data_classes.iter().filter(|r| r.serializable) {
        fields.extend(&record.fields);
    }
    for set in config.sealed_classes.iter().filter(|s| s.serializable) {
        fields.extend(&set.fields);
        fields.extend(set.variants.iter().flat_map(|v| &v.fields));
    }

    let mut types = Vec::new();
    for field in fields {
        if field.ty.serialization == SerializationKind::Transient {
            continue;
        }
        referenced(&field.ty, &mut types);
    }
    types.into_iter().cloned().collect()
}

/// Returns a copy of `config` with serializability propagated to every
/// declaration reachable from a serializable one.
///
/// Field types that resolve to no declaration are left untouched. They are
/// expected to be external types with their own serde support.
pub fn propagate_serialization(config: &AlgebraicTypes) -> AlgebraicTypes {
    let mut result = config.clone();
    let declarations = Declarations::collect(config);
    let mut unresolved = BTreeSet::new();

    loop {
        let mut changed = false;

        for ty in serializable_references(&result) {
            match declarations.resolve(&ty) {
                Some(Target::Record(index)) => {
                    let record = &mut result.data_classes[index];
                    if !record.serializable {
                        debug!(record = %record.name, via = %ty.name, "Record becomes serializable");
                        record.serializable = true;
                        changed = true;
                    }
                }
                Some(Target::Set(index)) => {
                    let set = &mut result.sealed_classes[index];
                    if !set.serializable || set.serialization != SerializationKind::Polymorphic {
                        debug!(set = %set.name, via = %ty.name, "Variant set becomes polymorphic");
                        set.serializable = true;
                        set.serialization = SerializationKind::Polymorphic;
                        changed = true;
                    }
                }
                None => {
                    if unresolved.insert(ty.name.clone()) {
                        debug!(ty = %ty.name, package = %ty.package, "Unresolved type left as is");
                    }
                }
            }
        }

        if !changed {
            return result;
        }
    }
}

#[cfg(test)]
mod tests {
    use algebraic_define::{Location, RecordDescriptor, VariantDescriptor, VariantSetDescriptor};

    use super::*;
    use crate::test_utils::{make_point, make_shape};

    fn holder(field_type: TypeDescriptor) -> RecordDescriptor {
        RecordDescriptor::new("Holder")
            .field(FieldDescriptor::new("inner", field_type))
            .serializable()
    }

    // === package matching ===

    #[test]
    fn empty_package_matches_anything() {
        assert!(package_matches("", "lenses"));
        assert!(package_matches("", "app::model"));
    }

    #[test]
    fn crate_prefix_is_ignored() {
        assert!(package_matches("crate::app::model", "app::model"));
        assert!(package_matches("app::model", "app::model"));
        assert!(!package_matches("crate::other", "app::model"));
    }

    // === propagation ===

    #[test]
    fn referenced_record_becomes_serializable() {
        let config = AlgebraicTypes {
            data_classes: vec![holder(TypeDescriptor::new("Point")), make_point()],
            ..AlgebraicTypes::default()
        };

        let result = propagate_serialization(&config);
        assert!(result.data_classes[1].serializable);
    }

    #[test]
    fn referenced_set_becomes_polymorphic() {
        let config = AlgebraicTypes {
            data_classes: vec![holder(TypeDescriptor::new("Shape"))],
            sealed_classes: vec![make_shape()],
            ..AlgebraicTypes::default()
        };

        let result = propagate_serialization(&config);
        let shape = &result.sealed_classes[0];
        assert!(shape.serializable);
        assert_eq!(shape.serialization, SerializationKind::Polymorphic);
    }

    #[test]
    fn propagation_reaches_a_fixed_point_through_chains() {
        let middle = RecordDescriptor::new("Middle")
            .field(FieldDescriptor::new("point", TypeDescriptor::new("Point")));
        let config = AlgebraicTypes {
            data_classes: vec![holder(TypeDescriptor::new("Middle")), middle, make_point()],
            ..AlgebraicTypes::default()
        };

        let result = propagate_serialization(&config);
        assert!(result.data_classes.iter().all(|r| r.serializable));
    }

    #[test]
    fn dependencies_of_wrappers_are_followed() {
        let list = TypeDescriptor::new("Vec<Point>")
            .generic(Generic::Wrapper)
            .depends_on(TypeDescriptor::new("Point"));
        let config = AlgebraicTypes {
            data_classes: vec![holder(list), make_point()],
            ..AlgebraicTypes::default()
        };

        let result = propagate_serialization(&config);
        assert!(result.data_classes[1].serializable);
    }

    #[test]
    fn mismatched_package_does_not_resolve() {
        let config = AlgebraicTypes {
            data_classes: vec![
                holder(TypeDescriptor::new("Point").in_package("geometry")),
                make_point().at(Location::package("model")),
            ],
            ..AlgebraicTypes::default()
        };

        let result = propagate_serialization(&config);
        assert!(!result.data_classes[1].serializable);
    }

    #[test]
    fn transient_fields_do_not_propagate() {
        let transient = TypeDescriptor::new("Point").serialization(SerializationKind::Transient);
        let config = AlgebraicTypes {
            data_classes: vec![holder(transient), make_point()],
            ..AlgebraicTypes::default()
        };

        let result = propagate_serialization(&config);
        assert!(!result.data_classes[1].serializable);
    }

    #[test]
    fn variant_fields_of_serializable_sets_propagate() {
        let set = VariantSetDescriptor::new("Event")
            .variant(VariantDescriptor::new("Moved").field(FieldDescriptor::new(
                "to",
                TypeDescriptor::new("Point"),
            )))
            .variant(VariantDescriptor::new("Stopped"))
            .serializable();
        let config = AlgebraicTypes {
            data_classes: vec![make_point()],
            sealed_classes: vec![set],
            ..AlgebraicTypes::default()
        };

        let result = propagate_serialization(&config);
        assert!(result.data_classes[0].serializable);
        // The set itself was declared serializable, not referenced.
        assert_eq!(result.sealed_classes[0].serialization, SerializationKind::None);
    }

    #[test]
    fn non_serializable_declarations_are_untouched() {
        let config = AlgebraicTypes {
            data_classes: vec![
                RecordDescriptor::new("Holder")
                    .field(FieldDescriptor::new("inner", TypeDescriptor::new("Point"))),
                make_point(),
            ],
            ..AlgebraicTypes::default()
        };

        assert_eq!(propagate_serialization(&config), config);
    }

    // === logging ===

    #[test]
    #[tracing_test::traced_test]
    fn unresolved_types_are_logged() {
        let config = AlgebraicTypes {
            data_classes: vec![holder(TypeDescriptor::new("Missing"))],
            ..AlgebraicTypes::default()
        };

        let result = propagate_serialization(&config);
        assert_eq!(result, config);
        assert!(logs_contain("Unresolved type left as is"));
        assert!(logs_contain("Missing"));
    }
}
