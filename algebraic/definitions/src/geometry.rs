//! Plane geometry preset.
//!
//! Generates products up to five factors, sums up to four variants, the
//! dualities and arithmetic between them, a `Point` and a generic
//! `Labelled<T>` record, and a three-variant `Shape`.

use algebraic_define::prelude::*;

/// Creates the geometry preset.
///
/// ## Examples
///
/// ```rust
/// use algebraic_definitions::geometry::define_geometry;
///
/// let config = define_geometry();
/// assert_eq!(config.sealed_classes[0].variants.len(), 3);
/// ```
pub fn define_geometry() -> AlgebraicTypes {
    AlgebraicTypes {
        products: Some(DimensionSelection::range(2, 5)),
        sums: Some(DimensionSelection::range(2, 4)),
        dualities: Some(DimensionSelection::list([2, 3])),
        product_arithmetics: Some(DimensionSelection::single(4)),
        data_classes: vec![point(), labelled()],
        sealed_classes: vec![shape()],
        ..AlgebraicTypes::default()
    }
}

fn point() -> RecordDescriptor {
    RecordDescriptor::new("Point")
        .doc("A point on the integer grid.")
        .field(FieldDescriptor::new("x", TypeDescriptor::new("i32")))
        .field(
            FieldDescriptor::new("y", TypeDescriptor::new("i32"))
                .default_value("0")
                .doc("Defaults to the x axis."),
        )
}

fn labelled() -> RecordDescriptor {
    RecordDescriptor::new("Labelled")
        .doc("Any value paired with a label.")
        .field(FieldDescriptor::new("value", TypeDescriptor::variable("T")))
        .field(FieldDescriptor::new("label", TypeDescriptor::new("String")))
}

fn shape() -> VariantSetDescriptor {
    let label = || FieldDescriptor::new("label", TypeDescriptor::new("String"));

    VariantSetDescriptor::new("Shape")
        .doc("A labelled plane shape.")
        .field(label())
        .variant(
            VariantDescriptor::new("Circle")
                .overriding(label())
                .field(FieldDescriptor::new("radius", TypeDescriptor::new("f64"))),
        )
        .variant(
            VariantDescriptor::new("Rectangle")
                .overriding(label())
                .field(FieldDescriptor::new("width", TypeDescriptor::new("f64")))
                .field(FieldDescriptor::new("height", TypeDescriptor::new("f64"))),
        )
        .variant(
            VariantDescriptor::new("Dot")
                .doc("A shape without extent.")
                .base_value("label", "String::from(\"dot\")"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selections_simplify() {
        let config = define_geometry();
        assert_eq!(config.products.as_ref().unwrap().simplify().unwrap().len(), 4);
        assert_eq!(config.dualities.as_ref().unwrap().simplify().unwrap().len(), 2);
    }

    #[test]
    fn labelled_is_generic() {
        let labelled = labelled();
        assert_eq!(labelled.fields[0].ty.type_variables(), vec!["T"]);
    }

    #[test]
    fn rectangle_overrides_label() {
        let shape = shape();
        let rectangle = &shape.variants[1];
        assert!(rectangle.overrides.contains("label"));
        assert_eq!(rectangle.fields.len(), 3);
    }
}
