//! Ledger accounts preset.
//!
//! Places everything under the `ledger` domain. The serializable `Account`
//! record holds an `AccountStatus`, which serialization propagation turns
//! into a tagged variant set.

use algebraic_define::prelude::*;

/// Package of the ledger model types.
pub const MODEL_PACKAGE: &str = "model";

/// Creates the accounts preset.
///
/// ## Examples
///
/// ```rust
/// use algebraic_definitions::accounts::define_accounts;
///
/// let config = define_accounts();
/// assert_eq!(config.output.domain, "ledger");
/// assert!(config.data_classes[0].serializable);
/// ```
pub fn define_accounts() -> AlgebraicTypes {
    AlgebraicTypes {
        output: OutputOptions {
            domain: "ledger".to_string(),
            ..OutputOptions::default()
        },
        evoleq_products: Some(DimensionSelection::single(2)),
        evoleq_sums: Some(DimensionSelection::single(3)),
        keys: vec![
            KeyGroup::new("Column", 4).serializable(),
            KeyGroup::new("Ledger", 2),
        ],
        data_classes: vec![account()],
        sealed_classes: vec![account_status()],
        ..AlgebraicTypes::default()
    }
}

fn account() -> RecordDescriptor {
    RecordDescriptor::new("Account")
        .doc("A ledger account.")
        .at(Location::package(MODEL_PACKAGE))
        .serializable()
        .field(FieldDescriptor::new("id", TypeDescriptor::new("u64")))
        .field(FieldDescriptor::new("owner", TypeDescriptor::new("String")))
        .field(FieldDescriptor::new("balance", TypeDescriptor::new("i64")).default_value("0"))
        .field(FieldDescriptor::new(
            "status",
            TypeDescriptor::new("AccountStatus").in_package("crate::ledger::model"),
        ))
        .field(
            FieldDescriptor::new(
                "display_cache",
                TypeDescriptor::new("Option<String>")
                    .generic(Generic::Wrapper)
                    .serialization(SerializationKind::Transient),
            )
            .default_value("None")
            .doc("Rendered summary, never persisted."),
        )
}

fn account_status() -> VariantSetDescriptor {
    VariantSetDescriptor::new("AccountStatus")
        .doc("Lifecycle of an account.")
        .at(Location::package(MODEL_PACKAGE))
        .variant(VariantDescriptor::new("Open"))
        .variant(
            VariantDescriptor::new("Frozen")
                .field(FieldDescriptor::new("reason", TypeDescriptor::new("String"))),
        )
        .variant(
            VariantDescriptor::new("Closed")
                .field(FieldDescriptor::new("closed_at", TypeDescriptor::new("u64")))
                .field(
                    FieldDescriptor::new("final_balance", TypeDescriptor::new("i64"))
                        .default_value("0"),
                ),
        )
}
