//! Key group generation.
//!
//! A key group is an enum of N numbered keys plus a `NoKey` sentinel, with
//! a companion struct that indexes them. Keys carry a qualified name that
//! is fixed at generation time and doubles as their serialized form.

use algebraic_define::{KeyGroup, ResolvedLocation};
use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote};

use crate::naming::{capitalize, qualified, snake_case};

/// File module of a key group, e.g. `column_keys`.
pub fn keys_module(prefix: &str) -> String {
    format!("{}_keys", snake_case(prefix))
}

/// Generates the key enum and its companion struct for `group`.
///
/// ## Examples
///
/// ```ignore
/// // KeyGroup::new("Column", 2) in package `keys` produces:
/// pub enum ColumnKey { Key0, Key1, NoKey }
///
/// pub struct ColumnKeys;
/// impl ColumnKeys {
///     pub const COUNT: usize = 2;
///     pub const ALL: [ColumnKey; 2] = [ColumnKey::Key0, ColumnKey::Key1];
///     pub fn get(index: usize) -> ColumnKey;
///     pub fn index(key: ColumnKey) -> isize;
/// }
/// ```
pub fn generate_keys(group: &KeyGroup, location: &ResolvedLocation) -> TokenStream {
    let prefix = capitalize(&group.prefix);
    let key = format_ident!("{}Key", prefix);
    let keys = format_ident!("{}Keys", prefix);
    let count = Literal::usize_unsuffixed(group.count);
    let module_path = location.module_path();

    let variants: Vec<_> = (0..group.count).map(|i| format_ident!("Key{}", i)).collect();
    let sentinel = format_ident!("NoKey");

    let name_of = |variant: &proc_macro2::Ident| {
        qualified([module_path.as_str(), &key.to_string(), &variant.to_string()])
    };
    let names: Vec<String> = variants.iter().map(name_of).collect();
    let sentinel_name = name_of(&sentinel);
    let indices = (0..group.count).map(|i| Literal::isize_unsuffixed(i as isize));

    let module_doc = format!(" The `{prefix}` key group.");
    let key_doc = format!(" One of the {} keys of the `{prefix}` group, or `NoKey`.", group.count);

    let serde_impls = group.serializable.then(|| generate_serde_impls(&key));
    let serde_import = group.serializable.then(|| {
        quote! { use serde::{Deserialize, Deserializer, Serialize, Serializer}; }
    });

    quote! {
        #![doc = #module_doc]

        #serde_import

        #[doc = #key_doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum #key {
            #(#variants,)*
            /// No key of this group.
            #sentinel,
        }

        impl #key {
            /// The fully qualified name of this key.
            pub fn qualified_name(self) -> &'static str {
                match self {
                    #(Self::#variants => #names,)*
                    Self::#sentinel => #sentinel_name,
                }
            }

            /// The key with the given qualified name. Unknown names map to `NoKey`.
            pub fn from_qualified_name(name: &str) -> Self {
                match name {
                    #(#names => Self::#variants,)*
                    _ => Self::#sentinel,
                }
            }
        }

        /// Indexes the keys of the group.
        pub struct #keys;

        impl #keys {
            /// Number of keys, not counting `NoKey`.
            pub const COUNT: usize = #count;

            /// All keys in index order.
            pub const ALL: [#key; #count] = [#(#key::#variants),*];

            /// The key at `index`, or `NoKey` when out of range.
            pub fn get(index: usize) -> #key {
                Self::ALL.get(index).copied().unwrap_or(#key::#sentinel)
            }

            /// The index of `key`, or -1 for `NoKey`.
            pub fn index(key: #key) -> isize {
                match key {
                    #(#key::#variants => #indices,)*
                    #key::#sentinel => -1,
                }
            }
        }

        #serde_impls
    }
}

/// Serializes keys as their qualified name; unknown names read back as `NoKey`.
fn generate_serde_impls(key: &proc_macro2::Ident) -> TokenStream {
    quote! {
        impl Serialize for #key {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.qualified_name())
            }
        }

        impl<'de> Deserialize<'de> for #key {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let name = String::deserialize(deserializer)?;
                Ok(Self::from_qualified_name(&name))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{format_generated_code, location};

    fn keys(group: &KeyGroup, package: &str) -> String {
        format_generated_code(&generate_keys(group, &location(package))).expect("format")
    }

    #[test]
    fn module_name_is_snake_case() {
        assert_eq!(keys_module("Column"), "column_keys");
        assert_eq!(keys_module("TableColumn"), "table_column_keys");
    }

    #[test]
    fn enum_has_numbered_keys_and_sentinel() {
        let code = keys(&KeyGroup::new("Column", 3), "keys");
        assert!(code.contains("pub enum ColumnKey {"));
        for i in 0..3 {
            assert!(code.contains(&format!("Key{i},")));
        }
        assert!(!code.contains("Key3,"));
        assert!(code.contains("NoKey,"));
        assert!(code.contains("pub const COUNT: usize = 3;"));
        assert!(code.contains("pub const ALL: [ColumnKey; 3]"));
    }

    #[test]
    fn qualified_names_use_module_path() {
        let location = ResolvedLocation::new("src", "app", "keys");
        let code = format_generated_code(&generate_keys(&KeyGroup::new("Column", 2), &location))
            .expect("format");
        assert!(code.contains("\"app::keys::ColumnKey::Key1\""));
        assert!(code.contains("\"app::keys::ColumnKey::NoKey\""));
    }

    #[test]
    fn index_of_sentinel_is_negative() {
        let code = keys(&KeyGroup::new("Column", 2), "keys");
        assert!(code.contains("ColumnKey::Key1 => 1,"));
        assert!(code.contains("ColumnKey::NoKey => -1,"));
        assert!(code.contains("unwrap_or(ColumnKey::NoKey)"));
    }

    #[test]
    fn prefix_is_capitalized() {
        let code = keys(&KeyGroup::new("row", 1), "keys");
        assert!(code.contains("pub enum RowKey"));
        assert!(code.contains("pub struct RowKeys;"));
    }

    // === serialization ===

    #[test]
    fn serde_impls_only_when_serializable() {
        let plain = keys(&KeyGroup::new("Column", 2), "keys");
        assert!(!plain.contains("serde"));

        let serializable = keys(&KeyGroup::new("Column", 2).serializable(), "keys");
        assert!(serializable.contains("use serde::{Deserialize, Deserializer, Serialize, Serializer};"));
        assert!(serializable.contains("impl Serialize for ColumnKey"));
        assert!(serializable.contains("impl<'de> Deserialize<'de> for ColumnKey"));
        assert!(serializable.contains("serializer.serialize_str(self.qualified_name())"));
    }
}
