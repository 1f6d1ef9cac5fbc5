//! Module index generation (`mod.rs` / `lib.rs`).

use std::collections::BTreeSet;

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

/// Generates an index declaring and glob re-exporting `modules`.
///
/// `modules` holds both file modules and subdirectories of the indexed
/// directory. The set keeps declarations sorted, so indexes are stable.
pub fn generate_module_index(doc: &str, modules: &BTreeSet<String>) -> TokenStream {
    let doc = format!(" {doc}");
    let modules: Vec<_> = modules.iter().map(|m| format_ident!("{}", m)).collect();

    quote! {
        #![doc = #doc]

        #(pub mod #modules;)*

        #(pub use #modules::*;)*
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::format_generated_code;

    #[test]
    fn declares_and_reexports_in_order() {
        let modules: BTreeSet<String> = ["sum_2", "product_2", "product"]
            .into_iter()
            .map(String::from)
            .collect();
        let code = format_generated_code(&generate_module_index("Products.", &modules)).expect("format");

        let product = code.find("pub mod product;").expect("marker declared");
        let product_2 = code.find("pub mod product_2;").expect("product_2 declared");
        assert!(product < product_2);
        assert!(code.contains("pub use sum_2::*;"));
        assert!(code.starts_with("//! Products."));
    }

    #[test]
    fn empty_index_is_valid() {
        let code = format_generated_code(&generate_module_index("Nothing yet.", &BTreeSet::new()))
            .expect("format");
        assert!(!code.contains("pub mod"));
    }
}
