//! Lens generation for records.
//!
//! The record is generated together with its lens family: a setter shape
//! alias, transactional `set`, per-field simple setters and extension
//! traits on the shape that compose edits field by field.

use std::collections::BTreeSet;

use algebraic_define::RecordDescriptor;
use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};

use super::OpticsPaths;
use super::fields::{RenderedField, TypeParams, doc_attrs, render_fields, type_imports};
use super::shape::{
    Flavor, compose_slot, identity_shape, setter_binding, shape_pattern, shape_type,
};
use crate::errors::GeneratorError;
use crate::naming::{FUNCTIONS_MODULE, file_item_path, product_module, product_type};
use crate::syntax;

/// Setter name of `field` for a record with `suffix`.
pub fn setter_name(field: &str, suffix: Option<&str>) -> String {
    format!("{field}{}", suffix.unwrap_or_default())
}

/// The support imports every optic file pulls from `functions.rs`.
pub(crate) fn support_imports(paths: &OpticsPaths) -> TokenStream {
    let items = [
        "AsyncSetter",
        "BoxFuture",
        "Setter",
        "id_async_setter",
        "id_setter",
        "then",
        "then_async",
    ]
    .map(|item| file_item_path(&paths.support, FUNCTIONS_MODULE, &format_ident!("{}", item)));
    quote! { #(use #items;)* }
}

/// `use` of `ProductK` for every shape width in `counts` that needs one.
pub(crate) fn product_imports(
    paths: &OpticsPaths,
    counts: impl IntoIterator<Item = usize>,
) -> TokenStream {
    let dimensions: BTreeSet<usize> = counts.into_iter().filter(|k| *k >= 2).collect();
    let paths = dimensions
        .into_iter()
        .map(|k| file_item_path(&paths.products, &product_module(k), &product_type(k)));
    quote! { #(use #paths;)* }
}

/// Generates the record of `record` and its lens family.
///
/// ## Examples
///
/// ```ignore
/// // Point { x: i32, y: String } produces, among others:
/// pub type PointSetters = Product2<Setter<String>, Setter<i32>>;
///
/// impl Point {
///     pub fn x(self, f: impl FnOnce(i32) -> i32) -> Self;
///     pub fn set(self, transaction: impl FnOnce(&Self) -> PointSetters) -> Self;
///     pub fn transaction(block: impl FnOnce(PointSetters) -> PointSetters)
///         -> impl FnOnce(&Self) -> PointSetters;
/// }
///
/// pub trait PointSetterOps {
///     fn x(self, f: impl FnOnce(i32) -> i32 + 'static) -> Self;
///     fn y(self, f: impl FnOnce(String) -> String + 'static) -> Self;
/// }
/// ```
///
/// ## Errors
///
/// Returns `GeneratorError::InvalidSyntax` when a name, type or expression
/// of the record is not valid Rust.
pub fn generate_lens(
    record: &RecordDescriptor,
    paths: &OpticsPaths,
) -> Result<TokenStream, GeneratorError> {
    let owner = record.name.as_str();
    let name = syntax::ident(owner, "record name", owner)?;
    let fields = render_fields(owner, &record.fields, record.serializable)?;
    let params = TypeParams::collect(owner, &record.fields)?;
    let setter_names = record
        .fields
        .iter()
        .map(|f| {
            let setter = setter_name(&f.name, record.setters_suffix.as_deref());
            syntax::ident(owner, "setter name", &setter)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let setters = format_ident!("{}Setters", name);
    let async_setters = format_ident!("{}AsyncSetters", name);
    let declare = params.declare();
    let apply = params.apply();
    let count = fields.len();
    let types: Vec<&syn::Type> = fields.iter().map(|f| &f.ty).collect();

    let support = support_imports(paths);
    let products = product_imports(paths, [count]);
    let field_imports = type_imports(owner, record.fields.iter().map(|f| &f.ty))?;
    let serde_import = record
        .serializable
        .then(|| quote! { use serde::{Deserialize, Serialize}; });
    let serde_derive = record.serializable.then(|| quote! { , Serialize, Deserialize });

    let module_doc = format!(" The `{owner}` record and its lenses.");
    let docs = doc_attrs(&record.doc);
    let field_names = fields.iter().map(|f| &f.name);
    let field_attrs = fields.iter().map(|f| &f.attrs);

    let sync_shape = shape_type(&types, Flavor::Sync);
    let async_shape = shape_type(&types, Flavor::Async);
    let setters_doc = format!(" Setters of every field of [`{owner}`]; field i is factor i.");
    let async_setters_doc = format!(" Asynchronous setters of every field of [`{owner}`].");

    let constructor = generate_constructor(owner, &fields);
    let simple = generate_simple_setters(&fields, &setter_names, &params);
    let transactional = generate_transactional(&fields, &setters, &async_setters, &apply);
    let sync_ops = generate_setter_ops(owner, &fields, &setter_names, &params, &setters, Flavor::Sync);
    let async_ops =
        generate_setter_ops(owner, &fields, &setter_names, &params, &async_setters, Flavor::Async);
    let declare_static = params.declare_static();

    Ok(quote! {
        #![doc = #module_doc]

        use std::future::Future;

        #serde_import

        #support
        #products
        #field_imports

        #docs
        #[derive(Debug, Clone, PartialEq #serde_derive)]
        pub struct #name #declare {
            #(#field_attrs pub #field_names: #types,)*
        }

        #[doc = #setters_doc]
        pub type #setters #declare = #sync_shape;

        #[doc = #async_setters_doc]
        pub type #async_setters #declare = #async_shape;

        impl #declare #name #apply {
            #constructor

            #simple
        }

        impl #declare_static #name #apply {
            #transactional
        }

        #sync_ops

        #async_ops
    })
}

/// `new(required..)`, with defaulted fields taking their default value.
fn generate_constructor(owner: &str, fields: &[RenderedField]) -> TokenStream {
    let required = fields.iter().filter(|f| f.default.is_none());
    let names = required.clone().map(|f| &f.name);
    let types = required.map(|f| &f.ty);
    let initializers = fields.iter().map(RenderedField::initializer);
    let doc = format!(" Creates a [`{owner}`]; defaulted fields take their default value.");

    quote! {
        #[doc = #doc]
        pub fn new(#(#names: #types),*) -> Self {
            Self { #(#initializers),* }
        }
    }
}

/// `<field>(self, f)` and `<field>_async(self, f)` for every field.
fn generate_simple_setters(
    fields: &[RenderedField],
    setter_names: &[Ident],
    params: &TypeParams,
) -> TokenStream {
    let rest = (fields.len() > 1).then(|| quote! { ..self });
    let future = params.fresh("Fut");

    let setters = fields.iter().zip(setter_names).map(|(field, setter)| {
        let name = &field.name;
        let ty = &field.ty;
        let setter_async = format_ident!("{}_async", setter);
        let doc = format!(" Applies `f` to `{name}`.");
        let async_doc = format!(" Applies `f` to `{name}` and awaits the new value.");
        quote! {
            #[doc = #doc]
            pub fn #setter(self, f: impl FnOnce(#ty) -> #ty) -> Self {
                Self { #name: f(self.#name), #rest }
            }

            #[doc = #async_doc]
            pub async fn #setter_async<#future: Future<Output = #ty>>(
                self,
                f: impl FnOnce(#ty) -> #future,
            ) -> Self {
                Self { #name: f(self.#name).await, #rest }
            }
        }
    });

    quote! { #(#setters)* }
}

/// `set`, `transaction` and their async counterparts.
fn generate_transactional(
    fields: &[RenderedField],
    setters: &Ident,
    async_setters: &Ident,
    apply: &TokenStream,
) -> TokenStream {
    let count = fields.len();
    let pattern = shape_pattern(count);
    let names: Vec<_> = fields.iter().map(|f| &f.name).collect();
    let applied = |flavor: Flavor| {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| flavor.apply(&setter_binding(i + 1), quote! { self.#name }))
            .collect::<Vec<_>>()
    };
    let sync_applied = applied(Flavor::Sync);
    let async_applied = applied(Flavor::Async);
    let identity = identity_shape(count, Flavor::Sync);
    let async_identity = identity_shape(count, Flavor::Async);

    quote! {
        /// Applies the setters chosen by `transaction`, in field declaration order.
        pub fn set(self, transaction: impl FnOnce(&Self) -> #setters #apply) -> Self {
            let #pattern = transaction(&self);
            Self { #(#names: #sync_applied),* }
        }

        /// A transaction that edits the all-identity setters with `block`.
        pub fn transaction(
            block: impl FnOnce(#setters #apply) -> #setters #apply,
        ) -> impl FnOnce(&Self) -> #setters #apply {
            move |_: &Self| block(#identity)
        }

        /// Applies the asynchronous setters chosen by `transaction`, awaiting in field declaration order.
        pub async fn set_async(self, transaction: impl FnOnce(&Self) -> #async_setters #apply) -> Self {
            let #pattern = transaction(&self);
            Self { #(#names: #async_applied),* }
        }

        /// A transaction that edits the all-identity asynchronous setters with `block`.
        pub fn transaction_async(
            block: impl FnOnce(#async_setters #apply) -> #async_setters #apply,
        ) -> impl FnOnce(&Self) -> #async_setters #apply {
            move |_: &Self| block(#async_identity)
        }
    }
}

/// The extension trait adding product setters to the shape alias `shape`.
fn generate_setter_ops(
    owner: &str,
    fields: &[RenderedField],
    setter_names: &[Ident],
    params: &TypeParams,
    shape: &Ident,
    flavor: Flavor,
) -> TokenStream {
    let count = fields.len();
    let trait_name = match flavor {
        Flavor::Sync => format_ident!("{}SetterOps", owner),
        Flavor::Async => format_ident!("{}AsyncSetterOps", owner),
    };
    let declare = params.declare();
    let declare_static = params.declare_static();
    let apply = params.apply();
    let target = format_ident!("self");

    let signatures: Vec<_> = fields
        .iter()
        .zip(setter_names)
        .map(|(field, setter)| {
            let edit = flavor.edit(&field.ty);
            quote! { fn #setter(self, f: #edit) -> Self }
        })
        .collect();
    let bodies = fields.iter().enumerate().map(|(i, field)| {
        compose_slot(count, i + 1, &field.ty, flavor, &target)
    });
    let docs = fields
        .iter()
        .map(|field| format!(" Chains `f` after the current setter of `{}`.", field.name));
    let trait_doc = match flavor {
        Flavor::Sync => format!(" Product setters of [`{owner}`]; repeated edits of a field compose."),
        Flavor::Async => format!(" Asynchronous product setters of [`{owner}`]."),
    };

    quote! {
        #[doc = #trait_doc]
        pub trait #trait_name #declare {
            #(#[doc = #docs] #signatures;)*
        }

        impl #declare_static #trait_name #apply for #shape #apply {
            #(#signatures { #bodies })*
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        format_generated_code, inherent_method_names, location, make_point, make_tagged,
        parse_generated, trait_method_names,
    };
    use algebraic_define::{FieldDescriptor, SerializationKind, TypeDescriptor};

    fn paths() -> OpticsPaths {
        OpticsPaths {
            products: location("products"),
            sums: location("sums"),
            support: location("lenses"),
        }
    }

    fn lens(record: &RecordDescriptor) -> String {
        format_generated_code(&generate_lens(record, &paths()).expect("generates")).expect("format")
    }

    fn tokens(record: &RecordDescriptor) -> String {
        generate_lens(record, &paths()).expect("generates").to_string()
    }

    // === shape ===

    #[test]
    fn point_setters_are_a_product_high_to_low() {
        let code = lens(&make_point());
        assert!(code.contains("pub type PointSetters = Product2<Setter<String>, Setter<i32>>;"));
        assert!(code.contains(
            "pub type PointAsyncSetters = Product2<AsyncSetter<String>, AsyncSetter<i32>>;"
        ));
        assert!(code.contains("use crate::products::product_2::Product2;"));
        assert!(code.contains("use crate::lenses::functions::Setter;"));
    }

    #[test]
    fn point_has_one_product_setter_per_field() {
        let file = parse_generated(&generate_lens(&make_point(), &paths()).expect("generates"));
        assert_eq!(trait_method_names(&file, "PointSetterOps"), vec!["x", "y"]);
        assert_eq!(trait_method_names(&file, "PointAsyncSetterOps"), vec!["x", "y"]);
    }

    #[test]
    fn single_field_record_uses_bare_setter() {
        let record = RecordDescriptor::new("Meters")
            .field(FieldDescriptor::new("value", TypeDescriptor::new("f64")));
        let code = lens(&record);
        assert!(code.contains("pub type MetersSetters = Setter<f64>;"));
        assert!(!code.contains("use crate::products"));
        let tokens = tokens(&record);
        assert!(tokens.contains("then (self , Box :: new (f))"));
        assert!(!tokens.contains(".. self"));
    }

    // === record ===

    #[test]
    fn record_struct_and_constructor() {
        let code = lens(&make_tagged());
        assert!(code.contains("/// A value with a label and a weight."));
        assert!(code.contains("pub struct Tagged<T> {"));
        assert!(code.contains("pub fn new(value: T, label: String) -> Self"));
        assert!(tokens(&make_tagged()).contains("Self { value , label , weight : 1 }"));
        assert!(code.contains("impl<T: 'static> Tagged<T> {"));
        assert!(code.contains("impl<T: 'static> TaggedSetterOps<T> for TaggedSetters<T> {"));
    }

    #[test]
    fn inherent_methods_cover_simple_and_transactional() {
        let file = parse_generated(&generate_lens(&make_point(), &paths()).expect("generates"));
        assert_eq!(
            inherent_method_names(&file),
            vec![
                "new",
                "x",
                "x_async",
                "y",
                "y_async",
                "set",
                "transaction",
                "set_async",
                "transaction_async"
            ]
        );
    }

    #[test]
    fn set_applies_factor_i_to_field_i() {
        let code = tokens(&make_point());
        assert!(code.contains(
            "let Product2 { factor2 : setter2 , factor1 : setter1 } = transaction (& self) ;"
        ));
        assert!(code.contains("Self { x : setter1 (self . x) , y : setter2 (self . y) }"));
        assert!(code.contains("x : setter1 (self . x) . await , y : setter2 (self . y) . await"));
    }

    #[test]
    fn product_setter_maps_its_factor() {
        let code = tokens(&make_point());
        assert!(code.contains(
            "self . map2 (move | old : Setter < String > | then (old , Box :: new (f)))"
        ));
        assert!(code.contains(
            "self . map1 (move | old : AsyncSetter < i32 > | then_async (old , Box :: new (f)))"
        ));
    }

    #[test]
    fn suffix_applies_to_every_setter() {
        let code = lens(&make_point().setters_suffix("_with"));
        assert!(code.contains("pub fn x_with(self, f: impl FnOnce(i32) -> i32) -> Self"));
        assert!(code.contains("pub async fn x_with_async"));
        assert!(code.contains("fn y_with(self, f: impl FnOnce(String) -> String + 'static) -> Self;"));
    }

    // === serialization ===

    #[test]
    fn serializable_record_derives_serde() {
        let record = make_point()
            .field(FieldDescriptor::new(
                "cache",
                TypeDescriptor::new("Vec<u8>").serialization(SerializationKind::Transient),
            ))
            .serializable();
        let code = lens(&record);
        assert!(code.contains("use serde::{Deserialize, Serialize};"));
        assert!(code.contains("#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]"));
        assert!(code.contains("#[serde(skip)]"));
    }

    #[test]
    fn plain_record_has_no_serde() {
        assert!(!lens(&make_point()).contains("serde"));
    }

    // === errors ===

    #[test]
    fn keyword_field_is_rejected() {
        let record = RecordDescriptor::new("Bad").field(FieldDescriptor::new("type", TypeDescriptor::new("i32")));
        let err = generate_lens(&record, &paths()).unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidSyntax { .. }));
    }
}
