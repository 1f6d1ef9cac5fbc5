//! Prism generation for variant sets.
//!
//! The enum is generated with its base-field getters, variant
//! constructors and a prism family. The setter shape of the whole set is
//! the sum of the variants' setter shapes, so a transaction always targets
//! exactly one variant and leaves every other variant untouched.

use algebraic_define::{SerializationKind, VariantDescriptor, VariantSetDescriptor};
use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};

use super::OpticsPaths;
use super::fields::{RenderedField, TypeParams, doc_attrs, render_fields, type_imports};
use super::lens::{product_imports, setter_name, support_imports};
use super::shape::{
    Flavor, compose_slot, identity_shape, setter_binding, shape_pattern, shape_type,
};
use super::shared::{SharedPrismParameter, collect_shared_parameters};
use crate::errors::GeneratorError;
use crate::naming::{file_item_path, snake_case, sum_module, sum_type, summand};
use crate::syntax;

/// Per-variant setter name, e.g. `radius_circle`.
pub fn variant_setter_name(field: &str, variant: &str, suffix: Option<&str>) -> String {
    format!("{field}_{}{}", snake_case(variant), suffix.unwrap_or_default())
}

/// A variant with its model text parsed.
struct RenderedVariant {
    name: Ident,
    constructor: Ident,
    fields: Vec<RenderedField>,
    docs: TokenStream,
    /// Getter arm for each base field, in base declaration order.
    getter_arms: Vec<TokenStream>,
}

impl RenderedVariant {
    fn new(
        set: &VariantSetDescriptor,
        variant: &VariantDescriptor,
        base: &[RenderedField],
    ) -> Result<Self, GeneratorError> {
        let owner = set.name.as_str();
        let name = syntax::ident(owner, "variant name", &variant.name)?;
        let constructor = syntax::ident(owner, "constructor name", &snake_case(&variant.name))?;
        let fields = render_fields(owner, &variant.fields, set.serializable)?;

        let getter_arms = base
            .iter()
            .map(|base_field| {
                let field = &base_field.name;
                let key = field.to_string();
                if variant.overrides.contains(&key) {
                    return Ok(quote! { Self::#name { #field: value, .. } => value.clone(), });
                }
                match variant.default_values.get(&key) {
                    Some(text) => {
                        let value = syntax::expr(owner, text)?;
                        Ok(quote! { Self::#name { .. } => #value, })
                    }
                    None => Err(GeneratorError::MissingBaseValue {
                        owner: owner.to_string(),
                        variant: variant.name.clone(),
                        field: key,
                    }),
                }
            })
            .collect::<Result<Vec<_>, GeneratorError>>()?;

        Ok(Self {
            name,
            constructor,
            fields,
            docs: doc_attrs(&variant.doc),
            getter_arms,
        })
    }

    fn types(&self) -> Vec<&syn::Type> {
        self.fields.iter().map(|f| &f.ty).collect()
    }

    /// `Self::Circle { label: value1, radius: value2 }`
    fn binding_pattern(&self) -> TokenStream {
        let name = &self.name;
        let fields = self.fields.iter().map(|f| &f.name);
        let values = (1..=self.fields.len()).map(value_binding);
        quote! { Self::#name { #(#fields: #values),* } }
    }

    /// The variant rebuilt from its value bindings through its setters.
    fn rebuilt(&self, flavor: Flavor) -> TokenStream {
        let name = &self.name;
        let fields = self.fields.iter().map(|f| &f.name);
        let applied = (1..=self.fields.len()).map(|i| {
            let value = value_binding(i);
            flavor.apply(&setter_binding(i), quote! { #value })
        });
        quote! { Self::#name { #(#fields: #applied),* } }
    }
}

fn value_binding(index: usize) -> Ident {
    format_ident!("value{}", index)
}

/// Generates the enum of `set` and its prism family.
///
/// ## Examples
///
/// ```ignore
/// // Shape { Circle { label, radius }, Square { label, side }, Dot {} } produces:
/// pub type ShapeSetters = Sum3<
///     (),
///     Product2<Setter<f64>, Setter<String>>,
///     Product2<Setter<f64>, Setter<String>>,
/// >;
///
/// impl Shape {
///     pub fn label(&self) -> String;
///     pub fn circle(label: String, radius: f64) -> Self;
///     pub fn set(self, transaction: impl FnOnce(&Self) -> ShapeSetters) -> Self;
/// }
///
/// pub trait ShapeSetterOps {
///     fn label(self, f: impl FnOnce(String) -> String + 'static) -> Self;
///     fn label_circle(self, f: impl FnOnce(String) -> String + 'static) -> Self;
///     fn radius_circle(self, f: impl FnOnce(f64) -> f64 + 'static) -> Self;
///     // ..
/// }
/// ```
///
/// ## Errors
///
/// Returns `GeneratorError::InvalidSyntax` for invalid model text,
/// `GeneratorError::MissingBaseValue` when a variant has no value for a
/// base field and `GeneratorError::SharedParameterTypeClash` when a field
/// name recurs with different types.
pub fn generate_prism(
    set: &VariantSetDescriptor,
    paths: &OpticsPaths,
) -> Result<TokenStream, GeneratorError> {
    let owner = set.name.as_str();
    let name = syntax::ident(owner, "variant set name", owner)?;
    let base = render_fields(owner, &set.fields, false)?;
    let variants = set
        .variants
        .iter()
        .map(|variant| RenderedVariant::new(set, variant, &base))
        .collect::<Result<Vec<_>, _>>()?;
    let shared = collect_shared_parameters(set)?;
    let params = TypeParams::collect(owner, set.variants.iter().flat_map(|v| v.fields.iter()))?;

    let count = variants.len();
    let sum = sum_type(count);
    let setters = format_ident!("{}Setters", name);
    let async_setters = format_ident!("{}AsyncSetters", name);
    let declare = params.declare();
    let declare_static = params.declare_static();
    let apply = params.apply();

    let widths: Vec<usize> = variants.iter().map(|v| v.fields.len()).collect();
    let support = widths.iter().any(|k| *k > 0).then(|| support_imports(paths));
    let products = product_imports(paths, widths.iter().copied());
    let sum_path = file_item_path(&paths.sums, &sum_module(count), &sum);
    let field_imports = type_imports(
        owner,
        set.fields
            .iter()
            .chain(set.variants.iter().flat_map(|v| v.fields.iter()))
            .map(|f| &f.ty),
    )?;
    let serde_import = set
        .serializable
        .then(|| quote! { use serde::{Deserialize, Serialize}; });
    let serde_derive = set.serializable.then(|| quote! { , Serialize, Deserialize });
    let serde_tag = (set.serializable && set.serialization == SerializationKind::Polymorphic)
        .then(|| quote! { #[serde(tag = "type")] });

    let module_doc = format!(" The `{owner}` variant set and its prisms.");
    let docs = doc_attrs(&set.doc);
    let variant_decls = variants.iter().map(|variant| {
        let docs = &variant.docs;
        let variant_name = &variant.name;
        let attrs = variant.fields.iter().map(|f| &f.attrs);
        let fields = variant.fields.iter().map(|f| &f.name);
        let types = variant.fields.iter().map(|f| &f.ty);
        quote! {
            #docs
            #variant_name { #(#attrs #fields: #types),* }
        }
    });

    let sync_shape = sum_shape(&sum, &variants, Flavor::Sync);
    let async_shape = sum_shape(&sum, &variants, Flavor::Async);
    let setters_doc = format!(" Setters of one variant of [`{owner}`]; variant i is summand i.");
    let async_setters_doc = format!(" Asynchronous setters of one variant of [`{owner}`].");

    let getters = generate_getters(&name, &base, &variants, &declare, &apply);
    let constructors = generate_constructors(&variants);
    let transactional = generate_transactional(&sum, &variants, &setters, &async_setters, &apply);
    let sync_ops = generate_setter_ops(set, &variants, &shared, &params, &setters, Flavor::Sync)?;
    let async_ops =
        generate_setter_ops(set, &variants, &shared, &params, &async_setters, Flavor::Async)?;

    Ok(quote! {
        #![doc = #module_doc]

        #serde_import

        #support
        #products
        use #sum_path;
        #field_imports

        #docs
        #[derive(Debug, Clone, PartialEq #serde_derive)]
        #serde_tag
        pub enum #name #declare {
            #(#variant_decls,)*
        }

        #[doc = #setters_doc]
        pub type #setters #declare = #sync_shape;

        #[doc = #async_setters_doc]
        pub type #async_setters #declare = #async_shape;

        #getters

        impl #declare #name #apply {
            #constructors
        }

        impl #declare_static #name #apply {
            #transactional
        }

        #sync_ops

        #async_ops
    })
}

/// `SumV<shape_V, .., shape_1>`.
fn sum_shape(sum: &Ident, variants: &[RenderedVariant], flavor: Flavor) -> TokenStream {
    let shapes = variants.iter().rev().map(|v| shape_type(&v.types(), flavor));
    quote! { #sum<#(#shapes),*> }
}

/// Owned getters of the base fields, exhaustive over the variants.
fn generate_getters(
    name: &Ident,
    base: &[RenderedField],
    variants: &[RenderedVariant],
    declare: &TokenStream,
    apply: &TokenStream,
) -> TokenStream {
    if base.is_empty() {
        return TokenStream::new();
    }
    let bounds = base.iter().map(|f| &f.ty);
    let getters = base.iter().enumerate().map(|(i, field)| {
        let getter = &field.name;
        let ty = &field.ty;
        let arms = variants.iter().map(|v| &v.getter_arms[i]);
        let doc = format!(" The `{getter}` of the live variant.");
        quote! {
            #[doc = #doc]
            pub fn #getter(&self) -> #ty {
                match self {
                    #(#arms)*
                }
            }
        }
    });

    quote! {
        impl #declare #name #apply
        where
            #(#bounds: Clone),*
        {
            #(#getters)*
        }
    }
}

/// One constructor per variant; defaulted fields take their default value.
fn generate_constructors(variants: &[RenderedVariant]) -> TokenStream {
    let constructors = variants.iter().map(|variant| {
        let constructor = &variant.constructor;
        let name = &variant.name;
        let required = variant.fields.iter().filter(|f| f.default.is_none());
        let params = required.clone().map(|f| &f.name);
        let types = required.map(|f| &f.ty);
        let initializers = variant.fields.iter().map(RenderedField::initializer);
        let doc = format!(" Creates the `{name}` variant.");
        quote! {
            #[doc = #doc]
            pub fn #constructor(#(#params: #types),*) -> Self {
                Self::#name { #(#initializers),* }
            }
        }
    });
    quote! { #(#constructors)* }
}

/// `set`, `transaction` and their async counterparts.
fn generate_transactional(
    sum: &Ident,
    variants: &[RenderedVariant],
    setters: &Ident,
    async_setters: &Ident,
    apply: &TokenStream,
) -> TokenStream {
    let set_arms = |flavor: Flavor| {
        variants
            .iter()
            .enumerate()
            .map(|(i, variant)| {
                let summand = summand(i + 1);
                let shape = shape_pattern(variant.fields.len());
                let bound = variant.binding_pattern();
                let rebuilt = variant.rebuilt(flavor);
                quote! { (#sum::#summand(#shape), #bound) => #rebuilt, }
            })
            .collect::<Vec<_>>()
    };
    let identity_arms = |flavor: Flavor| {
        variants
            .iter()
            .enumerate()
            .map(|(i, variant)| {
                let summand = summand(i + 1);
                let name = &variant.name;
                let identity = identity_shape(variant.fields.len(), flavor);
                quote! { Self::#name { .. } => #sum::#summand(#identity), }
            })
            .collect::<Vec<_>>()
    };
    let sync_set = set_arms(Flavor::Sync);
    let async_set = set_arms(Flavor::Async);
    let sync_identity = identity_arms(Flavor::Sync);
    let async_identity = identity_arms(Flavor::Async);

    quote! {
        /// Applies the setters chosen by `transaction` when they target the live variant.
        pub fn set(self, transaction: impl FnOnce(&Self) -> #setters #apply) -> Self {
            match (transaction(&self), self) {
                #(#sync_set)*
                (_, unchanged) => unchanged,
            }
        }

        /// A transaction that edits the identity setters of the live variant with `block`.
        pub fn transaction(
            block: impl FnOnce(#setters #apply) -> #setters #apply,
        ) -> impl FnOnce(&Self) -> #setters #apply {
            move |live: &Self| {
                block(match live {
                    #(#sync_identity)*
                })
            }
        }

        /// Applies the asynchronous setters chosen by `transaction` when they target the live variant.
        pub async fn set_async(self, transaction: impl FnOnce(&Self) -> #async_setters #apply) -> Self {
            match (transaction(&self), self) {
                #(#async_set)*
                (_, unchanged) => unchanged,
            }
        }

        /// A transaction that edits the identity asynchronous setters of the live variant with `block`.
        pub fn transaction_async(
            block: impl FnOnce(#async_setters #apply) -> #async_setters #apply,
        ) -> impl FnOnce(&Self) -> #async_setters #apply {
            move |live: &Self| {
                block(match live {
                    #(#async_identity)*
                })
            }
        }
    }
}

/// The extension trait adding shared and per-variant setters to `shape`.
fn generate_setter_ops(
    set: &VariantSetDescriptor,
    variants: &[RenderedVariant],
    shared: &[SharedPrismParameter],
    params: &TypeParams,
    shape: &Ident,
    flavor: Flavor,
) -> Result<TokenStream, GeneratorError> {
    let owner = set.name.as_str();
    let sum = sum_type(variants.len());
    let binding = format_ident!("setters");
    let mut signatures = Vec::new();
    let mut bodies = Vec::new();
    let mut docs = Vec::new();

    for parameter in shared {
        let method = syntax::ident(
            owner,
            "shared setter name",
            &setter_name(&parameter.name, set.setters_suffix.as_deref()),
        )?;
        let ty = syntax::ty(owner, &parameter.ty.name)?;
        let edit = flavor.edit(&ty);
        let arms = parameter.occurrences.iter().map(|(variant, field)| {
            let summand = summand(*variant);
            let width = variants[variant - 1].fields.len();
            let composed = compose_slot(width, *field, &ty, flavor, &binding);
            quote! { #sum::#summand(#binding) => #sum::#summand(#composed), }
        });
        let passthrough = (!parameter.covers(variants.len())).then(|| quote! { other => other, });
        signatures.push(quote! { fn #method(self, f: #edit) -> Self });
        bodies.push(quote! {
            match self {
                #(#arms)*
                #passthrough
            }
        });
        docs.push(format!(
            " Chains `f` after the setter of `{}` in every variant that has it.",
            parameter.name
        ));
    }

    for (variant_index, (variant, descriptor)) in variants.iter().zip(&set.variants).enumerate() {
        let summand = summand(variant_index + 1);
        let width = variant.fields.len();
        for (field_index, field) in variant.fields.iter().enumerate() {
            let method = syntax::ident(
                owner,
                "variant setter name",
                &variant_setter_name(
                    &field.name.to_string(),
                    &descriptor.name,
                    set.setters_suffix.as_deref(),
                ),
            )?;
            let edit = flavor.edit(&field.ty);
            let composed = compose_slot(width, field_index + 1, &field.ty, flavor, &binding);
            signatures.push(quote! { fn #method(self, f: #edit) -> Self });
            bodies.push(quote! {
                match self {
                    #sum::#summand(#binding) => #sum::#summand(#composed),
                    other => other,
                }
            });
            docs.push(format!(
                " Chains `f` after the setter of `{}` when `{}` is targeted.",
                field.name, descriptor.name
            ));
        }
    }

    let trait_name = match flavor {
        Flavor::Sync => format_ident!("{}SetterOps", owner),
        Flavor::Async => format_ident!("{}AsyncSetterOps", owner),
    };
    let trait_doc = match flavor {
        Flavor::Sync => format!(" Prism setters of [`{owner}`]."),
        Flavor::Async => format!(" Asynchronous prism setters of [`{owner}`]."),
    };
    let declare = params.declare();
    let declare_static = params.declare_static();
    let apply = params.apply();

    Ok(quote! {
        #[doc = #trait_doc]
        pub trait #trait_name #declare {
            #(#[doc = #docs] #signatures;)*
        }

        impl #declare_static #trait_name #apply for #shape #apply {
            #(#signatures { #bodies })*
        }
    })
}
