//! Field rendering shared by lenses and prisms.

use std::collections::BTreeSet;

use algebraic_define::{FieldDescriptor, Generic, SerializationKind, TypeDescriptor};
use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};

use crate::errors::GeneratorError;
use crate::syntax;

/// A field with its model text parsed.
pub(crate) struct RenderedField {
    pub name: Ident,
    pub ty: syn::Type,
    pub default: Option<syn::Expr>,
    /// Docs, modifiers and serde attributes, in that order.
    pub attrs: TokenStream,
}

impl RenderedField {
    pub fn new(
        owner: &str,
        field: &FieldDescriptor,
        serializable: bool,
    ) -> Result<Self, GeneratorError> {
        let name = syntax::ident(owner, "field name", &field.name)?;
        let ty = syntax::ty(owner, &field.ty.name)?;
        let default = field
            .default_value
            .as_deref()
            .map(|text| syntax::expr(owner, text))
            .transpose()?;

        let docs = doc_attrs(&field.doc);
        let modifiers = field
            .modifiers
            .iter()
            .map(|text| syntax::meta(owner, text))
            .collect::<Result<Vec<_>, _>>()?;
        let serde = if serializable {
            serde_field_attr(owner, &field.ty.serialization)?
        } else {
            TokenStream::new()
        };

        Ok(Self {
            name,
            ty,
            default,
            attrs: quote! {
                #docs
                #(#[#modifiers])*
                #serde
            },
        })
    }

    /// `name: value` when defaulted, the bare name otherwise.
    pub fn initializer(&self) -> TokenStream {
        let name = &self.name;
        match &self.default {
            Some(value) => quote! { #name: #value },
            None => quote! { #name },
        }
    }
}

/// Renders every field of `fields`.
pub(crate) fn render_fields(
    owner: &str,
    fields: &[FieldDescriptor],
    serializable: bool,
) -> Result<Vec<RenderedField>, GeneratorError> {
    fields
        .iter()
        .map(|field| RenderedField::new(owner, field, serializable))
        .collect()
}

fn serde_field_attr(owner: &str, kind: &SerializationKind) -> Result<TokenStream, GeneratorError> {
    Ok(match kind {
        SerializationKind::Transient => quote! { #[serde(skip)] },
        SerializationKind::AsSuch {
            serializer: Some(serializer),
        } => {
            syntax::path(owner, serializer)?;
            quote! { #[serde(with = #serializer)] }
        }
        SerializationKind::None
        | SerializationKind::Polymorphic
        | SerializationKind::AsSuch { serializer: None } => TokenStream::new(),
    })
}

/// `#[doc = " line"]` for every line.
pub(crate) fn doc_attrs(lines: &[String]) -> TokenStream {
    let lines = lines.iter().map(|line| format!(" {line}"));
    quote! { #(#[doc = #lines])* }
}

/// The type parameters of a generated type, in first-appearance order.
pub(crate) struct TypeParams {
    params: Vec<Ident>,
}

impl TypeParams {
    /// Collects the type variables introduced by `fields`.
    pub fn collect<'a>(
        owner: &str,
        fields: impl IntoIterator<Item = &'a FieldDescriptor>,
    ) -> Result<Self, GeneratorError> {
        let mut seen = BTreeSet::new();
        let mut params = Vec::new();
        for variable in fields.into_iter().flat_map(|f| f.ty.type_variables()) {
            if seen.insert(variable.clone()) {
                params.push(syntax::ident(owner, "type variable", &variable)?);
            }
        }
        Ok(Self { params })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.params.iter().any(|param| param == name)
    }

    /// A parameter name not taken by this type, starting from `base`.
    pub fn fresh(&self, base: &str) -> Ident {
        let mut candidate = base.to_string();
        while self.contains(&candidate) {
            candidate.push('_');
        }
        format_ident!("{}", candidate)
    }

    /// `<T, U>`, or nothing without parameters.
    pub fn declare(&self) -> TokenStream {
        let params = &self.params;
        if params.is_empty() {
            TokenStream::new()
        } else {
            quote! { <#(#params),*> }
        }
    }

    /// `<T: 'static, U: 'static>` for impls holding boxed setters.
    pub fn declare_static(&self) -> TokenStream {
        let params = &self.params;
        if params.is_empty() {
            TokenStream::new()
        } else {
            quote! { <#(#params: 'static),*> }
        }
    }

    /// Same as [`TypeParams::declare`]; used where the parameters are applied.
    pub fn apply(&self) -> TokenStream {
        self.declare()
    }
}

/// `use` declarations for every packaged type among `types`.
pub(crate) fn type_imports<'a>(
    owner: &str,
    types: impl IntoIterator<Item = &'a TypeDescriptor>,
) -> Result<TokenStream, GeneratorError> {
    let mut paths = BTreeSet::new();
    let mut pending: Vec<&TypeDescriptor> = types.into_iter().collect();
    while let Some(ty) = pending.pop() {
        pending.extend(ty.dependencies.iter());
        if !ty.package.is_empty() && ty.generic != Generic::AsSuch {
            paths.insert(format!("{}::{}", ty.package, ty.base_name()));
        }
    }
    let paths = paths
        .iter()
        .map(|path| syntax::path(owner, path))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(quote! { #(use #paths;)* })
}
