use proc_macro2::{Literal, TokenStream};
use quote::{ToTokens, quote};
use syn::{Data, DeriveInput, Fields, Ident, Type, Visibility};

use crate::REFLECT_ATTRIBUTE_NAME;
use crate::derive_data::{FieldAttributes, ReflectMeta};

/// A reflected field of a named struct.
pub(crate) struct StructField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    pub attrs: FieldAttributes,
    pub public: bool,
}

/// Parsed `#[derive(Reflect)]` input.
///
/// `fields` only holds reflected fields, so a field's position in it is the
/// index used by `Struct::field_at`.
pub(crate) struct ReflectStruct<'a> {
    meta: ReflectMeta<'a>,
    fields: Vec<StructField<'a>>,
    skipped: Vec<&'a Ident>,
}

impl<'a> ReflectStruct<'a> {
    pub(crate) fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        if let Some(attr) = input
            .attrs
            .iter()
            .find(|attr| attr.path().is_ident(REFLECT_ATTRIBUTE_NAME))
        {
            return Err(syn::Error::new_spanned(
                attr,
                "`#[reflect(...)]` is only supported on fields",
            ));
        }

        let named = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named,
                _ => {
                    return Err(syn::Error::new_spanned(
                        &input.ident,
                        "`#[derive(Reflect)]` requires a struct with named fields",
                    ));
                }
            },
            Data::Enum(data) => {
                return Err(syn::Error::new(
                    data.enum_token.span,
                    "`#[derive(Reflect)]` does not support enums",
                ));
            }
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span,
                    "`#[derive(Reflect)]` does not support unions",
                ));
            }
        };

        let meta = ReflectMeta::new(&input.ident, &input.generics)?;

        let mut fields = Vec::with_capacity(named.named.len());
        let mut skipped = Vec::new();
        for field in &named.named {
            let attrs = FieldAttributes::parse(&field.attrs)?;
            // Named fields always carry an identifier.
            let Some(ident) = field.ident.as_ref() else {
                continue;
            };
            if attrs.skip {
                skipped.push(ident);
                continue;
            }
            fields.push(StructField {
                ident,
                ty: &field.ty,
                attrs,
                public: matches!(field.vis, Visibility::Public(_)),
            });
        }

        Ok(Self {
            meta,
            fields,
            skipped,
        })
    }

    #[inline]
    pub(crate) fn meta(&self) -> &ReflectMeta<'a> {
        &self.meta
    }

    #[inline]
    pub(crate) fn fields(&self) -> &[StructField<'a>] {
        &self.fields
    }

    /// Where predicates binding field types that depend on type parameters.
    ///
    /// Field types naming the struct itself are left out, their bound would be
    /// cyclic.
    pub(crate) fn field_predicates(&self) -> Vec<TokenStream> {
        let vc_reflect_path = self.meta.vc_reflect_path();
        let reflect_ = crate::path::reflect_(vc_reflect_path);
        let typed_ = crate::path::typed_(vc_reflect_path);

        self.fields
            .iter()
            .filter(|field| {
                let tokens = field.ty.to_token_stream();
                self.meta.mentions_type_param(tokens.clone()) && !self.meta.mentions_self(tokens)
            })
            .map(|field| {
                let ty = field.ty;
                quote! { #ty: #reflect_ + #typed_ }
            })
            .collect()
    }

    /// `TypeInfo::Struct(...)` construction expression.
    pub(crate) fn to_info_tokens(&self) -> TokenStream {
        let vc_reflect_path = self.meta.vc_reflect_path();
        let type_info_ = crate::path::type_info_(vc_reflect_path);
        let struct_info_ = crate::path::struct_info_(vc_reflect_path);
        let named_field_ = crate::path::named_field_(vc_reflect_path);
        let option_ = crate::path::fp::OptionFP;

        let fields = self.fields.iter().map(|field| {
            let ty = field.ty;
            let name = field.ident.to_string();
            let mut tokens = quote! { #named_field_::new::<#ty>(#name) };
            if let Some(tag) = &field.attrs.tag {
                tokens.extend(quote! { .with_tag(#option_::Some(#tag)) });
            }
            if !field.public {
                tokens.extend(quote! { .with_public(false) });
            }
            if field.attrs.embed {
                tokens.extend(quote! { .with_embedded(true) });
            }
            tokens
        });

        quote! {
            #type_info_::Struct(#struct_info_::new::<Self>(&[
                #(#fields,)*
            ]))
        }
    }

    /// Body of `Typed::default_value`.
    ///
    /// Reflected fields take their own default value and skipped fields take
    /// `Default::default()`.
    pub(crate) fn to_default_tokens(&self) -> TokenStream {
        let typed_ = crate::path::typed_(self.meta.vc_reflect_path());
        let option_ = crate::path::fp::OptionFP;
        let default_ = crate::path::fp::DefaultFP;

        let reflected = self.fields.iter().map(|field| {
            let ident = field.ident;
            let ty = field.ty;
            quote! { #ident: <#ty as #typed_>::default_value()? }
        });
        let skipped = &self.skipped;

        quote! {
            #option_::Some(Self {
                #(#reflected,)*
                #(#skipped: #default_::default(),)*
            })
        }
    }

    /// `(index literals, field identifiers)` for the accessor match arms.
    pub(crate) fn accessors(&self) -> (Vec<Literal>, Vec<&'a Ident>) {
        self.fields
            .iter()
            .enumerate()
            .map(|(index, field)| (Literal::usize_unsuffixed(index), field.ident))
            .unzip()
    }
}
