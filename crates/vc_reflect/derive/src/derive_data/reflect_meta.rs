use proc_macro2::{TokenStream, TokenTree};
use quote::{ToTokens, quote};
use syn::{Generics, Ident, ImplGenerics, TypeGenerics};

/// Type level data shared by every generated impl.
pub(crate) struct ReflectMeta<'a> {
    ident: &'a Ident,
    generics: &'a Generics,
    vc_reflect_path: syn::Path,
}

impl<'a> ReflectMeta<'a> {
    pub(crate) fn new(ident: &'a Ident, generics: &'a Generics) -> syn::Result<Self> {
        if let Some(param) = generics.const_params().next() {
            return Err(syn::Error::new_spanned(
                param,
                "`#[derive(Reflect)]` does not support const parameters",
            ));
        }

        Ok(Self {
            ident,
            generics,
            vc_reflect_path: crate::path::vc_reflect(),
        })
    }

    #[inline]
    pub(crate) fn ident(&self) -> &'a Ident {
        self.ident
    }

    #[inline]
    pub(crate) fn vc_reflect_path(&self) -> &syn::Path {
        &self.vc_reflect_path
    }

    /// Whether `TypePath` and `Typed` need per-instantiation storage.
    pub(crate) fn impl_with_generic(&self) -> bool {
        self.generics.type_params().next().is_some()
    }

    /// Returns `true` if `tokens` name one of the type parameters.
    pub(crate) fn mentions_type_param(&self, tokens: TokenStream) -> bool {
        let params: Vec<&Ident> = self.generics.type_params().map(|p| &p.ident).collect();
        !params.is_empty() && any_ident(tokens, &|ident: &Ident| params.contains(&ident))
    }

    /// Returns `true` if `tokens` refer back to the reflected type.
    pub(crate) fn mentions_self(&self, tokens: TokenStream) -> bool {
        any_ident(tokens, &|ident: &Ident| ident == self.ident || ident == "Self")
    }

    /// Type parameter identifiers, in declaration order.
    pub(crate) fn type_params(&self) -> impl Iterator<Item = &'a Ident> {
        self.generics.type_params().map(|param| &param.ident)
    }

    /// Splits generics for an impl block and extends the where clause.
    ///
    /// Type parameters are always bounded by `TypePath`. With `bounds`, they
    /// are bounded by `Reflect + Typed` instead and `extra` predicates are
    /// appended.
    pub(crate) fn split_generics(
        &self,
        bounds: bool,
        extra: &[TokenStream],
    ) -> (ImplGenerics<'a>, TypeGenerics<'a>, TokenStream) {
        use crate::path::fp::{AnyFP, SendFP, SyncFP};

        let vc_reflect_path = &self.vc_reflect_path;
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();

        let mut predicates = Vec::new();

        if self.impl_with_generic() {
            predicates.push(quote! { Self: #AnyFP + #SendFP + #SyncFP });
        } else if self.generics.lifetimes().next().is_some() {
            predicates.push(quote! { Self: 'static });
        }

        if let Some(where_clause) = where_clause {
            predicates.extend(where_clause.predicates.iter().map(ToTokens::to_token_stream));
        }

        let param_bound = if bounds {
            let reflect_ = crate::path::reflect_(vc_reflect_path);
            let typed_ = crate::path::typed_(vc_reflect_path);
            quote! { #reflect_ + #typed_ }
        } else {
            crate::path::type_path_(vc_reflect_path)
        };
        predicates.extend(self.type_params().map(|ident| quote! { #ident: #param_bound }));

        if bounds {
            predicates.extend(extra.iter().cloned());
        }

        (impl_generics, ty_generics, quote! { where #(#predicates,)* })
    }

    /// Expression of the full type path; `&'static str` for non-generic types,
    /// `String` otherwise.
    pub(crate) fn type_path_tokens(&self) -> TokenStream {
        use crate::path::fp::{ConcatFP, ModulePathFP};

        let name = self.ident.to_string();
        let base = quote! { #ConcatFP!(#ModulePathFP!(), "::", #name) };
        self.with_generic_suffix(base, |vc_reflect_path, ident| {
            let type_path_ = crate::path::type_path_(vc_reflect_path);
            quote! { <#ident as #type_path_>::type_path() }
        })
    }

    /// Expression of the short type name, see [`Self::type_path_tokens`].
    pub(crate) fn type_name_tokens(&self) -> TokenStream {
        let name = self.ident.to_string();
        self.with_generic_suffix(quote! { #name }, |vc_reflect_path, ident| {
            let type_path_ = crate::path::type_path_(vc_reflect_path);
            quote! { <#ident as #type_path_>::type_name() }
        })
    }

    fn with_generic_suffix(
        &self,
        base: TokenStream,
        param: impl Fn(&syn::Path, &Ident) -> TokenStream,
    ) -> TokenStream {
        if !self.impl_with_generic() {
            return base;
        }

        let concat_ = crate::path::concat_(&self.vc_reflect_path);
        let mut pieces = vec![base, quote! { "<" }];
        for (index, ident) in self.type_params().enumerate() {
            if index > 0 {
                pieces.push(quote! { ", " });
            }
            pieces.push(param(&self.vc_reflect_path, ident));
        }
        pieces.push(quote! { ">" });

        quote! { #concat_(&[#(#pieces),*]) }
    }
}

impl core::fmt::Debug for ReflectMeta<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(self.ident, f)
    }
}

fn any_ident(tokens: TokenStream, pred: &dyn Fn(&Ident) -> bool) -> bool {
    tokens.into_iter().any(|tree| match tree {
        TokenTree::Ident(ident) => pred(&ident),
        TokenTree::Group(group) => any_ident(group.stream(), pred),
        _ => false,
    })
}

