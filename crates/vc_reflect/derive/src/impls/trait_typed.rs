use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectMeta;
use crate::path::fp::OptionFP;

/// Generate implementation code for `Typed`
///
/// `type_info_tokens` builds the `TypeInfo`, see
/// [`ReflectStruct::to_info_tokens`](crate::derive_data::ReflectStruct::to_info_tokens).
/// `default_tokens` is the body of `default_value`.
pub(crate) fn impl_trait_typed(
    meta: &ReflectMeta,
    type_info_tokens: TokenStream,
    default_tokens: TokenStream,
    predicates: &[TokenStream],
) -> TokenStream {
    let vc_reflect_path = meta.vc_reflect_path();
    let trait_typed_ = crate::path::typed_(vc_reflect_path);
    let type_info_ = crate::path::type_info_(vc_reflect_path);
    let option_ = OptionFP;

    let inner_cell_tokens = if meta.impl_with_generic() {
        let info_cell = crate::path::generic_type_info_cell_(vc_reflect_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_insert::<Self>(|| {
                #type_info_tokens
            })
        }
    } else {
        let info_cell = crate::path::non_generic_type_info_cell_(vc_reflect_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_init(|| {
                #type_info_tokens
            })
        }
    };

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(true, predicates);

    quote! {
        impl #impl_generics #trait_typed_ for #ident #ty_generics #where_clause {
            fn type_info() -> &'static #type_info_ {
                #inner_cell_tokens
            }

            fn default_value() -> #option_<Self> {
                #default_tokens
            }
        }
    }
}
