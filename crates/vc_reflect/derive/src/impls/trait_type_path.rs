use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectMeta;

/// Generate implementation codes for `TypePath`
pub(crate) fn impl_trait_type_path(meta: &ReflectMeta) -> TokenStream {
    let vc_reflect_path = meta.vc_reflect_path();
    let trait_type_path_ = crate::path::type_path_(vc_reflect_path);

    let type_path = meta.type_path_tokens();
    let type_name = meta.type_name_tokens();

    let (type_path, type_name, inline_flag) = if meta.impl_with_generic() {
        let path_cell_ = crate::path::generic_type_path_cell_(vc_reflect_path);
        let cell = |generator: TokenStream| {
            quote! {
                static CELL: #path_cell_ = #path_cell_::new();
                CELL.get_or_insert::<Self>(|| {
                    #generator
                })
            }
        };
        (cell(type_path), cell(type_name), TokenStream::new())
    } else {
        (type_path, type_name, quote! { #[inline] })
    };

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(false, &[]);

    quote! {
        impl #impl_generics #trait_type_path_ for #ident #ty_generics #where_clause {
            #inline_flag
            fn type_path() -> &'static str {
                #type_path
            }

            #inline_flag
            fn type_name() -> &'static str {
                #type_name
            }
        }
    }
}
