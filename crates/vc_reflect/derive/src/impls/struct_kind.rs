use proc_macro2::TokenStream;
use quote::quote;

use super::{impl_trait_reflect, impl_trait_type_path, impl_trait_typed};

use crate::derive_data::ReflectStruct;
use crate::path::fp::OptionFP;

/// Implement full reflect for struct type.
pub(crate) fn impl_struct(info: &ReflectStruct) -> TokenStream {
    let meta = info.meta();
    let predicates = info.field_predicates();

    // trait: TypePath
    let type_path_trait_tokens = impl_trait_type_path(meta);

    // trait: Typed
    let typed_trait_tokens = impl_trait_typed(
        meta,
        info.to_info_tokens(),
        info.to_default_tokens(),
        &predicates,
    );

    // trait: Struct
    let struct_trait_tokens = impl_trait_struct(info, &predicates);

    // trait: Reflect
    let reflect_trait_tokens = impl_trait_reflect(meta, quote!(Struct), &predicates);

    quote! {
        #type_path_trait_tokens

        #typed_trait_tokens

        #struct_trait_tokens

        #reflect_trait_tokens
    }
}

/// Generate `Struct` trait implementation tokens.
fn impl_trait_struct(info: &ReflectStruct, predicates: &[TokenStream]) -> TokenStream {
    let meta = info.meta();

    let vc_reflect_path = meta.vc_reflect_path();
    let struct_ = crate::path::struct_(vc_reflect_path);
    let reflect_ = crate::path::reflect_(vc_reflect_path);
    let option_ = OptionFP;

    let (indices, idents) = info.accessors();
    let field_count = info.fields().len();

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(true, predicates);

    quote! {
        impl #impl_generics #struct_ for #ident #ty_generics #where_clause {
            fn field_at(&self, index: usize) -> #option_<&dyn #reflect_> {
                match index {
                    #(#indices => #option_::Some(&self.#idents),)*
                    _ => #option_::None,
                }
            }

            fn field_at_mut(&mut self, index: usize) -> #option_<&mut dyn #reflect_> {
                match index {
                    #(#indices => #option_::Some(&mut self.#idents),)*
                    _ => #option_::None,
                }
            }

            #[inline]
            fn field_len(&self) -> usize {
                #field_count
            }
        }
    }
}
