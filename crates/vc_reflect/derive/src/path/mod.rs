//! Paths into `vc_reflect` used by the generated code.

use proc_macro2::TokenStream;
use quote::quote;

pub(crate) use vc_macro_utils::full_path as fp;

/// Access path to the `vc_reflect` crate.
///
/// `::vc_reflect` for crates depending on it directly, `::vc_cast::reflect`
/// for crates depending on the facade. The manifest lookup is not free, so the
/// path is computed once per derive and passed around.
pub(crate) fn vc_reflect() -> syn::Path {
    vc_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("vc_reflect"))
}

macro_rules! reflect_paths {
    ($($name:ident => $($segment:ident)::+;)*) => {$(
        #[inline(always)]
        pub(crate) fn $name(vc_reflect_path: &syn::Path) -> TokenStream {
            quote! { #vc_reflect_path::$($segment)::+ }
        }
    )*};
}

reflect_paths! {
    reflect_ => Reflect;
    concat_ => impls::concat;
    non_generic_type_info_cell_ => impls::NonGenericTypeInfoCell;
    generic_type_info_cell_ => impls::GenericTypeInfoCell;
    generic_type_path_cell_ => impls::GenericTypePathCell;
    type_path_ => info::TypePath;
    typed_ => info::Typed;
    type_info_ => info::TypeInfo;
    struct_info_ => info::StructInfo;
    named_field_ => info::NamedField;
    reflect_kind_ => info::ReflectKind;
    struct_ => ops::Struct;
    reflect_ref_ => ops::ReflectRef;
    reflect_mut_ => ops::ReflectMut;
}
