//! Fully qualified paths of prelude items for generated code.
//!
//! Generated code must not rely on the caller's prelude or on local names
//! shadowing `Option` and friends, so every prelude item is spelled out.
//!
//! ```
//! use quote::ToTokens;
//! use vc_macro_utils::full_path::OptionFP;
//!
//! let option_ = OptionFP.to_token_stream();
//! let tokens = quote::quote!(#option_::Some(1));
//! assert!(tokens.to_string().contains("Some"));
//! ```

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

macro_rules! full_path {
    ($($(#[$attr:meta])* $name:ident => :: $($seg:ident)::+;)*) => {$(
        $(#[$attr])*
        #[derive(Clone, Copy, Debug)]
        pub struct $name;

        impl ToTokens for $name {
            #[inline]
            fn to_tokens(&self, tokens: &mut TokenStream) {
                tokens.extend(quote!(:: $($seg)::+));
            }
        }
    )*};
}

full_path! {
    /// `::core::any::Any`
    AnyFP => ::core::any::Any;
    /// `::core::any::TypeId`
    TypeIdFP => ::core::any::TypeId;
    /// `::core::option::Option`
    OptionFP => ::core::option::Option;
    /// `::core::default::Default`
    DefaultFP => ::core::default::Default;
    /// `::core::result::Result`
    ResultFP => ::core::result::Result;
    /// `::core::marker::Send`
    SendFP => ::core::marker::Send;
    /// `::core::marker::Sync`
    SyncFP => ::core::marker::Sync;
    /// `::core::fmt`
    FmtFP => ::core::fmt;
    /// `::core::concat`
    ConcatFP => ::core::concat;
    /// `::core::module_path`
    ModulePathFP => ::core::module_path;
}

#[cfg(test)]
mod tests {
    use quote::{ToTokens, quote};

    use super::{ConcatFP, DefaultFP, OptionFP};

    #[test]
    fn paths_are_absolute() {
        assert_eq!(
            OptionFP.to_token_stream().to_string(),
            ":: core :: option :: Option"
        );
        assert_eq!(
            DefaultFP.to_token_stream().to_string(),
            ":: core :: default :: Default"
        );

        let option_ = OptionFP;
        let items = [1_u8, 2];
        let tokens = quote! { #(#option_::Some(#items))* #ConcatFP!() };
        let text = tokens.to_string();
        assert_eq!(text.matches(":: core :: option :: Option :: Some").count(), 2);
        assert!(text.ends_with(":: core :: concat ! ()"));
    }
}
