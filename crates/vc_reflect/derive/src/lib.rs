//! Derive macro for `vc_reflect`, see [`Reflect`].
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Struct Reflection Derivation
///
/// `#[derive(Reflect)]` on a struct with named fields implements:
///
/// - `TypePath`
/// - `Typed`
/// - `Struct`
/// - `Reflect`
///
/// Tuple structs, unit structs, enums and unions are rejected.
///
/// ## Field Attributes
///
/// Field metadata mirrors the name directives of a serialization tag:
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// struct User {
///     // Raw tag: a name followed by comma separated options.
///     #[reflect(tag = "user_id,omitempty")]
///     pub id: u64,
///     // A bare name.
///     #[reflect(rename = "display_name")]
///     pub name: String,
///     // Excluded from conversions, but still reflected.
///     #[reflect(tag = "-")]
///     pub cache: Vec<u8>,
///     // Not reflected at all; the type need not implement `Reflect`, but
///     // must implement `Default`.
///     #[reflect(skip)]
///     pub handle: Handle,
///     // The fields of `Audit` are promoted into `User`.
///     #[reflect(embed)]
///     pub audit: Audit,
/// }
/// ```
///
/// `tag` and `rename` cannot be combined on the same field.
///
/// Whether a field is declared `pub` is recorded in its `NamedField`. Only
/// `pub` counts as public; restricted visibility such as `pub(crate)` does not.
///
/// ## Default Value
///
/// `Typed::default_value` builds the struct out of the default value of each
/// reflected field, so `Default` is not required. It returns `None` if any
/// field type has none.
///
/// ## Generics
///
/// Type parameters are bounded by `Reflect + Typed`. Field types that mention a
/// type parameter are bounded as well, except those that refer back to the
/// struct itself. Const parameters are not supported.
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::ReflectStruct::from_input(&ast) {
        Ok(info) => impls::impl_struct(&info).into(),
        Err(err) => err.into_compile_error().into(),
    }
}
