//! Reflection impls for std types, plus the helpers used to write them.
//!
//! - [`concat`]: string concatenation for generic type paths.
//! - [`NonGenericTypeInfoCell`]: `Typed` storage for non-generic types.
//! - [`GenericTypeInfoCell`], [`GenericTypePathCell`]: storage for generic types.
//! - `xxx_debug`: building blocks of [`Reflect::reflect_debug`](crate::Reflect::reflect_debug).
//!
//! ## Implemented Menu
//!
//! - opaque: `bool`, `char`, `i8`-`i128`, `isize`, `u8`-`u128`, `usize`,
//!   `f32`, `f64`, `String`, `&'static str`, `Duration`, `SystemTime`
//! - pointer: `Option<T>`, `Box<T>`
//! - list: `Vec<T>`
//! - array: `[T; N]`
//! - map: `std::collections::HashMap`, `hashbrown::HashMap`, `BTreeMap`

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod debug;
mod maps;
mod native;
mod pointers;
mod sequences;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeCell, NonGenericTypeCell};
pub use cell::{GenericTypeInfoCell, GenericTypePathCell, NonGenericTypeInfoCell};
pub use debug::{array_debug, list_debug, map_debug, pointer_debug, struct_debug};

/// Concatenates string slices into one allocation.
///
/// Used to build the paths of generic types.
///
/// ```
/// use vc_reflect::impls::concat;
///
/// assert_eq!(concat(&["Vec", "<", "u8", ">"]), "Vec<u8>");
/// ```
#[inline(never)]
pub fn concat(arr: &[&str]) -> alloc::string::String {
    let len = arr.iter().map(|item| item.len()).sum();
    let mut res = alloc::string::String::with_capacity(len);
    for &item in arr {
        res.push_str(item);
    }
    res
}
