//! Kind-specific access to reflected values.
//!
//! [`Reflect::reflect_ref`](crate::Reflect::reflect_ref) and
//! [`Reflect::reflect_mut`](crate::Reflect::reflect_mut) hand out one of the
//! kind traits below, wrapped in [`ReflectRef`] / [`ReflectMut`].

// -----------------------------------------------------------------------------
// Modules

mod apply_error;
mod array_ops;
mod dynamic;
mod kind;
mod list_ops;
mod map_ops;
mod pointer_ops;
mod struct_ops;

// -----------------------------------------------------------------------------
// Exports

pub use apply_error::ApplyError;
pub use array_ops::Array;
pub use dynamic::Dynamic;
pub use kind::{ReflectMut, ReflectRef};
pub use list_ops::List;
pub use map_ops::{Map, map_key};
pub use pointer_ops::Pointer;
pub use struct_ops::Struct;
