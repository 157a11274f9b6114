//! Static type information.
//!
//! - [`TypePath`] names a type; [`Type`] pairs the name with a [`TypeId`](core::any::TypeId).
//! - [`Typed`] gives the `'static` [`TypeInfo`] of a type.
//! - [`TypeInfo`] is one of the kind-specific infos below.
//!
//! Child type infos (fields, items, keys, values, pointer targets) are stored
//! as `fn() -> &'static TypeInfo` and resolved on demand, so recursive types
//! can describe themselves.

// -----------------------------------------------------------------------------
// Modules

mod field_info;
mod list_info;
mod map_info;
mod opaque_info;
mod pointer_info;
mod struct_info;
mod type_info;
mod type_path;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use field_info::NamedField;
pub use list_info::{ArrayInfo, ListInfo};
pub use map_info::MapInfo;
pub use opaque_info::{DynamicInfo, OpaqueInfo};
pub use pointer_info::PointerInfo;
pub use struct_info::StructInfo;
pub use type_info::{ReflectKind, ReflectKindError, TypeInfo};
pub use type_path::{DynamicTypePath, Type, TypePath};
pub use typed::{DynamicTyped, Typed};
