//! Runtime reflection for the `vc_cast` transcoder.
//!
//! A type taking part in a conversion implements [`Reflect`], which exposes
//! its [kind](info::ReflectKind) and gives shared or exclusive access to its
//! parts through [`ReflectRef`](ops::ReflectRef) and
//! [`ReflectMut`](ops::ReflectMut). Static shape lives in
//! [`TypeInfo`](info::TypeInfo), obtained through [`Typed`](info::Typed).
//!
//! Scalars, `String`, `Option`, `Box`, `Vec`, arrays and the common map types
//! are supported out of the box. Records use the derive macro:
//!
//! ```
//! use vc_reflect::Reflect;
//! use vc_reflect::ops::ReflectRef;
//!
//! #[derive(Reflect, Default)]
//! struct User {
//!     #[reflect(rename = "user_name")]
//!     pub name: String,
//!     pub age: u32,
//! }
//!
//! let user = User { name: "ann".into(), age: 7 };
//! let ReflectRef::Struct(s) = user.reflect_ref() else { unreachable!() };
//! assert_eq!(s.field_len(), 2);
//! assert_eq!(s.field_at(1).and_then(|v| v.downcast_ref::<u32>()), Some(&7));
//! ```

// -----------------------------------------------------------------------------
// Extern Self

// Generated code names this crate `vc_reflect`; the alias lets the crate's own
// tests derive on local types.
extern crate self as vc_reflect;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod reflection;

pub mod impls;
pub mod info;
pub mod ops;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use reflection::Reflect;
pub use vc_reflect_derive as derive;
pub use vc_reflect_derive::Reflect;
