use thiserror::Error;

use crate::info::ReflectKind;

/// Failure of [`Reflect::try_apply`](crate::Reflect::try_apply).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApplyError {
    /// The source and destination have different concrete types.
    #[error("attempted to apply `{from_type}` to `{to_type}`")]
    MismatchedTypes {
        from_type: &'static str,
        to_type: &'static str,
    },
    /// The destination kind cannot be overwritten as a whole.
    #[error("attempted to apply `{from_kind}` to `{to_kind}`")]
    MismatchedKinds {
        from_kind: ReflectKind,
        to_kind: ReflectKind,
    },
    /// The source cannot be cloned into the destination.
    #[error("type `{type_path}` cannot be cloned")]
    NotCloneable { type_path: &'static str },
}
