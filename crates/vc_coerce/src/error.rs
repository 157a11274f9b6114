use core::num::ParseFloatError;

use thiserror::Error;
use vc_transcode::TranscodeError;

// -----------------------------------------------------------------------------
// CastError

/// The failures of a scalar cast.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CastError {
    /// The source kind has no conversion to the requested type.
    #[error("unable to cast `{type_path}` to `{to}`")]
    Unsupported {
        type_path: &'static str,
        to: &'static str,
    },

    #[error("invalid integer syntax: {0:?}")]
    ParseInt(String),

    #[error("invalid float syntax {input:?}: {source}")]
    ParseFloat {
        input: String,
        source: ParseFloatError,
    },

    #[error("invalid boolean syntax: {0:?}")]
    ParseBool(String),

    #[error("invalid duration {input:?}: {reason}")]
    ParseDuration { input: String, reason: &'static str },

    /// The text matched none of the accepted time layouts.
    #[error("unable to parse {0:?} as a time")]
    ParseTime(String),

    /// The value does not fit the requested type.
    #[error("{value} is out of range for `{to}`")]
    Overflow { value: String, to: &'static str },

    /// The structural fallback failed.
    #[error(transparent)]
    Transcode(#[from] TranscodeError),
}

impl CastError {
    pub(crate) fn overflow(value: impl ToString, to: &'static str) -> Self {
        Self::Overflow {
            value: value.to_string(),
            to,
        }
    }
}
