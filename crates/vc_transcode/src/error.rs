use thiserror::Error;

// -----------------------------------------------------------------------------
// TranscodeError

/// The failures of a conversion.
///
/// Structural mismatches between source and destination are not errors: they
/// are dropped and the rest of the value is still converted.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TranscodeError {
    /// No writable destination was given. Nothing has been written.
    #[error("invalid conversion destination: expected a writable reference")]
    InvalidDestination,

    /// The textual fallback failed to serialize or deserialize.
    #[cfg(feature = "json")]
    #[error("json conversion failed: {0}")]
    Json(#[from] serde_json::Error),
}
