//! Conversion through `serde_json`.
//!
//! The source is serialized to a [`serde_json::Value`] and the destination is
//! deserialized from it, so serde attributes and serde's own rules apply.

use serde_core::Serialize;
use serde_core::de::DeserializeOwned;

use crate::TranscodeError;

/// Converts `src` into `dest` by serializing then deserializing.
///
/// `dest` is replaced as a whole. It is left untouched if either step fails.
///
/// ```
/// let mut dest: Vec<u64> = Vec::new();
/// vc_transcode::json::convert(&[1_u8, 2, 3], &mut dest).unwrap();
/// assert_eq!(dest, [1, 2, 3]);
/// ```
pub fn convert<S, D>(src: &S, dest: &mut D) -> Result<(), TranscodeError>
where
    S: Serialize + ?Sized,
    D: DeserializeOwned,
{
    let value = serde_json::to_value(src)?;
    *dest = serde_json::from_value(value)?;
    Ok(())
}
