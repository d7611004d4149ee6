use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::errors::GkError;
use crate::serde_io::to_canonical_json_bytes;

/// Computes a stable hexadecimal hash for the provided serialisable payload.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, GkError> {
    let bytes = to_canonical_json_bytes(value)?;
    let digest = Sha256::digest(bytes);
    Ok(format!("{:x}", digest))
}

/// Rounds a floating point value to the canonical precision used in reports.
pub fn round_f64(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scaled = (value * 1e12).round();
    scaled / 1e12
}
