use jss_core::errors::{ErrorInfo, JssError};
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Serializes `value` to JSON with object keys in sorted order.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, JssError> {
    let tree = serde_json::to_value(value)
        .map_err(|err| JssError::Serde(ErrorInfo::new("json-encode", err.to_string())))?;
    serde_json::to_vec(&tree)
        .map_err(|err| JssError::Serde(ErrorInfo::new("json-encode", err.to_string())))
}

/// Computes a stable hexadecimal hash for the provided serializable payload.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, JssError> {
    let bytes = to_canonical_json_bytes(value)?;
    let digest = Sha256::digest(bytes);
    Ok(format!("{:x}", digest))
}
