use argon2::Argon2;

use crate::RecordCryptoError;

/// Fixed application-level salt for record-key derivation. The key material
/// already mixes a per-user handle with the server secret; the salt only
/// domain-separates this derivation from password hashing.
const RECORD_KEY_SALT: &[u8] = b"mindpath-record-key-v1";

/// Derive the 256-bit record key for one user.
///
/// Deterministic: the same (handle, server_secret) pair always yields the
/// same key, and distinct handles yield independent keys. Argon2id is
/// intentionally expensive and the result is not cached — the cost is paid
/// on every encrypt/decrypt call.
pub fn derive_record_key(
    handle: &str,
    server_secret: &str,
) -> Result<[u8; 32], RecordCryptoError> {
    let mut key = [0u8; 32];
    let material = format!("{handle}{server_secret}");

    Argon2::default()
        .hash_password_into(material.as_bytes(), RECORD_KEY_SALT, &mut key)
        .map_err(|e| RecordCryptoError::Derivation(e.to_string()))?;

    Ok(key)
}
