use thiserror::Error;

/// Errors from record encryption and decryption.
///
/// Only [`RecordCryptoError::Derivation`] is fatal to a request. Everything
/// else is a per-record decryption failure: batch call sites drop the record
/// from the result set and log it, they never fail the whole request.
#[derive(Debug, Error)]
pub enum RecordCryptoError {
    #[error("key derivation failed: {0}")]
    Derivation(String),

    #[error("encryption failed")]
    Encrypt,

    #[error("malformed ciphertext or iv encoding")]
    Malformed,

    #[error("ciphertext authentication failed")]
    Verification,

    #[error("decrypted payload is not valid JSON: {0}")]
    Plaintext(#[from] serde_json::Error),
}

impl RecordCryptoError {
    /// Derivation failures abort the request; the rest degrade gracefully.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RecordCryptoError::Derivation(_))
    }
}
