use aes_gcm::aead::consts::U16;
use aes_gcm::aead::{Aead, KeyInit, OsRng, rand_core::RngCore};
use aes_gcm::aes::Aes256;
use aes_gcm::{AesGcm, Key, Nonce};

use crate::RecordCryptoError;
use crate::keys::derive_record_key;

/// AES-256-GCM with a 16-byte nonce. Storage rows carry a 16-byte IV, so the
/// cipher is instantiated with the matching nonce size rather than the usual
/// 96-bit one.
type RecordAead = AesGcm<Aes256, U16>;

const IV_LEN: usize = 16;

/// Hex-encoded ciphertext (authentication tag appended) plus its IV, ready
/// for storage as text columns.
#[derive(Debug, Clone)]
pub struct EncryptedRecord {
    pub ciphertext: String,
    pub iv: String,
}

/// Stateless per-user record codec. Constructed once at startup with the
/// server-wide secret injected; the per-user half of the key material (the
/// user's handle) is supplied per call.
#[derive(Clone)]
pub struct RecordCipher {
    server_secret: String,
}

impl RecordCipher {
    pub fn new(server_secret: impl Into<String>) -> Self {
        Self {
            server_secret: server_secret.into(),
        }
    }

    /// Encrypt a JSON payload under the given user's record key.
    /// A fresh random 16-byte IV is generated per call, never reused.
    pub fn encrypt(
        &self,
        plaintext: &serde_json::Value,
        handle: &str,
    ) -> Result<EncryptedRecord, RecordCryptoError> {
        let key = derive_record_key(handle, &self.server_secret)?;
        let cipher = RecordAead::new(Key::<RecordAead>::from_slice(&key));

        let mut iv = [0u8; IV_LEN];
        OsRng.fill_bytes(&mut iv);
        let nonce = Nonce::<U16>::from_slice(&iv);

        let plaintext_bytes =
            serde_json::to_vec(plaintext).map_err(|_| RecordCryptoError::Encrypt)?;
        let ciphertext = cipher
            .encrypt(nonce, plaintext_bytes.as_slice())
            .map_err(|_| RecordCryptoError::Encrypt)?;

        Ok(EncryptedRecord {
            ciphertext: hex::encode(ciphertext),
            iv: hex::encode(iv),
        })
    }

    /// Decrypt a stored record back to its JSON payload.
    ///
    /// Fails on malformed hex, a wrong-length IV, an authentication tag that
    /// does not verify (tampering, wrong user, wrong IV), or plaintext that
    /// is not valid JSON.
    pub fn decrypt(
        &self,
        ciphertext_hex: &str,
        iv_hex: &str,
        handle: &str,
    ) -> Result<serde_json::Value, RecordCryptoError> {
        let ciphertext = hex::decode(ciphertext_hex).map_err(|_| RecordCryptoError::Malformed)?;
        let iv = hex::decode(iv_hex).map_err(|_| RecordCryptoError::Malformed)?;
        if iv.len() != IV_LEN {
            return Err(RecordCryptoError::Malformed);
        }

        let key = derive_record_key(handle, &self.server_secret)?;
        let cipher = RecordAead::new(Key::<RecordAead>::from_slice(&key));

        // The trailing 16-byte authentication tag is verified as part of
        // decryption; a mismatch yields an opaque AEAD error.
        let plaintext = cipher
            .decrypt(Nonce::<U16>::from_slice(&iv), ciphertext.as_slice())
            .map_err(|_| RecordCryptoError::Verification)?;

        Ok(serde_json::from_slice(&plaintext)?)
    }
}
