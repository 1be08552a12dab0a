//! MindPath record encryption.
//!
//! Mood and journal entries are encrypted at rest with AES-256-GCM under a
//! key derived per user: Argon2id over the user's handle concatenated with
//! the server-wide secret, against a fixed application salt. The server can
//! always re-derive the key, but a row copied to another user's account (or
//! a tampered ciphertext) fails authentication and is dropped from results.

pub mod encrypt;
pub mod keys;

mod error;

pub use encrypt::{EncryptedRecord, RecordCipher};
pub use error::RecordCryptoError;
