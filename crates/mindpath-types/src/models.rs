use serde::{Deserialize, Serialize};

/// Plaintext mood payload. This is what gets encrypted at rest — the server
/// only stores ciphertext and sees the payload transiently per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodRecord {
    pub mood: i64,
    #[serde(default)]
    pub emotions: Vec<String>,
    #[serde(default)]
    pub context: Option<String>,
    /// Milliseconds since the epoch at submission time.
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Plaintext journal payload, encrypted at rest like [`MoodRecord`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalRecord {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub date: Option<String>,
}
