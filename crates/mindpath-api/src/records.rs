use axum::http::StatusCode;
use tracing::{error, warn};

use mindpath_crypto::RecordCipher;
use mindpath_db::models::EntryRow;

/// Decrypt a batch of stored rows for one user.
///
/// Per-record failures (tampering, wrong key, malformed payload) drop the
/// record from the result set and log it — the request still succeeds with
/// whatever decrypted cleanly. Only a key-derivation failure aborts.
pub(crate) fn decrypt_entries(
    cipher: &RecordCipher,
    rows: Vec<EntryRow>,
    handle: &str,
    kind: &str,
) -> Result<Vec<(EntryRow, serde_json::Value)>, StatusCode> {
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        match cipher.decrypt(&row.encrypted_data, &row.iv, handle) {
            Ok(value) => out.push((row, value)),
            Err(e) if e.is_fatal() => {
                error!("record key derivation failed: {}", e);
                return Err(StatusCode::INTERNAL_SERVER_ERROR);
            }
            Err(e) => warn!("dropping undecryptable {} entry {}: {}", kind, row.id, e),
        }
    }
    Ok(out)
}

/// SQLite stores timestamps as "YYYY-MM-DD HH:MM:SS" without timezone.
/// Parse as naive UTC, falling back through RFC 3339 for safety.
pub(crate) fn parse_row_timestamp(raw: &str, row_id: i64) -> chrono::DateTime<chrono::Utc> {
    raw.parse::<chrono::DateTime<chrono::Utc>>()
        .or_else(|_| {
            chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            warn!("Corrupt created_at '{}' on entry {}: {}", raw, row_id, e);
            chrono::DateTime::default()
        })
}
