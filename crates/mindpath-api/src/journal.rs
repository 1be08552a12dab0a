use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::error;

use mindpath_types::api::{Claims, SaveJournalRequest, SaveJournalResponse};
use mindpath_types::models::JournalRecord;

use crate::auth::AppState;
use crate::records::decrypt_entries;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    10
}

pub async fn save_journal(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<SaveJournalRequest>,
) -> Result<Json<SaveJournalResponse>, StatusCode> {
    if req.text.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let user_id = claims.sub;
    let st = state.clone();
    let user = tokio::task::spawn_blocking(move || st.db.get_user_by_id(user_id))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::UNAUTHORIZED)?;

    // The supportive response is generated before the entry is stored and
    // persisted unencrypted alongside the ciphertext.
    let ai_response = state
        .support
        .respond(&req.text, user.year_in_school.as_deref())
        .await;

    let now = chrono::Utc::now();
    let payload = serde_json::to_value(JournalRecord {
        text: Some(req.text),
        timestamp: Some(now.timestamp_millis()),
        date: Some(now.to_rfc3339()),
    })
    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let st = state.clone();
    let username = claims.username.clone();
    let response_text = ai_response.clone();
    let id = tokio::task::spawn_blocking(move || -> Result<i64, StatusCode> {
        let record = st.cipher.encrypt(&payload, &username).map_err(|e| {
            error!("journal encryption failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

        st.db
            .insert_journal_entry(user_id, &record.ciphertext, &record.iv, &response_text)
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
    })
    .await
    .map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })??;

    Ok(Json(SaveJournalResponse {
        success: true,
        id,
        ai_response,
    }))
}

pub async fn journal_history(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<serde_json::Value>>, StatusCode> {
    let st = state.clone();
    let user_id = claims.sub;
    let username = claims.username.clone();
    let limit = query.limit;

    let entries = tokio::task::spawn_blocking(move || -> Result<Vec<serde_json::Value>, StatusCode> {
        let rows = st
            .db
            .recent_journal_entries(user_id, limit)
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

        let decrypted = decrypt_entries(&st.cipher, rows, &username, "journal")?;

        Ok(decrypted
            .into_iter()
            .map(|(row, mut value)| {
                if let serde_json::Value::Object(map) = &mut value {
                    map.insert("ai_response".to_string(), row.ai_response.into());
                    map.insert("created_at".to_string(), row.created_at.into());
                }
                value
            })
            .collect())
    })
    .await
    .map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })??;

    Ok(Json(entries))
}
