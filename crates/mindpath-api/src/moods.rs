use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::{error, warn};

use mindpath_insights::crisis;
use mindpath_types::api::{Claims, SaveMoodRequest, SaveMoodResponse};
use mindpath_types::models::MoodRecord;

use crate::auth::AppState;
use crate::records::decrypt_entries;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    30
}

pub async fn save_mood(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<SaveMoodRequest>,
) -> Result<Json<SaveMoodResponse>, StatusCode> {
    let now = chrono::Utc::now();
    let payload = serde_json::to_value(MoodRecord {
        mood: req.mood,
        emotions: req.emotions.clone(),
        context: req.context.clone(),
        timestamp: Some(now.timestamp_millis()),
        date: Some(now.to_rfc3339()),
    })
    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    // Crisis scoring runs on the raw submission, before encryption.
    let assessment = crisis::score(req.mood, &req.emotions);

    let st = state.clone();
    let user_id = claims.sub;
    let username = claims.username.clone();

    // Key derivation and the DB insert are both blocking work.
    let id = tokio::task::spawn_blocking(move || -> Result<i64, StatusCode> {
        let record = st.cipher.encrypt(&payload, &username).map_err(|e| {
            error!("mood encryption failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

        let id = st
            .db
            .insert_mood_entry(user_id, &record.ciphertext, &record.iv)
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

        // Audit write is fire-and-forget: a failure here is logged and
        // swallowed, it never fails the mood save.
        if assessment.needs_alert() {
            let patterns =
                serde_json::to_string(&assessment.detected_patterns).unwrap_or_default();
            if let Err(e) = st.db.insert_crisis_log(
                user_id,
                assessment.severity_level,
                &patterns,
                crisis::ALERT_ACTION,
            ) {
                warn!("crisis audit write failed for user {}: {}", user_id, e);
            }
        }

        Ok(id)
    })
    .await
    .map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })??;

    Ok(Json(SaveMoodResponse {
        success: true,
        id,
        message: "Mood entry saved securely".to_string(),
    }))
}

pub async fn mood_history(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<serde_json::Value>>, StatusCode> {
    let st = state.clone();
    let user_id = claims.sub;
    let username = claims.username.clone();
    let limit = query.limit;

    let moods = tokio::task::spawn_blocking(move || -> Result<Vec<serde_json::Value>, StatusCode> {
        let rows = st
            .db
            .recent_mood_entries(user_id, limit)
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

        let decrypted = decrypt_entries(&st.cipher, rows, &username, "mood")?;

        Ok(decrypted
            .into_iter()
            .map(|(row, mut value)| {
                if let serde_json::Value::Object(map) = &mut value {
                    map.insert("id".to_string(), row.id.into());
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

    Ok(Json(moods))
}
