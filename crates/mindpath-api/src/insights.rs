use axum::{Extension, Json, extract::State, http::StatusCode};
use tracing::{error, warn};

use mindpath_insights::journal::{JournalInsights, JournalSample, analyze_journal_patterns};
use mindpath_insights::mood::{MoodInsights, analyze_mood_patterns};
use mindpath_types::api::Claims;
use mindpath_types::models::{JournalRecord, MoodRecord};

use crate::auth::AppState;
use crate::records::{decrypt_entries, parse_row_timestamp};

/// Trailing window for both insight endpoints.
const INSIGHT_WINDOW_DAYS: u32 = 30;

pub async fn mood_patterns(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<MoodInsights>, StatusCode> {
    let st = state.clone();
    let user_id = claims.sub;
    let username = claims.username.clone();

    let insights = tokio::task::spawn_blocking(move || -> Result<MoodInsights, StatusCode> {
        let rows = st
            .db
            .mood_entries_since_days(user_id, INSIGHT_WINDOW_DAYS)
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

        let decrypted = decrypt_entries(&st.cipher, rows, &username, "mood")?;

        let payloads: Vec<MoodRecord> = decrypted
            .into_iter()
            .filter_map(|(row, value)| match serde_json::from_value(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("dropping malformed mood payload {}: {}", row.id, e);
                    None
                }
            })
            .collect();

        Ok(analyze_mood_patterns(&payloads))
    })
    .await
    .map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })??;

    Ok(Json(insights))
}

pub async fn journal_patterns(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<JournalInsights>, StatusCode> {
    let st = state.clone();
    let user_id = claims.sub;
    let username = claims.username.clone();

    let insights = tokio::task::spawn_blocking(move || -> Result<JournalInsights, StatusCode> {
        let rows = st
            .db
            .journal_entries_since_days(user_id, INSIGHT_WINDOW_DAYS)
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

        let decrypted = decrypt_entries(&st.cipher, rows, &username, "journal")?;

        let samples: Vec<JournalSample> = decrypted
            .into_iter()
            .filter_map(|(row, value)| {
                let record: JournalRecord = match serde_json::from_value(value) {
                    Ok(record) => record,
                    Err(e) => {
                        warn!("dropping malformed journal payload {}: {}", row.id, e);
                        return None;
                    }
                };
                Some(JournalSample {
                    text: record.text,
                    created_at: parse_row_timestamp(&row.created_at, row.id),
                })
            })
            .collect();

        Ok(analyze_journal_patterns(&samples))
    })
    .await
    .map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })??;

    Ok(Json(insights))
}
