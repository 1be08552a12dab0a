use axum::{Extension, Json, extract::State, http::StatusCode};
use tracing::{error, warn};

use mindpath_insights::strategies::{Strategy, select_strategies};
use mindpath_types::api::Claims;
use mindpath_types::models::MoodRecord;

use crate::auth::AppState;
use crate::records::decrypt_entries;

/// Coping strategies matched to the user's most recent mood entry.
/// No mood history, no pool match, or an undecryptable latest entry all
/// degrade to an empty list rather than an error.
pub async fn personalized_strategies(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<Strategy>>, StatusCode> {
    let st = state.clone();
    let user_id = claims.sub;
    let username = claims.username.clone();

    let strategies = tokio::task::spawn_blocking(move || -> Result<Vec<Strategy>, StatusCode> {
        let rows = st
            .db
            .recent_mood_entries(user_id, 1)
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

        let decrypted = decrypt_entries(&st.cipher, rows, &username, "mood")?;

        let latest: Option<MoodRecord> =
            decrypted
                .into_iter()
                .next()
                .and_then(|(row, value)| match serde_json::from_value(value) {
                    Ok(record) => Some(record),
                    Err(e) => {
                        warn!("dropping malformed mood payload {}: {}", row.id, e);
                        None
                    }
                });

        Ok(match latest {
            Some(record) => select_strategies(&record),
            None => vec![],
        })
    })
    .await
    .map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })??;

    Ok(Json(strategies))
}
