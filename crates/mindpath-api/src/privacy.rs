use axum::{Extension, Json, extract::State, http::StatusCode};
use tracing::error;

use mindpath_db::models::EntryRow;
use mindpath_types::api::{
    Claims, DeleteAllResponse, ExportResponse, ExportedProfile, ExportedRecord,
};

use crate::auth::AppState;

/// Export everything the server holds for this user. Mood and journal rows
/// are returned as stored — ciphertext and IV, not decrypted.
pub async fn export_data(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ExportResponse>, StatusCode> {
    let st = state.clone();
    let user_id = claims.sub;

    let export = tokio::task::spawn_blocking(move || -> Result<ExportResponse, StatusCode> {
        let user = st
            .db
            .get_user_by_id(user_id)
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
            .ok_or(StatusCode::NOT_FOUND)?;

        let moods = st
            .db
            .all_mood_entries(user_id)
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
        let journals = st
            .db
            .all_journal_entries(user_id)
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

        Ok(ExportResponse {
            profile: ExportedProfile {
                username: user.username,
                year_in_school: user.year_in_school,
                created_at: user.created_at,
            },
            moods: moods.into_iter().map(exported).collect(),
            journals: journals.into_iter().map(exported).collect(),
            export_date: chrono::Utc::now().to_rfc3339(),
        })
    })
    .await
    .map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })??;

    Ok(Json(export))
}

fn exported(row: EntryRow) -> ExportedRecord {
    ExportedRecord {
        encrypted_data: row.encrypted_data,
        iv: row.iv,
        ai_response: row.ai_response,
        created_at: row.created_at,
    }
}

/// Privacy erasure: drop every owned record, then the account itself.
pub async fn delete_all(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<DeleteAllResponse>, StatusCode> {
    let st = state.clone();
    let user_id = claims.sub;

    tokio::task::spawn_blocking(move || st.db.delete_user_data(user_id))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(DeleteAllResponse {
        success: true,
        message: "All data deleted successfully".to_string(),
    }))
}
