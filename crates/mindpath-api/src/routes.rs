use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::AppState;
use crate::middleware::require_auth;
use crate::{auth, insights, journal, moods, privacy, resources, strategies};

/// Assemble the full API router. Kept out of the binary so integration
/// tests can drive the service in-process.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        .route("/api/crisis/resources", get(resources::crisis_resources))
        .route("/api/health", get(resources::health))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/api/mood", post(moods::save_mood))
        .route("/api/mood/history", get(moods::mood_history))
        .route("/api/journal", post(journal::save_journal))
        .route("/api/journal/history", get(journal::journal_history))
        .route("/api/insights/patterns", get(insights::mood_patterns))
        .route("/api/insights/journal", get(insights::journal_patterns))
        .route("/api/strategies", get(strategies::personalized_strategies))
        .route("/api/privacy/export", post(privacy::export_data))
        .route("/api/privacy/delete-all", delete(privacy::delete_all))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
