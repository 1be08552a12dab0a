use axum::Json;
use serde_json::json;

use mindpath_types::api::CrisisResource;

const CRISIS_RESOURCES: [CrisisResource; 4] = [
    CrisisResource {
        name: "National Suicide Prevention Lifeline",
        number: Some("988"),
        description: "24/7 free and confidential support",
        kind: "hotline",
    },
    CrisisResource {
        name: "Crisis Text Line",
        number: Some("Text HOME to 741741"),
        description: "Free 24/7 text support",
        kind: "text",
    },
    CrisisResource {
        name: "Campus Counseling",
        number: None,
        description: "Contact your university counseling center",
        kind: "campus",
    },
    CrisisResource {
        name: "Emergency Services",
        number: Some("911"),
        description: "For immediate danger",
        kind: "emergency",
    },
];

pub async fn crisis_resources() -> Json<Vec<CrisisResource>> {
    Json(CRISIS_RESOURCES.to_vec())
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "environment": std::env::var("MINDPATH_ENV").unwrap_or_else(|_| "development".to_string()),
    }))
}
