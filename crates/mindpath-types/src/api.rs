use serde::{Deserialize, Serialize};

// -- JWT Claims --

/// JWT claims shared between the REST middleware and token issuance.
/// Canonical definition lives here in mindpath-types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub username: String,
    pub exp: usize,
}

// -- Auth --

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    #[serde(rename = "yearInSchool", default)]
    pub year_in_school: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    #[serde(rename = "yearInSchool")]
    pub year_in_school: Option<String>,
}

// -- Mood tracking --

#[derive(Debug, Deserialize)]
pub struct SaveMoodRequest {
    pub mood: i64,
    #[serde(default)]
    pub emotions: Vec<String>,
    #[serde(default)]
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SaveMoodResponse {
    pub success: bool,
    pub id: i64,
    pub message: String,
}

// -- Journaling --

#[derive(Debug, Deserialize)]
pub struct SaveJournalRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct SaveJournalResponse {
    pub success: bool,
    pub id: i64,
    #[serde(rename = "aiResponse")]
    pub ai_response: String,
}

// -- Privacy --

#[derive(Debug, Serialize)]
pub struct ExportedRecord {
    pub encrypted_data: String,
    pub iv: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_response: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub profile: ExportedProfile,
    pub moods: Vec<ExportedRecord>,
    pub journals: Vec<ExportedRecord>,
    #[serde(rename = "exportDate")]
    pub export_date: String,
}

#[derive(Debug, Serialize)]
pub struct ExportedProfile {
    pub username: String,
    #[serde(rename = "yearInSchool")]
    pub year_in_school: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteAllResponse {
    pub success: bool,
    pub message: String,
}

// -- Crisis resources --

#[derive(Debug, Clone, Serialize)]
pub struct CrisisResource {
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<&'static str>,
    pub description: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
}
