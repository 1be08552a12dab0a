//! Database row types — these map directly to SQLite rows.
//! Distinct from mindpath-types API models to keep the DB layer independent.

pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub year_in_school: Option<String>,
    pub created_at: String,
    pub last_login: Option<String>,
    pub settings: Option<String>,
}

/// An encrypted mood or journal row. `encrypted_data` and `iv` are hex text;
/// journal rows additionally carry the unencrypted supportive response.
pub struct EntryRow {
    pub id: i64,
    pub user_id: i64,
    pub encrypted_data: String,
    pub iv: String,
    pub ai_response: Option<String>,
    pub created_at: String,
}
