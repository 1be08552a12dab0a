use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            username        TEXT NOT NULL UNIQUE,
            password_hash   TEXT NOT NULL,
            year_in_school  TEXT,
            created_at      TEXT NOT NULL DEFAULT (datetime('now')),
            last_login      TEXT,
            settings        TEXT
        );

        CREATE TABLE IF NOT EXISTS mood_entries (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id         INTEGER NOT NULL REFERENCES users(id),
            encrypted_data  TEXT NOT NULL,
            iv              TEXT NOT NULL,
            created_at      TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_mood_entries_user
            ON mood_entries(user_id, created_at);

        CREATE TABLE IF NOT EXISTS journal_entries (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id         INTEGER NOT NULL REFERENCES users(id),
            encrypted_data  TEXT NOT NULL,
            iv              TEXT NOT NULL,
            ai_response     TEXT,
            created_at      TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_journal_entries_user
            ON journal_entries(user_id, created_at);

        -- Append-only audit trail; written when a submission crosses the
        -- crisis severity threshold, never read back by the app.
        CREATE TABLE IF NOT EXISTS crisis_logs (
            id                 INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id            INTEGER NOT NULL REFERENCES users(id),
            severity_level     INTEGER,
            detected_patterns  TEXT,
            action_taken       TEXT,
            created_at         TEXT NOT NULL DEFAULT (datetime('now'))
        );
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
