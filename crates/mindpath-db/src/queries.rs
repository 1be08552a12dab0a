use crate::Database;
use crate::models::{EntryRow, UserRow};
use anyhow::Result;
use rusqlite::Connection;

impl Database {
    // -- Users --

    pub fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        year_in_school: Option<&str>,
    ) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (username, password_hash, year_in_school) VALUES (?1, ?2, ?3)",
                (username, password_hash, year_in_school),
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "username = ?1", [username]))
    }

    pub fn get_user_by_id(&self, id: i64) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "id = ?1", [id]))
    }

    pub fn touch_last_login(&self, id: i64) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "UPDATE users SET last_login = datetime('now') WHERE id = ?1",
                [id],
            )?;
            Ok(())
        })
    }

    // -- Mood entries --

    pub fn insert_mood_entry(&self, user_id: i64, encrypted_data: &str, iv: &str) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO mood_entries (user_id, encrypted_data, iv) VALUES (?1, ?2, ?3)",
                (user_id, encrypted_data, iv),
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Most recent mood entries first.
    pub fn recent_mood_entries(&self, user_id: i64, limit: u32) -> Result<Vec<EntryRow>> {
        self.with_conn(|conn| {
            query_entries(
                conn,
                "SELECT id, user_id, encrypted_data, iv, NULL, created_at
                 FROM mood_entries WHERE user_id = ?1
                 ORDER BY created_at DESC, id DESC LIMIT ?2",
                (user_id, limit),
            )
        })
    }

    /// Mood entries from the trailing window, most recent first.
    pub fn mood_entries_since_days(&self, user_id: i64, days: u32) -> Result<Vec<EntryRow>> {
        self.with_conn(|conn| {
            query_entries(
                conn,
                "SELECT id, user_id, encrypted_data, iv, NULL, created_at
                 FROM mood_entries
                 WHERE user_id = ?1 AND created_at >= datetime('now', ?2)
                 ORDER BY created_at DESC, id DESC",
                (user_id, format!("-{days} days")),
            )
        })
    }

    pub fn all_mood_entries(&self, user_id: i64) -> Result<Vec<EntryRow>> {
        self.with_conn(|conn| {
            query_entries(
                conn,
                "SELECT id, user_id, encrypted_data, iv, NULL, created_at
                 FROM mood_entries WHERE user_id = ?1 ORDER BY created_at, id",
                [user_id],
            )
        })
    }

    // -- Journal entries --

    pub fn insert_journal_entry(
        &self,
        user_id: i64,
        encrypted_data: &str,
        iv: &str,
        ai_response: &str,
    ) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO journal_entries (user_id, encrypted_data, iv, ai_response)
                 VALUES (?1, ?2, ?3, ?4)",
                (user_id, encrypted_data, iv, ai_response),
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn recent_journal_entries(&self, user_id: i64, limit: u32) -> Result<Vec<EntryRow>> {
        self.with_conn(|conn| {
            query_entries(
                conn,
                "SELECT id, user_id, encrypted_data, iv, ai_response, created_at
                 FROM journal_entries WHERE user_id = ?1
                 ORDER BY created_at DESC, id DESC LIMIT ?2",
                (user_id, limit),
            )
        })
    }

    pub fn journal_entries_since_days(&self, user_id: i64, days: u32) -> Result<Vec<EntryRow>> {
        self.with_conn(|conn| {
            query_entries(
                conn,
                "SELECT id, user_id, encrypted_data, iv, ai_response, created_at
                 FROM journal_entries
                 WHERE user_id = ?1 AND created_at >= datetime('now', ?2)
                 ORDER BY created_at DESC, id DESC",
                (user_id, format!("-{days} days")),
            )
        })
    }

    pub fn all_journal_entries(&self, user_id: i64) -> Result<Vec<EntryRow>> {
        self.with_conn(|conn| {
            query_entries(
                conn,
                "SELECT id, user_id, encrypted_data, iv, ai_response, created_at
                 FROM journal_entries WHERE user_id = ?1 ORDER BY created_at, id",
                [user_id],
            )
        })
    }

    // -- Crisis logs --

    /// Append one audit row. Callers treat failure here as non-fatal.
    pub fn insert_crisis_log(
        &self,
        user_id: i64,
        severity_level: i64,
        detected_patterns: &str,
        action_taken: &str,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO crisis_logs (user_id, severity_level, detected_patterns, action_taken)
                 VALUES (?1, ?2, ?3, ?4)",
                (user_id, severity_level, detected_patterns, action_taken),
            )?;
            Ok(())
        })
    }

    // -- Privacy erasure --

    /// Delete every record owned by the user, then the user row itself.
    pub fn delete_user_data(&self, user_id: i64) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM mood_entries WHERE user_id = ?1", [user_id])?;
            conn.execute("DELETE FROM journal_entries WHERE user_id = ?1", [user_id])?;
            conn.execute("DELETE FROM crisis_logs WHERE user_id = ?1", [user_id])?;
            conn.execute("DELETE FROM users WHERE id = ?1", [user_id])?;
            Ok(())
        })
    }
}

fn query_user<P: rusqlite::Params>(
    conn: &Connection,
    predicate: &str,
    params: P,
) -> Result<Option<UserRow>> {
    let sql = format!(
        "SELECT id, username, password_hash, year_in_school, created_at, last_login, settings
         FROM users WHERE {predicate}"
    );
    let mut stmt = conn.prepare(&sql)?;

    let row = stmt
        .query_row(params, |row| {
            Ok(UserRow {
                id: row.get(0)?,
                username: row.get(1)?,
                password_hash: row.get(2)?,
                year_in_school: row.get(3)?,
                created_at: row.get(4)?,
                last_login: row.get(5)?,
                settings: row.get(6)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_entries<P: rusqlite::Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> Result<Vec<EntryRow>> {
    let mut stmt = conn.prepare(sql)?;

    let rows = stmt
        .query_map(params, |row| {
            Ok(EntryRow {
                id: row.get(0)?,
                user_id: row.get(1)?,
                encrypted_data: row.get(2)?,
                iv: row.get(3)?,
                ai_response: row.get(4)?,
                created_at: row.get(5)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Database;

    fn test_db() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(&dir.path().join("test.db")).unwrap();
        (dir, db)
    }

    #[test]
    fn user_lifecycle() {
        let (_dir, db) = test_db();

        let id = db.create_user("casey", "hash", Some("junior")).unwrap();
        let user = db.get_user_by_username("casey").unwrap().unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.year_in_school.as_deref(), Some("junior"));
        assert!(user.last_login.is_none());

        db.touch_last_login(id).unwrap();
        let user = db.get_user_by_id(id).unwrap().unwrap();
        assert!(user.last_login.is_some());

        // Duplicate username violates the UNIQUE constraint and the error
        // classifies as a constraint violation, not a generic failure
        let err = db.create_user("casey", "hash2", None).unwrap_err();
        assert!(crate::is_constraint_violation(&err));
        assert!(!crate::is_constraint_violation(&anyhow::anyhow!("lock poisoned")));
    }

    #[test]
    fn mood_entries_ordered_and_limited() {
        let (_dir, db) = test_db();
        let user = db.create_user("casey", "hash", None).unwrap();

        for i in 0..5 {
            db.insert_mood_entry(user, &format!("ct{i}"), &format!("iv{i}"))
                .unwrap();
        }

        let rows = db.recent_mood_entries(user, 3).unwrap();
        assert_eq!(rows.len(), 3);
        // Most recent first; identical timestamps fall back to id order
        assert_eq!(rows[0].encrypted_data, "ct4");
        assert_eq!(rows[2].encrypted_data, "ct2");
    }

    #[test]
    fn entries_are_scoped_to_their_owner() {
        let (_dir, db) = test_db();
        let a = db.create_user("casey", "hash", None).unwrap();
        let b = db.create_user("jordan", "hash", None).unwrap();

        db.insert_mood_entry(a, "ct-a", "iv-a").unwrap();
        db.insert_journal_entry(b, "ct-b", "iv-b", "response").unwrap();

        assert_eq!(db.recent_mood_entries(b, 10).unwrap().len(), 0);
        let journals = db.recent_journal_entries(b, 10).unwrap();
        assert_eq!(journals.len(), 1);
        assert_eq!(journals[0].ai_response.as_deref(), Some("response"));
    }

    #[test]
    fn delete_user_data_cascades() {
        let (_dir, db) = test_db();
        let user = db.create_user("casey", "hash", None).unwrap();
        db.insert_mood_entry(user, "ct", "iv").unwrap();
        db.insert_journal_entry(user, "ct", "iv", "response").unwrap();
        db.insert_crisis_log(user, 5, "[\"Very low mood\"]", "Alert generated")
            .unwrap();

        db.delete_user_data(user).unwrap();

        assert!(db.get_user_by_id(user).unwrap().is_none());
        assert_eq!(db.recent_mood_entries(user, 10).unwrap().len(), 0);
        assert_eq!(db.recent_journal_entries(user, 10).unwrap().len(), 0);
    }
}
