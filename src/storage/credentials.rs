//! Persisted session state
//!
//! Two entries under `~/.primetask/`, mirroring what the session keeps in
//! memory: `token` (the raw bearer string) and `user.json` (the cached
//! account record). Written on every successful auth/profile mutation,
//! removed together on logout.

use std::fs;
use std::io;
use std::path::PathBuf;

use crate::api::types::UserRecord;

const TOKEN_FILE: &str = "token";
const USER_FILE: &str = "user.json";

/// Reads and writes the two persisted session entries.
///
/// The store is single-writer: only the owning process touches these files,
/// so there is no cross-process locking.
pub struct CredentialStore {
    dir: PathBuf,
}

impl CredentialStore {
    /// Store rooted at `~/.primetask/`.
    pub fn open() -> Self {
        Self {
            dir: super::primetask_dir(),
        }
    }

    /// Store rooted at an explicit directory (tests).
    #[cfg(test)]
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    fn user_path(&self) -> PathBuf {
        self.dir.join(USER_FILE)
    }

    /// Load both persisted entries. `None` unless *both* are present and the
    /// user record parses; a half-written state is treated as no session.
    pub fn load(&self) -> Option<(String, UserRecord)> {
        let token = fs::read_to_string(self.token_path()).ok()?;
        let token = token.trim().to_string();
        if token.is_empty() {
            return None;
        }
        let user_json = fs::read_to_string(self.user_path()).ok()?;
        let user = serde_json::from_str(&user_json).ok()?;
        Some((token, user))
    }

    pub fn save_token(&self, token: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.token_path(), token)
    }

    pub fn save_user(&self, user: &UserRecord) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string(user)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(self.user_path(), json)
    }

    /// Remove both entries. Missing files are fine; logout must never fail.
    pub fn clear(&self) {
        let _ = fs::remove_file(self.token_path());
        let _ = fs::remove_file(self.user_path());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user() -> UserRecord {
        UserRecord {
            id: 7,
            username: "jdoe".to_string(),
            email: "jdoe@example.com".to_string(),
            full_name: Some("Jane Doe".to_string()),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CredentialStore::at(tmp.path());

        assert!(store.load().is_none());

        store.save_token("tok-123").unwrap();
        // Token alone is not a session
        assert!(store.load().is_none());

        store.save_user(&user()).unwrap();
        let (token, loaded) = store.load().unwrap();
        assert_eq!(token, "tok-123");
        assert_eq!(loaded.username, "jdoe");
    }

    #[test]
    fn test_clear_removes_both_and_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CredentialStore::at(tmp.path());

        store.save_token("tok").unwrap();
        store.save_user(&user()).unwrap();
        store.clear();
        assert!(store.load().is_none());

        // Clearing an empty store is a no-op
        store.clear();
    }

    #[test]
    fn test_corrupt_user_record_is_no_session() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CredentialStore::at(tmp.path());

        store.save_token("tok").unwrap();
        std::fs::write(tmp.path().join("user.json"), "{not json").unwrap();
        assert!(store.load().is_none());
    }
}
