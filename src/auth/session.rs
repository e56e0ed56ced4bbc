use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Session file name in cache directory
const SESSION_FILE: &str = "session.json";

/// Token expiry time in minutes, matching the backend's JWT lifetime.
const TOKEN_EXPIRY_MINUTES: i64 = 60;

/// Role the authenticated user acts as. Determines which operation set
/// applies; wire values match the backend's role strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "guardia")]
    Guard,
    #[serde(rename = "residente")]
    Resident,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Guard => write!(f, "guardia"),
            Role::Resident => write!(f, "residente"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub token: String,
    pub user_id: i64,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl SessionData {
    pub fn is_expired(&self) -> bool {
        let expiry = self.created_at + Duration::minutes(TOKEN_EXPIRY_MINUTES);
        Utc::now() > expiry
    }
}

/// Persisted bearer-token session. Obtaining the token (login) is outside
/// this crate; callers store what the backend handed them.
pub struct Session {
    cache_dir: PathBuf,
    pub data: Option<SessionData>,
}

impl Session {
    pub fn new(cache_dir: PathBuf) -> Self {
        Self {
            cache_dir,
            data: None,
        }
    }

    /// Load session from disk. Returns whether a non-expired session exists.
    pub fn load(&mut self) -> Result<bool> {
        let path = self.session_path();
        if path.exists() {
            let contents =
                std::fs::read_to_string(&path).context("Failed to read session file")?;
            let data: SessionData =
                serde_json::from_str(&contents).context("Failed to parse session file")?;

            if !data.is_expired() {
                self.data = Some(data);
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Save session to disk
    pub fn save(&self) -> Result<()> {
        if let Some(ref data) = self.data {
            let path = self.session_path();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let contents = serde_json::to_string_pretty(data)?;
            std::fs::write(path, contents)?;
        }
        Ok(())
    }

    /// Clear session data
    pub fn clear(&mut self) -> Result<()> {
        self.data = None;
        let path = self.session_path();
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }

    pub fn update(&mut self, data: SessionData) {
        self.data = Some(data);
    }

    /// Get the bearer token if a session is loaded
    pub fn token(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.token.as_str())
    }

    pub fn role(&self) -> Option<Role> {
        self.data.as_ref().map(|d| d.role)
    }

    /// Check if session is valid (exists and not expired)
    pub fn is_valid(&self) -> bool {
        self.data.as_ref().map(|d| !d.is_expired()).unwrap_or(false)
    }

    fn session_path(&self) -> PathBuf {
        self.cache_dir.join(SESSION_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_data(created_at: DateTime<Utc>) -> SessionData {
        SessionData {
            token: "tok".to_string(),
            user_id: 7,
            role: Role::Guard,
            created_at,
        }
    }

    #[test]
    fn test_session_expiry() {
        let fresh = session_data(Utc::now());
        assert!(!fresh.is_expired());

        let old = session_data(Utc::now() - Duration::minutes(TOKEN_EXPIRY_MINUTES + 1));
        assert!(old.is_expired());
    }

    #[test]
    fn test_session_roundtrip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new(dir.path().to_path_buf());
        session.update(session_data(Utc::now()));
        session.save().unwrap();

        let mut reloaded = Session::new(dir.path().to_path_buf());
        assert!(reloaded.load().unwrap());
        assert_eq!(reloaded.token(), Some("tok"));
        assert_eq!(reloaded.role(), Some(Role::Guard));
    }

    #[test]
    fn test_expired_session_not_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new(dir.path().to_path_buf());
        session.update(session_data(
            Utc::now() - Duration::minutes(TOKEN_EXPIRY_MINUTES + 5),
        ));
        session.save().unwrap();

        let mut reloaded = Session::new(dir.path().to_path_buf());
        assert!(!reloaded.load().unwrap());
        assert!(reloaded.data.is_none());
    }

    #[test]
    fn test_role_wire_names() {
        assert_eq!(serde_json::to_value(Role::Guard).unwrap(), "guardia");
        assert_eq!(serde_json::to_value(Role::Resident).unwrap(), "residente");
    }
}
