// resto-client/src/session.rs
// Session context - token + user, persisted as JSON

use serde::{Deserialize, Serialize};
use shared::models::User;
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::RestoApi;
use crate::client::HttpClient;
use crate::{ClientError, ClientResult};

/// File name of the persisted session inside the session directory
pub const SESSION_FILE: &str = "session.json";

/// What survives a restart: the bearer token and the logged-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub token: String,
    pub user: User,
}

/// Durable session storage (one JSON file)
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(SESSION_FILE),
        }
    }

    fn ensure_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    pub fn save(&self, data: &SessionData) -> std::io::Result<()> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, json)
    }

    /// Load the stored session. A missing or unreadable file means "logged out".
    pub fn load(&self) -> Option<SessionData> {
        if !self.path.exists() {
            return None;
        }
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Cannot read session file");
                return None;
            }
        };
        match serde_json::from_str(&json) {
            Ok(data) => Some(data),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Ignoring corrupt session file");
                None
            }
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn clear(&self) -> std::io::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Explicit session context, passed to whatever needs the current user.
///
/// Written only by [`Session::login`] and [`Session::logout`].
#[derive(Debug, Clone)]
pub struct Session {
    store: SessionStore,
    current: Option<SessionData>,
}

impl Session {
    /// Open the session, restoring whatever the store holds.
    pub fn open(store: SessionStore) -> Self {
        let current = store.load();
        if let Some(data) = &current {
            tracing::debug!(user = %data.user.name, "Restored session");
        }
        Self { store, current }
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|d| d.token.as_str())
    }

    pub fn user(&self) -> Option<&User> {
        self.current.as_ref().map(|d| &d.user)
    }

    /// The current session, or [`ClientError::NotLoggedIn`].
    pub fn require(&self) -> ClientResult<&SessionData> {
        self.current.as_ref().ok_or(ClientError::NotLoggedIn)
    }

    /// Hand the stored token to an API client.
    pub fn attach<C: HttpClient>(&self, api: &mut RestoApi<C>) {
        api.set_token(self.token().map(str::to_string));
    }

    /// Log in and persist the session.
    ///
    /// Any failure of the call itself is reported as
    /// [`ClientError::InvalidCredentials`]; the real cause only goes to the log.
    pub async fn login<C: HttpClient>(
        &mut self,
        api: &mut RestoApi<C>,
        email: &str,
        password: &str,
    ) -> ClientResult<&User> {
        let resp = match api.login(email, password).await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(target: "security", email, error = %e, "Login failed");
                return Err(ClientError::InvalidCredentials);
            }
        };

        let (Some(token), Some(user)) = (resp.access_token.filter(|t| !t.is_empty()), resp.user)
        else {
            tracing::warn!(target: "security", email, "Login response without token or user");
            return Err(ClientError::IncompleteLogin);
        };

        let data = SessionData { token, user };
        self.store.save(&data)?;
        api.set_token(Some(data.token.clone()));
        tracing::info!(target: "security", user_id = data.user.id, "Logged in");

        let data = self.current.insert(data);
        Ok(&data.user)
    }

    /// Forget the session, on disk and in the API client.
    pub fn logout<C: HttpClient>(&mut self, api: &mut RestoApi<C>) -> ClientResult<()> {
        self.store.clear()?;
        api.set_token(None);
        if let Some(data) = self.current.take() {
            tracing::info!(target: "security", user_id = data.user.id, "Logged out");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> SessionData {
        SessionData {
            token: "1|abcdef".to_string(),
            user: User {
                id: 1,
                name: "Kasir".to_string(),
                email: "kasir@resto.test".to_string(),
                roles: vec![],
            },
        }
    }

    #[test]
    fn test_store_save_load_clear() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path());
        assert!(!store.exists());
        assert!(store.load().is_none());

        store.save(&sample()).unwrap();
        assert!(store.exists());
        assert_eq!(store.load(), Some(sample()));
        assert_eq!(store.path(), dir.path().join(SESSION_FILE));

        store.clear().unwrap();
        assert!(!store.exists());
        // clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file_reads_as_logged_out() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path());
        fs::write(store.path(), "{not json").unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn test_unreadable_file_reads_as_logged_out() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path());
        // a directory in place of the file: exists, but can't be read
        fs::create_dir(store.path()).unwrap();
        assert!(store.exists());
        assert!(store.load().is_none());
    }

    #[test]
    fn test_open_restores_session() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path().join("nested"));
        store.save(&sample()).unwrap();

        let session = Session::open(store);
        assert!(session.is_logged_in());
        assert_eq!(session.token(), Some("1|abcdef"));
        assert_eq!(session.user().map(|u| u.name.as_str()), Some("Kasir"));
    }

    #[test]
    fn test_require_without_session() {
        let dir = TempDir::new().unwrap();
        let session = Session::open(SessionStore::new(dir.path()));
        assert!(matches!(session.require(), Err(ClientError::NotLoggedIn)));
    }
}
