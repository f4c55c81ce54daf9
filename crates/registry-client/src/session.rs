//! Session store and token persistence.

use parking_lot::{Mutex, RwLock};
use registry_core::{AuthView, ClientError, Session, TokenStorage, UserProfile};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// On-disk shape: `{"token": "..."}`.
#[derive(Serialize, Deserialize)]
struct TokenDocument {
    token: String,
}

/// Token persisted as a small JSON document.
#[derive(Debug, Clone)]
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_error(&self, action: &str, err: impl std::fmt::Display) -> ClientError {
        ClientError::Storage(format!("{} {}: {}", action, self.path.display(), err))
    }
}

impl TokenStorage for FileTokenStorage {
    fn load(&self) -> Result<Option<String>, ClientError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.storage_error("read", e)),
        };
        let doc: TokenDocument =
            serde_json::from_str(&raw).map_err(|e| self.storage_error("parse", e))?;
        Ok(Some(doc.token).filter(|token| !token.is_empty()))
    }

    fn save(&self, token: &str) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.storage_error("create", e))?;
        }
        let doc = TokenDocument { token: token.to_string() };
        let raw = serde_json::to_string(&doc).map_err(|e| self.storage_error("encode", e))?;
        write_private(&self.path, &raw).map_err(|e| self.storage_error("write", e))
    }

    fn clear(&self) -> Result<(), ClientError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.storage_error("remove", e)),
        }
    }
}

/// Owner-only on unix, including when the file already existed.
fn write_private(path: &Path, raw: &str) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(raw.as_bytes())
}

/// Process-local storage, for tests and one-shot runs.
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    slot: Mutex<Option<String>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self { slot: Mutex::new(Some(token.to_string())) }
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> Result<Option<String>, ClientError> {
        Ok(self.slot.lock().clone())
    }

    fn save(&self, token: &str) -> Result<(), ClientError> {
        *self.slot.lock() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        *self.slot.lock() = None;
        Ok(())
    }
}

/// Current token and user, plus the storage they survive restarts in.
#[derive(Clone)]
pub struct SessionStore {
    state: Arc<RwLock<Session>>,
    storage: Arc<dyn TokenStorage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn TokenStorage>) -> Self {
        Self {
            state: Arc::new(RwLock::new(Session::default())),
            storage,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStorage::new()))
    }

    pub fn token(&self) -> Option<String> {
        self.state.read().token.clone()
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.state.read().user.clone()
    }

    pub fn snapshot(&self) -> Session {
        self.state.read().clone()
    }

    pub fn view(&self) -> AuthView {
        self.state.read().view()
    }

    pub fn persisted_token(&self) -> Result<Option<String>, ClientError> {
        self.storage.load()
    }

    /// Use a token in memory without writing it back.
    pub fn adopt_token(&self, token: String) {
        let mut state = self.state.write();
        state.token = Some(token);
        state.user = None;
    }

    /// Persist first, so a storage failure leaves the session untouched.
    pub fn set_token(&self, token: &str) -> Result<(), ClientError> {
        self.storage.save(token)?;
        self.adopt_token(token.to_string());
        Ok(())
    }

    pub fn set_user(&self, user: UserProfile) {
        self.state.write().user = Some(user);
    }

    /// Drop token and user everywhere. Storage failures are logged, not returned.
    pub fn clear(&self) {
        *self.state.write() = Session::default();
        if let Err(e) = self.storage.clear() {
            warn!(error = %e, "Failed to clear persisted token");
        } else {
            debug!("Session cleared");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;

    mock! {
        Storage {}
        impl TokenStorage for Storage {
            fn load(&self) -> Result<Option<String>, ClientError>;
            fn save(&self, token: &str) -> Result<(), ClientError>;
            fn clear(&self) -> Result<(), ClientError>;
        }
    }

    fn user(name: &str) -> UserProfile {
        UserProfile {
            id: None,
            username: name.to_string(),
            full_name: None,
            role: "admin".to_string(),
            person_id: None,
            household_id: None,
        }
    }

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileTokenStorage::new(dir.path().join("nested").join("session.json"));

        assert_eq!(storage.load().unwrap(), None);
        storage.save("tok-1").unwrap();
        assert_eq!(storage.load().unwrap(), Some("tok-1".to_string()));

        let raw = fs::read_to_string(storage.path()).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(doc["token"], "tok-1");

        storage.clear().unwrap();
        storage.clear().unwrap();
        assert_eq!(storage.load().unwrap(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_token_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{}").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        FileTokenStorage::new(&path).save("tok-1").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);

        let fresh = dir.path().join("fresh.json");
        FileTokenStorage::new(&fresh).save("tok-2").unwrap();
        assert_eq!(fs::metadata(&fresh).unwrap().permissions().mode() & 0o777, 0o600);
    }

    #[test]
    fn test_file_storage_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        let err = FileTokenStorage::new(&path).load().unwrap_err();
        assert!(matches!(err, ClientError::Storage(_)));
    }

    #[test]
    fn test_set_token_failure_leaves_session_unchanged() {
        let mut storage = MockStorage::new();
        storage
            .expect_save()
            .returning(|_| Err(ClientError::Storage("disk full".to_string())));

        let store = SessionStore::new(Arc::new(storage));
        assert!(store.set_token("tok").is_err());
        assert!(store.token().is_none());
    }

    #[test]
    fn test_clear_never_fails() {
        let mut storage = MockStorage::new();
        storage.expect_save().returning(|_| Ok(()));
        storage
            .expect_clear()
            .times(1)
            .returning(|| Err(ClientError::Storage("read-only".to_string())));

        let store = SessionStore::new(Arc::new(storage));
        store.set_token("tok").unwrap();
        store.set_user(user("admin"));
        assert_eq!(
            store.view(),
            AuthView::SignedIn { username: "admin".to_string(), role: "admin".to_string() }
        );

        store.clear();
        assert_eq!(store.snapshot(), Session::default());
        assert_eq!(store.view(), AuthView::Anonymous);
    }
}
