use super::User;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::warn;

/// Single-key store for the signed-in user, the local equivalent of browser storage.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<User>, SessionStoreError>;
    fn save(&self, user: &User) -> Result<(), SessionStoreError>;
    fn clear(&self) -> Result<(), SessionStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("session storage unavailable at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to encode session record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Stores the record as JSON in `<dir>/user.json`.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub const KEY: &'static str = "user";

    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", Self::KEY)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SessionStoreError {
        SessionStoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<User>, SessionStoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(self.io_error(err)),
        };

        match serde_json::from_str::<User>(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "discarding unreadable session record");
                self.clear()?;
                Ok(None)
            }
        }
    }

    fn save(&self, user: &User) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
        }
        let payload = serde_json::to_string(user)?;
        fs::write(&self.path, payload).map_err(|err| self.io_error(err))
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(self.io_error(err)),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemorySessionStore {
    user: Arc<Mutex<Option<User>>>,
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<User>, SessionStoreError> {
        Ok(self.user.lock().expect("session mutex poisoned").clone())
    }

    fn save(&self, user: &User) -> Result<(), SessionStoreError> {
        *self.user.lock().expect("session mutex poisoned") = Some(user.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        *self.user.lock().expect("session mutex poisoned") = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::UserRole;

    fn clinician() -> User {
        User {
            id: "2".to_string(),
            name: "Clinical User".to_string(),
            email: "gp@nhs.net".to_string(),
            role: UserRole::Clinician,
        }
    }

    #[test]
    fn file_store_round_trips_and_clears() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = FileSessionStore::new(dir.path().join("nested"));
        assert_eq!(store.load().expect("load empty"), None);

        store.save(&clinician()).expect("save");
        let raw = fs::read_to_string(store.path()).expect("stored file");
        assert!(raw.contains("\"role\":\"clinician\""));
        assert_eq!(store.load().expect("load"), Some(clinician()));

        store.clear().expect("clear");
        assert_eq!(store.load().expect("load cleared"), None);
        store.clear().expect("clear is idempotent");
    }

    #[test]
    fn corrupt_record_is_removed_and_treated_as_logged_out() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = FileSessionStore::new(dir.path());
        fs::write(store.path(), "{not json").expect("write corrupt record");

        assert_eq!(store.load().expect("load"), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn memory_store_holds_one_user() {
        let store = MemorySessionStore::default();
        store.save(&clinician()).expect("save");
        assert_eq!(store.load().expect("load"), Some(clinician()));
        store.clear().expect("clear");
        assert_eq!(store.load().expect("load"), None);
    }
}
