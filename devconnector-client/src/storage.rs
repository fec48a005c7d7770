use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::ClientError;

/// Key under which the token is persisted
pub const TOKEN_KEY: &str = "token";

/// Durable home of the session token.
///
/// The persisted copy is the source of truth across restarts; the in-memory
/// auth state only mirrors it.
pub trait TokenStorage: Send + Sync {
    fn load(&self) -> Result<Option<String>, ClientError>;

    fn store(&self, token: &str) -> Result<(), ClientError>;

    fn clear(&self) -> Result<(), ClientError>;
}

/// Token kept in a small JSON key/value file.
///
/// Other keys already present in the file are left alone.
#[derive(Debug, Clone)]
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage file inside the platform data directory.
    ///
    /// Falls back to the temp directory when the platform has none.
    pub fn in_data_dir(app_name: &str) -> Self {
        let mut path = dirs::data_dir().unwrap_or_else(std::env::temp_dir);
        path.push(app_name);
        path.push("storage.json");
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn read_entries(&self) -> Result<HashMap<String, String>, ClientError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(HashMap::new()),
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|e| ClientError::Storage(format!("{}: {e}", self.path.display()))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_entries(&self, entries: &HashMap<String, String>) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents =
            serde_json::to_string_pretty(entries).map_err(|e| ClientError::Storage(e.to_string()))?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl TokenStorage for FileTokenStorage {
    fn load(&self) -> Result<Option<String>, ClientError> {
        Ok(self.read_entries()?.remove(TOKEN_KEY))
    }

    fn store(&self, token: &str) -> Result<(), ClientError> {
        let mut entries = self.read_entries()?;
        entries.insert(TOKEN_KEY.to_string(), token.to_string());
        self.write_entries(&entries)
    }

    fn clear(&self) -> Result<(), ClientError> {
        let mut entries = self.read_entries()?;
        if entries.remove(TOKEN_KEY).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

/// Process-local storage, for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    fn slot(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>, ClientError> {
        self.token
            .lock()
            .map_err(|_| ClientError::Storage("token slot poisoned".to_string()))
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> Result<Option<String>, ClientError> {
        Ok(self.slot()?.clone())
    }

    fn store(&self, token: &str) -> Result<(), ClientError> {
        *self.slot()? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        *self.slot()? = None;
        Ok(())
    }
}
