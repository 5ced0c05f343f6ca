use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::AuthError;
use super::token::StoredAuth;

const TOKEN_FILE_VERSION: u32 = 1;

/// Storage abstraction for the persisted session.
///
/// Implementations do no validation of token structure or expiry; the API's
/// response codes are the only judge of validity.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<StoredAuth>, AuthError>;
    fn save(&self, auth: &StoredAuth) -> Result<(), AuthError>;
    fn clear(&self) -> Result<(), AuthError>;
}

/// Configuration for file-backed token storage.
#[derive(Debug, Clone)]
pub struct TokenStoreConfig {
    pub base_dir: PathBuf,
    pub profile: String,
}

impl TokenStoreConfig {
    pub fn new(base_dir: PathBuf) -> Self {
        Self {
            base_dir,
            profile: "default".to_string(),
        }
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    pub fn default_dir() -> PathBuf {
        default_store_dir()
    }
}

/// File-backed token store using one TOML file per profile.
///
/// # Example
/// ```no_run
/// use prompt_client::auth::{FileTokenStore, StoredAuth, TokenPair, TokenStore};
///
/// let store = FileTokenStore::new_default();
/// store.save(&StoredAuth::new(TokenPair::new("access", "refresh"), None))?;
/// # Ok::<(), prompt_client::auth::AuthError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    base_dir: PathBuf,
    profile: String,
}

impl FileTokenStore {
    pub fn new(config: TokenStoreConfig) -> Self {
        Self {
            base_dir: config.base_dir,
            profile: config.profile,
        }
    }

    pub fn new_default() -> Self {
        Self::new(TokenStoreConfig::new(default_store_dir()))
    }

    /// Location of the token file for this store's profile.
    pub fn path(&self) -> PathBuf {
        let profile = normalize_label(&self.profile);
        let name = if profile == "default" {
            "session.toml".to_string()
        } else {
            format!("session.{profile}.toml")
        };
        self.base_dir.join(name)
    }

    fn ensure_parent(path: &Path) -> Result<(), AuthError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<StoredAuth>, AuthError> {
        let path = self.path();
        let raw = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(AuthError::Storage(err.to_string())),
        };
        let file: TokenFile = toml::from_str(&raw)?;
        if file.version != TOKEN_FILE_VERSION {
            return Err(AuthError::Serialization(format!(
                "unsupported token file version {} at {}",
                file.version,
                path.display()
            )));
        }
        Ok(Some(file.auth))
    }

    fn save(&self, auth: &StoredAuth) -> Result<(), AuthError> {
        let path = self.path();
        Self::ensure_parent(&path)?;
        let file = TokenFile {
            version: TOKEN_FILE_VERSION,
            profile: self.profile.clone(),
            saved_at: Utc::now(),
            auth: auth.clone(),
        };
        let serialized = toml::to_string(&file)?;
        fs::write(&path, serialized)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        match fs::remove_file(self.path()) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(AuthError::Storage(err.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TokenFile {
    version: u32,
    profile: String,
    saved_at: DateTime<Utc>,
    auth: StoredAuth,
}

/// Process-local token store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    auth: Mutex<Option<StoredAuth>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_auth(auth: StoredAuth) -> Self {
        Self {
            auth: Mutex::new(Some(auth)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<StoredAuth>, AuthError> {
        let guard = self
            .auth
            .lock()
            .map_err(|_| AuthError::Storage("token store lock poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn save(&self, auth: &StoredAuth) -> Result<(), AuthError> {
        let mut guard = self
            .auth
            .lock()
            .map_err(|_| AuthError::Storage("token store lock poisoned".to_string()))?;
        *guard = Some(auth.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        let mut guard = self
            .auth
            .lock()
            .map_err(|_| AuthError::Storage("token store lock poisoned".to_string()))?;
        *guard = None;
        Ok(())
    }
}

fn default_store_dir() -> PathBuf {
    directories::UserDirs::new()
        .map(|dirs| dirs.home_dir().join(".prompt-client"))
        .unwrap_or_else(|| PathBuf::from(".prompt-client"))
}

fn normalize_label(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return "default".to_string();
    }
    let mut out = String::with_capacity(trimmed.len());
    for ch in trimmed.chars() {
        let lower = ch.to_ascii_lowercase();
        if lower.is_ascii_alphanumeric() || lower == '-' {
            out.push(lower);
        } else {
            out.push('-');
        }
    }
    if out.trim_matches('-').is_empty() {
        "default".to_string()
    } else {
        out
    }
}
