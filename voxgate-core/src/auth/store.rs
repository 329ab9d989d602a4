use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// The three durable entries the store owns: bearer token, authenticated
/// flag, cached username. The key names live here and nowhere else; every
/// other component goes through the accessor surface below.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct StoredSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(default)]
    authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    username: Option<String>,
}

/// Bearer credential as the interceptor pipeline sees it. An absent token is
/// a valid, non-error state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub token: Option<String>,
}

impl Credential {
    pub fn absent() -> Self {
        Self { token: None }
    }

    pub fn is_present(&self) -> bool {
        self.token.is_some()
    }
}

/// Durable credential storage. Each process holds one instance and clones it
/// wherever a reader is needed; the Arc keeps every clone on the same state,
/// so a clear in one place is immediately visible everywhere.
///
/// All three entries mutate under a single guard: no reader can ever observe
/// a token without its flag, or a half-cleared session.
#[derive(Clone)]
pub struct CredentialStore {
    store_path: PathBuf,
    inner: Arc<Mutex<StoredSession>>,
}

impl CredentialStore {
    /// Create a store at the default location (~/.voxgate/credentials.toml)
    pub fn new() -> Result<Self> {
        Self::from_path(Self::default_store_path()?)
    }

    /// Create a store backed by a specific file
    pub fn from_path(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {parent:?}"))?;
        }

        let loaded = Self::load_from_file_with_backup(&path)?;

        Ok(Self {
            store_path: path,
            inner: Arc::new(Mutex::new(loaded)),
        })
    }

    fn default_store_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Failed to get home directory")?;
        Ok(home.join(".voxgate").join("credentials.toml"))
    }

    /// Load the session from a TOML file with backup on parse failure. A
    /// missing file is an absent session, not an error.
    fn load_from_file_with_backup(path: &Path) -> Result<StoredSession> {
        if !path.exists() {
            return Ok(StoredSession::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read credentials from {path:?}"))?;

        match toml::from_str(&contents) {
            Ok(session) => Ok(session),
            Err(_) => {
                // Move corrupted file to backup and start from an empty
                // session rather than refusing to start.
                let backup_path = path.with_extension("toml.backup");
                fs::rename(path, &backup_path).with_context(|| {
                    format!("Failed to backup corrupted credentials to {backup_path:?}")
                })?;

                Ok(StoredSession::default())
            }
        }
    }

    /// Current bearer credential. Never fails; serves the in-memory copy.
    pub fn credential(&self) -> Credential {
        Credential {
            token: self.inner.lock().unwrap().token.clone(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.lock().unwrap().authenticated
    }

    /// Cached identity (username) from the last login, if any
    pub fn identity(&self) -> Option<String> {
        self.inner.lock().unwrap().username.clone()
    }

    /// Store token, authenticated flag and identity as one unit
    pub fn store_session(&self, token: String, username: String) -> Result<()> {
        let mut guard = self.inner.lock().unwrap();
        *guard = StoredSession {
            token: Some(token),
            authenticated: true,
            username: Some(username),
        };
        self.persist(&guard)
    }

    /// Remove all three entries. The in-memory state is wiped first, under
    /// the same guard the readers use, so even if the file write fails no
    /// caller can observe a partially-cleared session.
    pub fn clear(&self) -> Result<()> {
        let mut guard = self.inner.lock().unwrap();
        *guard = StoredSession::default();
        self.persist(&guard)
    }

    fn persist(&self, session: &StoredSession) -> Result<()> {
        let contents =
            toml::to_string_pretty(session).context("Failed to serialize credentials")?;
        fs::write(&self.store_path, contents)
            .with_context(|| format!("Failed to write credentials to {:?}", self.store_path))
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.store_path
    }
}
