use crate::utils::error::{Result, SeeFoodError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Returns the first file in `dir` (non-recursive) whose extension is `extension`.
///
/// "First" is whatever order the file system yields entries in. Symlinks
/// count when they point at a regular file.
pub fn locate_credentials(dir: &Path, extension: &str) -> Result<PathBuf> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let matches_ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == extension);

        if matches_ext && path.is_file() {
            tracing::debug!("Using credentials file {}", path.display());
            return Ok(path);
        }
    }

    Err(SeeFoodError::CredentialsNotFound {
        dir: dir.display().to_string(),
    })
}

/// Google credentials JSON, discriminated by its `type` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Credentials {
    ServiceAccount(ServiceAccountKey),
    AuthorizedUser(AuthorizedUserKey),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthorizedUserKey {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    GOOGLE_TOKEN_URI.to_string()
}

impl Credentials {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content).map_err(|e| SeeFoodError::CredentialsError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    pub fn from_json_str(content: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Finds the credentials file in `dir` and parses it.
    pub fn discover(dir: &Path, extension: &str) -> Result<Self> {
        let path = locate_credentials(dir, extension)?;
        Self::from_file(&path)
    }

    pub fn token_uri(&self) -> &str {
        match self {
            Self::ServiceAccount(key) => &key.token_uri,
            Self::AuthorizedUser(key) => &key.token_uri,
        }
    }
}
