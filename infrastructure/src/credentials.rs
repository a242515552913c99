//! API credential loading
//!
//! The key comes from `OPENAI_API_KEY`. A non-blank exported value wins;
//! otherwise the key is read from a `.env` file in the working directory.
//! A missing `.env` file is not an error. The file is parsed without
//! touching the process environment.

use std::fmt;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Environment variable holding the API key
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Errors raised while provisioning credentials
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("OpenAI API key not found. Please set it in the .env file")]
    MissingApiKey,

    #[error("Failed to read {path}: {message}")]
    DotEnv { path: String, message: String },
}

/// An API credential. Opaque to the rest of the application.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    /// Resolve the key from the environment, then `./.env`.
    pub fn load() -> Result<Self, CredentialError> {
        Self::load_from_dir(Path::new("."))
    }

    /// Resolve the key from the environment, then `<dir>/.env`.
    pub fn load_from_dir(dir: &Path) -> Result<Self, CredentialError> {
        Self::resolve(std::env::var(API_KEY_VAR).ok(), &dir.join(".env"))
    }

    fn resolve(exported: Option<String>, dotenv_path: &Path) -> Result<Self, CredentialError> {
        if let Ok(credentials) = Self::from_value(exported) {
            debug!("Using {} from the environment", API_KEY_VAR);
            return Ok(credentials);
        }
        Self::from_value(read_dotenv_key(dotenv_path)?)
    }

    /// Accept a key from any source; blank counts as missing.
    pub fn from_value(value: Option<String>) -> Result<Self, CredentialError> {
        match value {
            Some(key) if !key.trim().is_empty() => Ok(Self {
                api_key: key.trim().to_string(),
            }),
            _ => Err(CredentialError::MissingApiKey),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

/// Look up the key in a `.env` file. `Ok(None)` if the file or the key is absent.
fn read_dotenv_key(path: &Path) -> Result<Option<String>, CredentialError> {
    let entries = match dotenvy::from_path_iter(path) {
        Ok(entries) => entries,
        Err(e) if e.not_found() => {
            debug!("No .env file at {}", path.display());
            return Ok(None);
        }
        Err(e) => return Err(dotenv_error(path, e)),
    };

    for entry in entries {
        let (key, value) = entry.map_err(|e| dotenv_error(path, e))?;
        if key == API_KEY_VAR {
            debug!("Read {} from {}", API_KEY_VAR, path.display());
            return Ok(Some(value));
        }
    }
    Ok(None)
}

fn dotenv_error(path: &Path, error: dotenvy::Error) -> CredentialError {
    CredentialError::DotEnv {
        path: path.display().to_string(),
        message: error.to_string(),
    }
}
