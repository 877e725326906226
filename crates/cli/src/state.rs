use std::fs;
use std::path::{Path, PathBuf};

use common::crypto::{CryptographyKey, KeyKind};
use serde::{Deserialize, Serialize};
use url::Url;

pub const APP_NAME: &str = "sapient";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const KEYS_DIR_NAME: &str = "keys";
pub const KEY_FILE_EXTENSION: &str = "pem";
pub const SIGNING_KEY_NAME: &str = "signing";
pub const SEALING_KEY_NAME: &str = "sealing";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default base URL for `send` (optional, `--remote` overrides it)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<Url>,
    /// Directory holding named key files (defaults to <sapient_dir>/keys)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the sapient directory (~/.sapient)
    pub sapient_dir: PathBuf,
    /// Path to the directory of named keys
    pub keys_path: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Loaded configuration
    pub config: AppConfig,
}

impl AppState {
    /// Get the sapient directory path (custom or default ~/.sapient)
    pub fn sapient_dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    /// Initialize a new state directory with a signing and a sealing identity
    pub fn init(
        custom_path: Option<PathBuf>,
        config: Option<AppConfig>,
    ) -> Result<Self, StateError> {
        let sapient_dir = Self::sapient_dir(custom_path)?;

        if sapient_dir.join(CONFIG_FILE_NAME).exists() {
            return Err(StateError::AlreadyInitialized);
        }

        fs::create_dir_all(&sapient_dir)?;

        let config = config.unwrap_or_default();
        let config_path = sapient_dir.join(CONFIG_FILE_NAME);
        fs::write(&config_path, toml::to_string_pretty(&config)?)?;

        let keys_path = Self::keys_path_for(&sapient_dir, &config);
        fs::create_dir_all(&keys_path)?;

        let state = Self {
            sapient_dir,
            keys_path,
            config_path,
            config,
        };

        for (name, kind) in [
            (SIGNING_KEY_NAME, KeyKind::SigningSecret),
            (SEALING_KEY_NAME, KeyKind::SealingSecret),
        ] {
            if let Some(key) = CryptographyKey::generate(kind) {
                state.save_key(name, &key, false)?;
            }
        }

        Ok(state)
    }

    /// Load existing state from the sapient directory
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let sapient_dir = Self::sapient_dir(custom_path)?;

        if !sapient_dir.exists() {
            return Err(StateError::NotInitialized);
        }

        let config_path = sapient_dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return Err(StateError::MissingFile(CONFIG_FILE_NAME.to_string()));
        }

        let config_toml = fs::read_to_string(&config_path)?;
        let config: AppConfig = toml::from_str(&config_toml)?;

        let keys_path = Self::keys_path_for(&sapient_dir, &config);
        if !keys_path.exists() {
            return Err(StateError::MissingFile(format!("{}/", KEYS_DIR_NAME)));
        }

        Ok(Self {
            sapient_dir,
            keys_path,
            config_path,
            config,
        })
    }

    fn keys_path_for(sapient_dir: &Path, config: &AppConfig) -> PathBuf {
        config
            .keys_dir
            .clone()
            .unwrap_or_else(|| sapient_dir.join(KEYS_DIR_NAME))
    }

    /// Path of the key file for a key name
    pub fn key_path(&self, name: &str) -> PathBuf {
        self.keys_path.join(format!("{}.{}", name, KEY_FILE_EXTENSION))
    }

    /// Write a key as PEM under `name`, refusing to overwrite unless `force`
    pub fn save_key(
        &self,
        name: &str,
        key: &CryptographyKey,
        force: bool,
    ) -> Result<PathBuf, StateError> {
        if name.is_empty() || name.contains(['/', '\\']) {
            return Err(StateError::InvalidKeyName(name.to_string()));
        }
        let path = self.key_path(name);
        if path.exists() && !force {
            return Err(StateError::KeyExists(path));
        }
        fs::write(&path, key.to_pem())?;
        tracing::debug!(name, kind = %key.kind(), "saved key");
        Ok(path)
    }

    /// Load a named key from the keys directory
    pub fn load_key(&self, name: &str) -> Result<CryptographyKey, StateError> {
        let path = self.key_path(name);
        if !path.exists() {
            return Err(StateError::KeyNotFound(name.to_string()));
        }
        read_key_file(&path)
    }
}

/// Parse a PEM key file
pub fn read_key_file(path: &Path) -> Result<CryptographyKey, StateError> {
    let pem = fs::read_to_string(path)?;
    CryptographyKey::from_pem(&pem).map_err(|e| StateError::InvalidKey(e.to_string()))
}

/// Resolve a `--key` argument: an existing file path, or the name of a key
/// in the state directory
pub fn resolve_key(
    config_path: Option<PathBuf>,
    key: &str,
) -> Result<CryptographyKey, StateError> {
    let path = Path::new(key);
    if path.is_file() {
        return read_key_file(path);
    }
    AppState::load(config_path)?.load_key(key)
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("sapient directory not initialized. Run 'sapient init' first")]
    NotInitialized,

    #[error("sapient directory already initialized")]
    AlreadyInitialized,

    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("missing required file: {0}")]
    MissingFile(String),

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("invalid key name: {0:?}")]
    InvalidKeyName(String),

    #[error("key not found: {0}")]
    KeyNotFound(String),

    #[error("key file already exists: {}", .0.display())]
    KeyExists(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}
