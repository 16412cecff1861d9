//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::SignerConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the account's hex-encoded private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "ETHEREUM_PRIVATE_KEY";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
    MissingEnv(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
            ConfigError::MissingEnv(name) => write!(f, "Environment variable {} not set", name),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Secrets supplied through the environment.
#[derive(Clone)]
pub struct Credentials {
    ethereum_private_key: String,
}

impl Credentials {
    /// Hex-encoded account private key (with or without `0x`).
    pub fn ethereum_private_key(&self) -> &str {
        &self.ethereum_private_key
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("ethereum_private_key", &"<redacted>")
            .finish()
    }
}

/// Fully resolved configuration, built once at startup and passed by reference.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub settings: SignerConfig,
    pub credentials: Credentials,
}

impl AppConfig {
    /// Assemble from already-read sources.
    ///
    /// Fails when the private key is absent or blank, or the settings are invalid.
    pub fn from_parts(
        settings: SignerConfig,
        private_key: Option<String>,
    ) -> Result<Self, ConfigError> {
        let private_key = private_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingEnv(PRIVATE_KEY_ENV_VAR))?;

        validate_config(&settings).map_err(ConfigError::Validation)?;

        Ok(Self {
            settings,
            credentials: Credentials {
                ethereum_private_key: private_key.trim().to_string(),
            },
        })
    }
}

/// Load and validate settings from a TOML file.
pub fn load_settings(path: &Path) -> Result<SignerConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: SignerConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Build the process configuration.
///
/// Reads the optional settings file and `ETHEREUM_PRIVATE_KEY`. This is the
/// only place the process environment is consulted.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let settings = match path {
        Some(path) => load_settings(path)?,
        None => SignerConfig::default(),
    };

    AppConfig::from_parts(settings, std::env::var(PRIVATE_KEY_ENV_VAR).ok())
}
