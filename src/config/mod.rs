//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! settings file (TOML, optional)      ETHEREUM_PRIVATE_KEY
//!     → loader.rs (parse & deserialize)      │
//!     → validation.rs (semantic checks)       │
//!     → AppConfig (validated, immutable) ◀────┘
//!     → passed by reference to every component
//! ```
//!
//! # Design Decisions
//! - Config is built once at process start; nothing else reads the environment
//! - All settings fields have defaults to allow running without a file
//! - Secrets never live in the settings file and are redacted in Debug output

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, AppConfig, ConfigError, Credentials, PRIVATE_KEY_ENV_VAR};
pub use schema::{
    JupiterConfig, NetworkConfig, ObservabilityConfig, SessionConfig, SignerConfig,
    SigningConfig, SolanaConfig,
};
