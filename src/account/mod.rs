//! Account identity subsystem.
//!
//! # Data Flow
//! ```text
//! AppConfig (ETHEREUM_PRIVATE_KEY)
//!     → wallet.rs (alloy local signer)
//!     → auth.rs (sign-in message)
//!     → AuthSig handed to the signing network
//! ```
//!
//! # Security Constraints
//! - Never log private keys or sensitive data

pub mod auth;
pub mod wallet;

pub use auth::AuthMessage;
pub use wallet::AccountWallet;
