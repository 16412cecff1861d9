//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Signer, network client, fetchers produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters via the metrics facade)
//! ```
//!
//! # Design Decisions
//! - Structured fields on every event, never interpolated secrets
//! - Metrics go through the facade; installing a recorder is up to the embedder

pub mod logging;
pub mod metrics;
