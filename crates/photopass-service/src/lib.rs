//! Photopass Service - async orchestration around the core engine
//!
//! Wraps [`photopass_core`] with the pieces that need I/O: the oracle client
//! and its HTTP transport, inline image payloads, edit sessions, the
//! upstream [`PhotoService`], configuration and logging setup.

pub mod config;
pub mod error;
pub mod logging;
pub mod oracle;
pub mod payload;
mod render;
pub mod service;
pub mod session;

pub use config::{OracleConfig, OutputConfig, ServiceConfig};
pub use error::{Result, ServiceError};
pub use oracle::{HttpOracle, Oracle, OracleClient, OracleError, OracleResult, RuleResult};
pub use payload::{InlineImage, PayloadError};
pub use service::{GeneratedPhotos, PhotoService};
pub use session::{EditSession, SessionOutput};
