//! PolicyBriefly Core — error types and runtime configuration.

pub mod config;
pub mod error;

pub use config::{BrieflyConfig, ProviderKind};
pub use error::{Error, ExtractionError, Result};
