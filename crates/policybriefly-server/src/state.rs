//! Shared application state.

use policybriefly_core::{BrieflyConfig, Result};
use policybriefly_ingest::Loader;

use crate::pipeline::Pipeline;
use crate::session::SessionStore;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: BrieflyConfig,
    pub pipeline: Pipeline,
    pub loader: Loader,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: BrieflyConfig, pipeline: Pipeline) -> Self {
        let loader = Loader::new(config.max_upload_bytes);
        let sessions = SessionStore::new(config.max_sessions);
        Self {
            config,
            pipeline,
            loader,
            sessions,
        }
    }

    pub fn from_config(config: BrieflyConfig) -> Result<Self> {
        let pipeline = Pipeline::from_config(&config)?;
        Ok(Self::new(config, pipeline))
    }
}
