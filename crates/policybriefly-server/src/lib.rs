//! PolicyBriefly presentation layer: analysis pipeline, HTTP API and CLI.

pub mod cli;
pub mod error;
pub mod pipeline;
pub mod routes;
pub mod session;
pub mod state;

pub use error::ApiError;
pub use pipeline::Pipeline;
pub use routes::build_router;
pub use session::{Session, SessionStore};
pub use state::AppState;
