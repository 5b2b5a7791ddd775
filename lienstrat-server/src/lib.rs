//! HTTP surface of the Tax Lien Strategist AI gateway.

pub mod config;
pub mod error;
pub mod logging;
pub mod routes;
pub mod schemas;
pub mod state;

pub use config::{ConfigError, LogFormat, Settings};
pub use error::{ApiError, ValidationIssue};
pub use routes::router;
pub use state::AppState;
