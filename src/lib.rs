//! HobbyHive discovery and session core.
//!
//! Member search across name and hobby matches, the session state machine
//! that gates views on login and onboarding, and a persistence gateway over
//! a key-value store (SQLite or in-memory).

pub mod advice;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod persistence;
pub mod search;
pub mod session;
pub mod telemetry;

pub use config::Config;
pub use errors::AppError;
pub use persistence::PersistenceGateway;
pub use search::{search, DirectoryIndex, SearchResult};
pub use session::{OnboardingDefaults, Session, SessionController, SessionState, View};

use db::SqliteStore;

/// Open the SQLite store from `config` and start the process session.
pub async fn open_session(config: &Config) -> Result<SessionController<SqliteStore>, AppError> {
    tracing::info!("Database path: {:?}", config.db_path);
    let pool = db::init_database(&config.db_path).await?;
    let gateway = PersistenceGateway::from_config(SqliteStore::new(pool), config);

    let controller =
        SessionController::start(gateway, OnboardingDefaults::from_config(config)).await;
    tracing::info!("Session started in {}", controller.session().state().name());

    Ok(controller)
}

#[cfg(test)]
mod fixtures;
