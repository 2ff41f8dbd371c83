//! Error handling module for the HobbyHive core.
//!
//! Provides the centralized error type shared by the matching engine, the
//! session state machine and the persistence layer.

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
    pub const INVALID_TRANSITION: &str = "INVALID_TRANSITION";
    pub const PERSISTENCE_ERROR: &str = "PERSISTENCE_ERROR";
    pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";
    pub const COLLABORATOR_ERROR: &str = "COLLABORATOR_ERROR";
}

/// Application error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Caller passed an argument outside the operation's contract
    InvalidArgument(String),
    /// Event fired from a session state that does not permit it
    InvalidTransition {
        from: &'static str,
        event: &'static str,
    },
    /// Key-value store read or write failed
    Persistence(String),
    /// Persisted record could not be encoded or decoded
    Serialization(String),
    /// External collaborator (advice service) failed
    Collaborator(String),
}

impl AppError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidArgument(_) => codes::INVALID_ARGUMENT,
            AppError::InvalidTransition { .. } => codes::INVALID_TRANSITION,
            AppError::Persistence(_) => codes::PERSISTENCE_ERROR,
            AppError::Serialization(_) => codes::SERIALIZATION_ERROR,
            AppError::Collaborator(_) => codes::COLLABORATOR_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::InvalidArgument(msg) => msg.clone(),
            AppError::InvalidTransition { from, event } => {
                format!("{} is not permitted from {}", event, from)
            }
            AppError::Persistence(msg) => msg.clone(),
            AppError::Serialization(msg) => msg.clone(),
            AppError::Collaborator(msg) => msg.clone(),
        }
    }

    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, AppError::InvalidTransition { .. })
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {:?}", err);
        AppError::Persistence(format!("Database error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::debug!("JSON error: {:?}", err);
        AppError::Serialization(format!("JSON error: {}", err))
    }
}
