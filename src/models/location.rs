//! Location captured at login.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Location {
    pub state: String,
    pub city: String,
}

impl Location {
    pub fn new(state: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            city: city.into(),
        }
    }

    /// Location assumed when the onboarding stash was lost.
    pub fn fallback() -> Self {
        Self::new("CA", "San Francisco")
    }
}
