//! Data models for the HobbyHive core.
//!
//! Field names serialize in camelCase to stay compatible with records written by the client.

mod location;
mod member;
mod profile;

pub use location::*;
pub use member::*;
pub use profile::*;
