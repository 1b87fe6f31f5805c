pub mod config;
pub mod engine;
pub mod error;
pub mod profiles;

// Re-export commonly used types for convenience.
pub use config::{AppConfig, WorkspacePaths};
pub use engine::UserProfileEngine;
pub use error::{ProfileError, Result};
pub use profiles::{Parameters, PasswordDigest, Profile, ProfileStore};
