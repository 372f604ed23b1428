// ============================================================================
// fieldguard Library
// ============================================================================

pub mod core;
pub mod field;
pub mod cache;
pub mod config;
pub mod profile;
pub mod prelude;

// Re-export main types for convenience
pub use crate::core::{CacheError, Error, FieldError, Result, Value};
pub use field::{FieldRegistry, FieldStore, Validated, ValidatedField};
pub use cache::{CacheKey, EphemeralCache};
pub use config::DirectoryConfig;
pub use profile::{ProfileDirectory, ProfileId, ProfileSnapshot, SharedProfile, UserProfile};
