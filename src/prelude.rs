//! Recommended imports grouped by abstraction level.
//!
//! `core` is enough to declare validated entities and cache them.
//! `profile` adds the user profile entity and its directory.

pub mod core {
    //! Building blocks: validated fields, field registries and the weak cache.
    pub use crate::cache::{CacheKey, EphemeralCache};
    pub use crate::core::{CacheError, Error, FieldError, Result, Value};
    pub use crate::field::{FieldRegistry, FieldStore, Predicate, Validated, ValidatedField, rules};
}

pub mod profile {
    //! The user profile entity.
    pub use super::core::*;
    pub use crate::config::DirectoryConfig;
    pub use crate::profile::{
        ProfileDirectory, ProfileId, ProfileSnapshot, SharedProfile, UserProfile, EMAIL, USERNAME,
    };
}
