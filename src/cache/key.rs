use crate::core::{CacheError, CacheResult, Value};
use std::hash::Hash;
use uuid::Uuid;

/// A value that can address an [`EphemeralCache`](super::EphemeralCache) entry.
///
/// Most key types are always usable. Types whose equality does not agree with
/// their hash for some values override [`validate_key`](Self::validate_key).
pub trait CacheKey: Hash + Eq + Clone {
    fn validate_key(&self) -> CacheResult<()> {
        Ok(())
    }
}

macro_rules! always_valid_key {
    ($($ty:ty),* $(,)?) => {
        $(impl CacheKey for $ty {})*
    };
}

always_valid_key!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
always_valid_key!(bool, char, String, &'static str, Uuid);

impl CacheKey for Value {
    fn validate_key(&self) -> CacheResult<()> {
        match self {
            Self::Null => Err(CacheError::InvalidKey(
                "NULL has no identity and cannot address an entry".into(),
            )),
            // Float equality is tolerance-based while the hash uses the bit
            // pattern, so equal floats may land in different buckets.
            Self::Float(f) => Err(CacheError::InvalidKey(format!(
                "FLOAT value {} cannot be used as a lookup key",
                f
            ))),
            _ => Ok(()),
        }
    }
}
