pub mod error;
pub mod value;

pub use error::{CacheError, CacheResult, Error, FieldError, FieldResult, Result};
pub use value::Value;
