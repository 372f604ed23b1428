//! Reusable field predicates.

use super::Predicate;
use crate::core::{FieldError, FieldResult, Value};
use lru::LruCache;
use regex::Regex;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

lazy_static::lazy_static! {
    static ref PATTERN_CACHE: Mutex<LruCache<String, Arc<Regex>>> =
        Mutex::new(LruCache::new(NonZeroUsize::new(64).unwrap()));
}

/// Text view of a value for substring rules; `NULL` has none
fn as_text(value: &Value) -> Option<std::borrow::Cow<'_, str>> {
    match value {
        Value::Null => None,
        Value::Text(s) => Some(std::borrow::Cow::Borrowed(s.as_str())),
        other => Some(std::borrow::Cow::Owned(other.to_string())),
    }
}

/// Accepts only non-empty text values
pub fn non_empty_text() -> impl Fn(&Value) -> bool + Send + Sync + 'static {
    |value: &Value| matches!(value, Value::Text(s) if !s.is_empty())
}

/// Accepts any value whose text form contains every needle
pub fn contains_all(needles: &'static [&'static str]) -> impl Fn(&Value) -> bool + Send + Sync + 'static {
    move |value: &Value| {
        as_text(value).is_some_and(|text| needles.iter().all(|n| text.contains(n)))
    }
}

/// Accepts text of at most `max` characters
pub fn max_chars(max: usize) -> impl Fn(&Value) -> bool + Send + Sync + 'static {
    move |value: &Value| value.as_str().is_some_and(|s| s.chars().count() <= max)
}

/// Accepts text fully matched by `pattern`.
///
/// The pattern is anchored on both ends. Compiled patterns are shared through
/// a process-wide LRU so declaring the same rule on many types compiles once.
pub fn matches_pattern(pattern: &str) -> FieldResult<impl Fn(&Value) -> bool + Send + Sync + 'static> {
    let regex = compiled(pattern)?;
    Ok(move |value: &Value| value.as_str().is_some_and(|s| regex.is_match(s)))
}

/// Accepts a value only when every predicate does
pub fn all_of(predicates: Vec<Predicate>) -> impl Fn(&Value) -> bool + Send + Sync + 'static {
    move |value: &Value| predicates.iter().all(|p| p(value))
}

fn compiled(pattern: &str) -> FieldResult<Arc<Regex>> {
    // A poisoned cache still holds valid compiled regexes
    {
        let mut cache = PATTERN_CACHE.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(regex) = cache.get(pattern) {
            return Ok(Arc::clone(regex));
        }
    }

    let anchored = format!("^(?:{})$", pattern);
    let regex = Arc::new(Regex::new(&anchored).map_err(|e| FieldError::InvalidPattern(e.to_string()))?);

    let mut cache = PATTERN_CACHE.lock().unwrap_or_else(|e| e.into_inner());
    cache.put(pattern.to_string(), Arc::clone(&regex));

    Ok(regex)
}
