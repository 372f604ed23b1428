//! User profile entity
//!
//! `username` and `email` go through validated fields; `last_login` is a
//! plain attribute with no rule attached.

pub mod directory;

pub use directory::{ProfileDirectory, SharedProfile};

use crate::cache::CacheKey;
use crate::core::{FieldResult, Value};
use crate::field::{FieldRegistry, FieldStore, Validated, rules};
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use uuid::Uuid;

pub const USERNAME: &str = "username";
pub const EMAIL: &str = "email";

lazy_static! {
    static ref PROFILE_FIELDS: FieldRegistry = FieldRegistry::new("UserProfile")
        .with_field(USERNAME, rules::non_empty_text())
        .and_then(|r| r.with_field(EMAIL, rules::contains_all(&["@", "."])))
        .expect("UserProfile field names are distinct");
}

/// Identity token of a profile, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProfileId(Uuid);

impl ProfileId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ProfileId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ProfileId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl CacheKey for ProfileId {}

#[derive(Debug, PartialEq)]
pub struct UserProfile {
    id: ProfileId,
    fields: FieldStore,
    last_login: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// Creates a profile with every field unset
    pub fn new() -> Self {
        Self {
            id: ProfileId::new(),
            fields: FieldStore::new(),
            last_login: None,
        }
    }

    /// Creates a profile and sets both validated fields
    pub fn with_identity(username: &str, email: &str) -> FieldResult<Self> {
        let mut profile = Self::new();
        profile.set_username(username)?;
        profile.set_email(email)?;
        Ok(profile)
    }

    /// Field table shared by every profile
    pub fn field_registry() -> &'static FieldRegistry {
        &PROFILE_FIELDS
    }

    pub fn id(&self) -> ProfileId {
        self.id
    }

    pub fn username(&self) -> Option<&str> {
        self.get(USERNAME).and_then(Value::as_str)
    }

    pub fn set_username(&mut self, username: impl Into<Value>) -> FieldResult<()> {
        self.set(USERNAME, username)
    }

    pub fn email(&self) -> Option<&str> {
        self.get(EMAIL).and_then(Value::as_str)
    }

    pub fn set_email(&mut self, email: impl Into<Value>) -> FieldResult<()> {
        self.set(EMAIL, email)
    }

    /// Raw value of a validated field; `None` when unset or undeclared
    pub fn get(&self, field: &str) -> Option<&Value> {
        PROFILE_FIELDS.read(self, field).ok().flatten()
    }

    /// Writes a validated field by name
    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> FieldResult<()> {
        PROFILE_FIELDS.write(self, field, value.into())
    }

    pub fn last_login(&self) -> Option<DateTime<Utc>> {
        self.last_login
    }

    pub fn set_last_login(&mut self, at: Option<DateTime<Utc>>) {
        self.last_login = at;
    }

    /// Records a login at the current time
    pub fn touch_login(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        self.last_login = Some(now);
        now
    }

    pub fn snapshot(&self) -> ProfileSnapshot {
        ProfileSnapshot {
            id: self.id,
            username: self.username().map(str::to_string),
            email: self.email().map(str::to_string),
            last_login: self.last_login,
        }
    }

    pub fn into_shared(self) -> SharedProfile {
        Rc::new(RefCell::new(self))
    }
}

// A clone is a separate object, so it gets its own identity token
impl Clone for UserProfile {
    fn clone(&self) -> Self {
        Self {
            id: ProfileId::new(),
            fields: self.fields.clone(),
            last_login: self.last_login,
        }
    }
}

impl Default for UserProfile {
    fn default() -> Self {
        Self::new()
    }
}

impl Validated for UserProfile {
    fn field_store(&self) -> &FieldStore {
        &self.fields
    }

    fn field_store_mut(&mut self) -> &mut FieldStore {
        &mut self.fields
    }
}

/// Serializable view of a profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    pub id: ProfileId,
    pub username: Option<String>,
    pub email: Option<String>,
    pub last_login: Option<DateTime<Utc>>,
}
