//! Validated fields
//!
//! A [`ValidatedField`] is declared once per (entity type, field name) and
//! guards every write to that field on every instance of the type. The value
//! itself lives in the instance's own [`FieldStore`]; the field only holds
//! the predicate and the name it was bound to.
//!
//! ```
//! use fieldguard::field::{FieldStore, Validated, ValidatedField};
//! use fieldguard::Value;
//!
//! #[derive(Default)]
//! struct Account {
//!     fields: FieldStore,
//! }
//!
//! impl Validated for Account {
//!     fn field_store(&self) -> &FieldStore { &self.fields }
//!     fn field_store_mut(&mut self) -> &mut FieldStore { &mut self.fields }
//! }
//!
//! let mut handle = ValidatedField::new(|v: &Value| v.as_str().is_some());
//! handle.bind("Account", "handle").unwrap();
//!
//! let mut account = Account::default();
//! assert!(handle.read(&account).is_none());
//! handle.write(&mut account, Value::from("neo")).unwrap();
//! assert_eq!(handle.read(&account), Some(&Value::from("neo")));
//! assert!(handle.write(&mut account, Value::Integer(1)).is_err());
//! ```

pub mod registry;
pub mod rules;

pub use registry::FieldRegistry;

use crate::core::{FieldError, FieldResult, Value};
use std::collections::HashMap;
use std::fmt;

/// Acceptance test for a field. Must be pure.
pub type Predicate = Box<dyn Fn(&Value) -> bool + Send + Sync>;

/// Per-instance storage of last-validated field values.
///
/// Entries are only ever inserted by [`ValidatedField::write`] after the
/// predicate accepted the value, so everything in here passed validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldStore {
    values: HashMap<String, Value>,
}

impl FieldStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Names of every field that currently holds a value, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.values.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn insert(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }
}

/// Implemented by entities whose attributes are guarded by validated fields.
pub trait Validated {
    fn field_store(&self) -> &FieldStore;

    fn field_store_mut(&mut self) -> &mut FieldStore;
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Binding {
    owner: String,
    name: String,
}

/// Named attribute controller that validates on write.
pub struct ValidatedField {
    predicate: Predicate,
    binding: Option<Binding>,
}

impl ValidatedField {
    /// Creates an unbound field guarded by `predicate`
    pub fn new<P>(predicate: P) -> Self
    where
        P: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Box::new(predicate),
            binding: None,
        }
    }

    /// Binds the field to its name on the owning type.
    ///
    /// Binding again under the same name is a no-op; a field cannot be
    /// shared between two different names.
    pub fn bind(&mut self, owner_type: &str, name: &str) -> FieldResult<()> {
        match &self.binding {
            Some(binding) if binding.name == name => Ok(()),
            Some(binding) => Err(FieldError::AlreadyBound {
                bound: binding.name.clone(),
                requested: name.to_string(),
            }),
            None => {
                self.binding = Some(Binding {
                    owner: owner_type.to_string(),
                    name: name.to_string(),
                });
                Ok(())
            }
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.binding.as_ref().map(|b| b.name.as_str())
    }

    pub fn owner(&self) -> Option<&str> {
        self.binding.as_ref().map(|b| b.owner.as_str())
    }

    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    /// Evaluates the predicate without touching any instance
    pub fn check(&self, candidate: &Value) -> bool {
        (self.predicate)(candidate)
    }

    /// Returns the stored value, or `None` if nothing was ever accepted
    pub fn read<'a, E>(&self, instance: &'a E) -> Option<&'a Value>
    where
        E: Validated + ?Sized,
    {
        let name = self.name()?;
        instance.field_store().get(name)
    }

    /// Validates `candidate` and stores it on `instance`.
    ///
    /// A rejected value leaves the instance exactly as it was.
    pub fn write<E>(&self, instance: &mut E, candidate: Value) -> FieldResult<()>
    where
        E: Validated + ?Sized,
    {
        let name = self.name().ok_or(FieldError::Unbound)?;

        if !self.check(&candidate) {
            return Err(FieldError::Validation {
                field: name.to_string(),
                value: candidate,
            });
        }

        instance.field_store_mut().insert(name, candidate);
        Ok(())
    }
}

impl fmt::Debug for ValidatedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedField")
            .field("owner", &self.owner())
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}
