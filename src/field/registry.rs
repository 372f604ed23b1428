use super::{Predicate, Validated, ValidatedField};
use crate::core::{FieldError, FieldResult, Value};

/// Type-level table of the validated fields declared by one entity type.
///
/// Declaring a field binds it to its name, so the registry is the single
/// place where field names are decided.
#[derive(Debug)]
pub struct FieldRegistry {
    owner: String,
    fields: Vec<ValidatedField>,
}

impl FieldRegistry {
    pub fn new(owner_type: impl Into<String>) -> Self {
        Self {
            owner: owner_type.into(),
            fields: Vec::new(),
        }
    }

    /// Declares a new field guarded by `predicate`
    pub fn declare<P>(&mut self, name: &str, predicate: P) -> FieldResult<&ValidatedField>
    where
        P: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.attach(name, ValidatedField::new(predicate))
    }

    /// Declares a field from an already boxed predicate
    pub fn declare_boxed(&mut self, name: &str, predicate: Predicate) -> FieldResult<&ValidatedField> {
        self.attach(
            name,
            ValidatedField {
                predicate,
                binding: None,
            },
        )
    }

    /// Attaches a prebuilt field, binding it to `name`
    pub fn attach(&mut self, name: &str, mut field: ValidatedField) -> FieldResult<&ValidatedField> {
        if self.position(name).is_some() {
            return Err(FieldError::DuplicateField {
                owner: self.owner.clone(),
                field: name.to_string(),
            });
        }

        field.bind(&self.owner, name)?;
        self.fields.push(field);

        let idx = self.fields.len() - 1;
        Ok(&self.fields[idx])
    }

    /// Consuming variant of [`declare`](Self::declare) for building statics
    pub fn with_field<P>(mut self, name: &str, predicate: P) -> FieldResult<Self>
    where
        P: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.declare(name, predicate)?;
        Ok(self)
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn field(&self, name: &str) -> FieldResult<&ValidatedField> {
        self.position(name)
            .map(|idx| &self.fields[idx])
            .ok_or_else(|| FieldError::UnknownField {
                owner: self.owner.clone(),
                field: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Declared field names, in declaration order
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().filter_map(ValidatedField::name).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn read<'a, E>(&self, instance: &'a E, name: &str) -> FieldResult<Option<&'a Value>>
    where
        E: Validated + ?Sized,
    {
        Ok(self.field(name)?.read(instance))
    }

    pub fn write<E>(&self, instance: &mut E, name: &str, candidate: Value) -> FieldResult<()>
    where
        E: Validated + ?Sized,
    {
        self.field(name)?.write(instance, candidate)
    }

    /// Re-runs every declared predicate against the instance's stored values.
    ///
    /// Unset fields are skipped. Returns the first failure in declaration order.
    pub fn validate_all<E>(&self, instance: &E) -> FieldResult<()>
    where
        E: Validated + ?Sized,
    {
        for field in &self.fields {
            if let Some(value) = field.read(instance) {
                if !field.check(value) {
                    return Err(FieldError::Validation {
                        field: field.name().unwrap_or_default().to_string(),
                        value: value.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name() == Some(name))
    }
}
