//! Partial updates bound to a record type.

use serde::Serialize;
use serde_json::{Map, Value};
use std::marker::PhantomData;

use crate::{
    document::Record,
    error::{DocumentStoreError, DocumentStoreResult},
};

/// A set of field assignments for one record type.
///
/// Field names are checked against `R`'s schema when they are set, so a patch can
/// only name attributes the collection actually has. Fields that are not set are
/// left untouched by the update.
///
/// ```ignore
/// let patch = Patch::<LawyerProfile>::new()
///     .set("phone", "9876543210")?
///     .set("languages", vec!["English", "Hindi"])?;
/// ```
#[derive(Debug, Clone)]
pub struct Patch<R: Record> {
    fields: Map<String, Value>,
    _marker: PhantomData<R>,
}

impl<R: Record> Patch<R> {
    pub fn new() -> Self {
        Self { fields: Map::new(), _marker: PhantomData }
    }

    /// Assigns a new value to `field`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::InvalidDocument`] if the schema has no such field,
    /// or a serialization error if `value` cannot be represented as JSON.
    pub fn set(mut self, field: &str, value: impl Serialize) -> DocumentStoreResult<Self> {
        if R::schema().field(field).is_none() {
            return Err(DocumentStoreError::InvalidDocument(format!(
                "{} has no field named {field}",
                R::schema().name
            )));
        }

        self.fields
            .insert(field.to_string(), serde_json::to_value(value)?);

        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }
}

impl<R: Record> Default for Patch<R> {
    fn default() -> Self {
        Self::new()
    }
}
