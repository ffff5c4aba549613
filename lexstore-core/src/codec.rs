//! Array field encoding at the adapter boundary.
//!
//! The backend only knows string attributes, so `arrayOfString` fields travel as a
//! JSON text value (`["a","b"]`). [`FieldCodec`] converts between the application
//! form (a JSON array of strings) and the wire form, keyed by the schema's field
//! types. Fields that the schema does not describe pass through untouched.

use serde_json::{Map, Value};

use crate::{
    error::{DocumentStoreError, DocumentStoreResult},
    schema::{FieldDefinition, Schema},
};

/// Text of an empty array, also the provisioned default of array attributes.
pub const EMPTY_ARRAY: &str = "[]";

/// Encodes a sequence of strings into its wire text.
pub fn encode_array<S: AsRef<str>>(items: &[S]) -> DocumentStoreResult<String> {
    Ok(serde_json::to_string(
        &items.iter().map(AsRef::as_ref).collect::<Vec<&str>>(),
    )?)
}

/// Decodes wire text back into a sequence of strings.
///
/// An empty string decodes to an empty sequence.
pub fn decode_array(text: &str) -> DocumentStoreResult<Vec<String>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    Ok(serde_json::from_str(text)?)
}

/// Schema-aware encoder/decoder for a document's field map.
#[derive(Debug, Clone, Copy)]
pub struct FieldCodec<'s> {
    schema: &'s Schema,
}

impl<'s> FieldCodec<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &'s Schema {
        self.schema
    }

    /// Converts application-form fields into wire form.
    ///
    /// Array fields must be a JSON array of strings, or text that already decodes as
    /// one. The encoded length is checked against the attribute capacity.
    pub fn encode(&self, fields: Map<String, Value>) -> DocumentStoreResult<Map<String, Value>> {
        fields
            .into_iter()
            .map(|(name, value)| match self.schema.field(&name) {
                Some(def) if def.is_array() => {
                    let encoded = encode_field(def, value)?;
                    Ok((name, encoded))
                }
                _ => Ok((name, value)),
            })
            .collect()
    }

    /// Converts wire-form fields back into application form.
    pub fn decode(&self, fields: Map<String, Value>) -> DocumentStoreResult<Map<String, Value>> {
        fields
            .into_iter()
            .map(|(name, value)| match self.schema.field(&name) {
                Some(def) if def.is_array() => {
                    let decoded = decode_field(def, value)?;
                    Ok((name, decoded))
                }
                _ => Ok((name, value)),
            })
            .collect()
    }
}

fn encode_field(def: &FieldDefinition, value: Value) -> DocumentStoreResult<Value> {
    let text = match value {
        Value::Null => return Ok(Value::Null),
        Value::Array(items) => {
            let items = items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    other => Err(DocumentStoreError::InvalidDocument(format!(
                        "field {} must contain only strings, found {other}",
                        def.name
                    ))),
                })
                .collect::<DocumentStoreResult<Vec<String>>>()?;

            encode_array(&items)?
        }
        // Already encoded by the caller; accept it only if it is a valid encoding.
        Value::String(text) => {
            decode_array(&text).map_err(|_| {
                DocumentStoreError::InvalidDocument(format!(
                    "field {} holds text that is not an encoded string array",
                    def.name
                ))
            })?;
            text
        }
        other => {
            return Err(DocumentStoreError::InvalidDocument(format!(
                "field {} must be an array of strings, found {other}",
                def.name
            )));
        }
    };

    let capacity = def.capacity().unwrap_or(usize::MAX);
    let length = text.chars().count();

    if length > capacity {
        return Err(DocumentStoreError::CapacityExceeded {
            field: def.name.to_string(),
            length,
            capacity,
        });
    }

    Ok(Value::String(text))
}

fn decode_field(def: &FieldDefinition, value: Value) -> DocumentStoreResult<Value> {
    match value {
        Value::String(text) => decode_array(&text)
            .map(Value::from)
            .map_err(|e| {
                DocumentStoreError::Serialization(format!(
                    "field {} does not hold an encoded string array: {e}",
                    def.name
                ))
            }),
        // An unset optional array reads as empty.
        Value::Null => Ok(Value::Array(Vec::new())),
        // Tolerate values the backend already returns decoded.
        other => Ok(other),
    }
}
