//! Provisioning of backend collections and attributes from static schemas.
//!
//! [`Provisioner::provision`] walks the schemas in order and, for each one, makes sure
//! the backend holds a collection with that name and one attribute per field. It is
//! idempotent: collections are matched by name and attributes by key, and anything
//! that already exists is skipped. An existing attribute whose type or size disagrees
//! with its definition is reported as a conflict and left alone.
//!
//! Provisioning never stops early. Every failure is logged, recorded in the
//! [`ProvisionReport`], and the next step is attempted.
//!
//! # Example
//!
//! ```ignore
//! let report = Provisioner::new(&backend).provision(&[&LAWYER_PROFILE, &CASE]).await;
//!
//! for (schema, id) in report.collection_ids().iter() {
//!     println!("{schema} -> {id}");
//! }
//!
//! report.into_result()?;
//! ```

use serde_json::Value;
use std::collections::HashMap;

use crate::{
    backend::{AttributeInfo, AttributeKind, CollectionInfo, DocumentBackend, NumericAttribute, StringAttribute},
    codec::{EMPTY_ARRAY, encode_array},
    config::CollectionIds,
    document::DocumentId,
    error::{DocumentStoreError, DocumentStoreResult},
    schema::{DefaultValue, FieldDefinition, PrimitiveType, Schema},
};

/// What happened to one field during provisioning.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeOutcome {
    Created,
    /// The attribute already existed with a matching type.
    Existing,
    /// The attribute exists but disagrees with its definition.
    Conflict(String),
    Failed(String),
}

/// Provisioning result of one schema.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaReport {
    pub schema: &'static str,
    /// The collection holding the schema, when it could be found or created.
    pub collection_id: Option<String>,
    pub collection_created: bool,
    pub attributes: Vec<(&'static str, AttributeOutcome)>,
    /// Set when the schema could not be processed at all.
    pub error: Option<String>,
}

impl SchemaReport {
    fn new(schema: &'static str) -> Self {
        Self {
            schema,
            collection_id: None,
            collection_created: false,
            attributes: Vec::new(),
            error: None,
        }
    }

    fn failed(schema: &'static str, error: String) -> Self {
        Self { error: Some(error), ..Self::new(schema) }
    }

    /// Describes every failure and conflict of this schema.
    pub fn failures(&self) -> Vec<String> {
        let mut failures: Vec<String> = self
            .error
            .iter()
            .map(|e| format!("{}: {e}", self.schema))
            .collect();

        failures.extend(self.attributes.iter().filter_map(|(key, outcome)| match outcome {
            AttributeOutcome::Conflict(msg) => Some(format!("{}.{key}: conflict: {msg}", self.schema)),
            AttributeOutcome::Failed(msg) => Some(format!("{}.{key}: {msg}", self.schema)),
            AttributeOutcome::Created | AttributeOutcome::Existing => None,
        }));

        failures
    }

    pub fn created_attributes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.attributes
            .iter()
            .filter(|(_, outcome)| *outcome == AttributeOutcome::Created)
            .map(|(key, _)| *key)
    }
}

/// Result of a provisioning run, one entry per schema in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProvisionReport {
    pub schemas: Vec<SchemaReport>,
}

impl ProvisionReport {
    /// All failures and conflicts, in the order they occurred.
    pub fn failures(&self) -> Vec<String> {
        self.schemas.iter().flat_map(SchemaReport::failures).collect()
    }

    pub fn is_success(&self) -> bool {
        self.schemas.iter().all(|s| s.failures().is_empty())
    }

    pub fn schema(&self, name: &str) -> Option<&SchemaReport> {
        self.schemas.iter().find(|s| s.schema == name)
    }

    /// Collection ids of every schema whose collection was found or created.
    pub fn collection_ids(&self) -> CollectionIds {
        self.schemas
            .iter()
            .filter_map(|s| s.collection_id.clone().map(|id| (s.schema.to_string(), id)))
            .collect()
    }

    /// Turns collected failures into a single [`DocumentStoreError::Provisioning`].
    pub fn into_result(self) -> DocumentStoreResult<Self> {
        let failures = self.failures();

        if failures.is_empty() {
            Ok(self)
        } else {
            Err(DocumentStoreError::Provisioning(failures))
        }
    }
}

/// Backend request for one field.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeRequest {
    String(StringAttribute),
    Integer(NumericAttribute),
    Float(NumericAttribute),
}

impl AttributeRequest {
    /// Maps a field definition to the attribute that stores it.
    ///
    /// Arrays become string attributes of [`ARRAY_CAPACITY`](crate::schema::ARRAY_CAPACITY)
    /// defaulting to `"[]"`. Defaults are only attached to optional attributes, since the
    /// backend refuses defaults on required ones.
    pub fn for_field(def: &FieldDefinition) -> DocumentStoreResult<Self> {
        let key = def.name.to_string();
        let capacity = def.capacity().unwrap_or_default();

        match def.primitive_type {
            PrimitiveType::String => Ok(AttributeRequest::String(StringAttribute {
                key,
                size: capacity,
                required: def.required,
                default: optional_default(def, string_default(def)?),
            })),
            PrimitiveType::ArrayOfString => {
                let default = match def.default {
                    Some(DefaultValue::Array(items)) => encode_array(items)?,
                    Some(other) => return Err(mismatched_default(def, &other)),
                    None => EMPTY_ARRAY.to_string(),
                };

                Ok(AttributeRequest::String(StringAttribute {
                    key,
                    size: capacity,
                    required: def.required,
                    default: optional_default(def, Some(default)),
                }))
            }
            PrimitiveType::Integer | PrimitiveType::Float => {
                let default: Option<Value> = match (def.primitive_type, def.default) {
                    (_, None) => None,
                    (PrimitiveType::Integer, Some(DefaultValue::Integer(i))) => Some(i.into()),
                    (PrimitiveType::Float, Some(DefaultValue::Float(f))) => Some(f.into()),
                    (PrimitiveType::Float, Some(DefaultValue::Integer(i))) => Some((i as f64).into()),
                    (_, Some(other)) => return Err(mismatched_default(def, &other)),
                };

                let attribute = NumericAttribute {
                    key,
                    required: def.required,
                    min: def.min.map(|b| b.to_json()),
                    max: def.max.map(|b| b.to_json()),
                    default: optional_default(def, default),
                };

                Ok(match def.primitive_type {
                    PrimitiveType::Integer => AttributeRequest::Integer(attribute),
                    _ => AttributeRequest::Float(attribute),
                })
            }
        }
    }
}

fn string_default(def: &FieldDefinition) -> DocumentStoreResult<Option<String>> {
    match def.default {
        None => Ok(None),
        Some(DefaultValue::String(s)) => Ok(Some(s.to_string())),
        Some(other) => Err(mismatched_default(def, &other)),
    }
}

fn optional_default<T>(def: &FieldDefinition, default: Option<T>) -> Option<T> {
    if def.required { None } else { default }
}

fn mismatched_default(def: &FieldDefinition, default: &DefaultValue) -> DocumentStoreError {
    DocumentStoreError::InvalidDocument(format!(
        "default {default:?} of field {} does not match type {}",
        def.name, def.primitive_type
    ))
}

/// Compares an existing attribute against its definition.
fn conflict(def: &FieldDefinition, existing: &AttributeInfo) -> Option<String> {
    let expected = match def.primitive_type {
        PrimitiveType::String | PrimitiveType::ArrayOfString => AttributeKind::String,
        PrimitiveType::Integer => AttributeKind::Integer,
        PrimitiveType::Float => AttributeKind::Float,
    };

    if existing.kind != expected {
        return Some(format!(
            "expected {expected:?} attribute, backend has {:?}",
            existing.kind
        ));
    }

    match (def.capacity(), existing.size) {
        (Some(capacity), Some(size)) if capacity != size => Some(format!(
            "expected size {capacity}, backend has {size}"
        )),
        _ => None,
    }
}

/// Ensures that backend collections and attributes match a list of schemas.
#[derive(Debug)]
pub struct Provisioner<'a, B: DocumentBackend> {
    backend: &'a B,
}

impl<'a, B: DocumentBackend> Provisioner<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Provisions every schema in order, collecting failures instead of stopping.
    pub async fn provision(&self, schemas: &[&'static Schema]) -> ProvisionReport {
        let existing = match self.backend.list_collections().await {
            Ok(collections) => collections,
            Err(err) => {
                tracing::error!(error = %err, "listing collections failed, nothing provisioned");

                return ProvisionReport {
                    schemas: schemas
                        .iter()
                        .map(|s| SchemaReport::failed(s.name, format!("collection lookup failed: {err}")))
                        .collect(),
                };
            }
        };

        let mut by_name: HashMap<String, CollectionInfo> = existing
            .into_iter()
            .map(|c| (c.name.clone(), c))
            .collect();

        let mut report = ProvisionReport::default();

        for &schema in schemas {
            let schema_report = self.provision_schema(schema, &mut by_name).await;

            for failure in schema_report.failures() {
                tracing::error!(schema = schema.name, "{failure}");
            }

            report.schemas.push(schema_report);
        }

        tracing::info!(
            schemas = report.schemas.len(),
            failures = report.failures().len(),
            "provisioning finished"
        );

        report
    }

    async fn provision_schema(
        &self,
        schema: &'static Schema,
        by_name: &mut HashMap<String, CollectionInfo>,
    ) -> SchemaReport {
        let duplicates = schema.duplicate_fields();
        if !duplicates.is_empty() {
            return SchemaReport::failed(
                schema.name,
                format!("duplicate field(s): {}", duplicates.join(", ")),
            );
        }

        let mut report = SchemaReport::new(schema.name);

        let collection = match by_name.get(schema.name) {
            Some(collection) => {
                tracing::info!(schema = schema.name, collection = %collection.id, "collection exists");
                collection.clone()
            }
            None => {
                let id = DocumentId::unique();

                match self.backend.create_collection(id.as_str(), schema.name).await {
                    Ok(collection) => {
                        tracing::info!(schema = schema.name, collection = %collection.id, "collection created");
                        report.collection_created = true;
                        by_name.insert(schema.name.to_string(), collection.clone());
                        collection
                    }
                    Err(err) => {
                        report.error = Some(format!("creating collection failed: {err}"));
                        return report;
                    }
                }
            }
        };

        report.collection_id = Some(collection.id.clone());

        let attributes: HashMap<String, AttributeInfo> = match self.backend.list_attributes(&collection.id).await {
            Ok(attributes) => attributes.into_iter().map(|a| (a.key.clone(), a)).collect(),
            Err(err) => {
                report.error = Some(format!("listing attributes failed: {err}"));
                return report;
            }
        };

        for def in schema.fields {
            let outcome = match attributes.get(def.name) {
                Some(existing) => match conflict(def, existing) {
                    Some(msg) => AttributeOutcome::Conflict(msg),
                    None => AttributeOutcome::Existing,
                },
                None => match self.create_attribute(&collection.id, def).await {
                    Ok(()) => {
                        tracing::info!(schema = schema.name, attribute = def.name, "attribute created");
                        AttributeOutcome::Created
                    }
                    Err(err) => AttributeOutcome::Failed(err.to_string()),
                },
            };

            report.attributes.push((def.name, outcome));
        }

        report
    }

    async fn create_attribute(&self, collection: &str, def: &FieldDefinition) -> DocumentStoreResult<()> {
        match AttributeRequest::for_field(def)? {
            AttributeRequest::String(attribute) => {
                self.backend
                    .create_string_attribute(collection, attribute)
                    .await
            }
            AttributeRequest::Integer(attribute) => {
                self.backend
                    .create_integer_attribute(collection, attribute)
                    .await
            }
            AttributeRequest::Float(attribute) => {
                self.backend
                    .create_float_attribute(collection, attribute)
                    .await
            }
        }
    }
}
