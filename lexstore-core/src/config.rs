//! Startup configuration.
//!
//! All values are read once, through a lookup function, so the process environment
//! and tests feed the same code path. A missing required value is a
//! [`DocumentStoreError::Configuration`] error and is meant to abort startup.

use std::collections::HashMap;

use crate::{
    error::{DocumentStoreError, DocumentStoreResult},
    schema::Schema,
};

/// Endpoint used when `ENDPOINT` is not set.
pub const DEFAULT_ENDPOINT: &str = "https://cloud.appwrite.io/v1";

pub const ENDPOINT_VAR: &str = "ENDPOINT";
pub const PROJECT_ID_VAR: &str = "PROJECT_ID";
pub const API_KEY_VAR: &str = "PROJECT_API";
pub const DATABASE_ID_VAR: &str = "DATABASE_ID";

/// Connection settings of the hosted backend.
#[derive(Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub endpoint: String,
    pub project_id: String,
    pub api_key: String,
    pub database_id: String,
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("endpoint", &self.endpoint)
            .field("project_id", &self.project_id)
            .field("api_key", &"<redacted>")
            .field("database_id", &self.database_id)
            .finish()
    }
}

impl BackendConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> DocumentStoreResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`. Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> DocumentStoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            endpoint: non_empty(&lookup, ENDPOINT_VAR)
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            project_id: required(&lookup, PROJECT_ID_VAR)?,
            api_key: required(&lookup, API_KEY_VAR)?,
            database_id: required(&lookup, DATABASE_ID_VAR)?,
        })
    }
}

/// Maps schema names to the backend collection ids that hold them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionIds {
    ids: HashMap<String, String>,
}

impl CollectionIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the collection id of a schema.
    pub fn with(mut self, schema: &str, collection_id: impl Into<String>) -> Self {
        self.insert(schema, collection_id);
        self
    }

    pub fn insert(&mut self, schema: &str, collection_id: impl Into<String>) {
        self.ids.insert(schema.to_string(), collection_id.into());
    }

    /// Reads one collection id per schema, using `var_name` to derive each variable.
    ///
    /// Every schema's variable is required; all missing variables are reported in a
    /// single error.
    pub fn from_lookup<F, N>(schemas: &[&Schema], var_name: N, lookup: F) -> DocumentStoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
        N: Fn(&Schema) -> String,
    {
        let mut ids = Self::new();
        let mut missing = Vec::new();

        for schema in schemas {
            let var = var_name(schema);

            match non_empty(&lookup, &var) {
                Some(id) => ids.insert(schema.name, id),
                None => missing.push(var),
            }
        }

        if !missing.is_empty() {
            return Err(DocumentStoreError::Configuration(format!(
                "missing collection id variable(s): {}",
                missing.join(", ")
            )));
        }

        Ok(ids)
    }

    /// Returns the collection id of `schema`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::Configuration`] if no id is configured for it.
    pub fn resolve(&self, schema: &str) -> DocumentStoreResult<&str> {
        self.ids
            .get(schema)
            .map(String::as_str)
            .ok_or_else(|| {
                DocumentStoreError::Configuration(format!("no collection id configured for {schema}"))
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.ids.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<(String, String)> for CollectionIds {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self { ids: iter.into_iter().collect() }
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required<F>(lookup: &F, key: &str) -> DocumentStoreResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup, key)
        .ok_or_else(|| DocumentStoreError::Configuration(format!("{key} is not set")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldDefinition;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        move |key| map.get(key).cloned()
    }

    #[test]
    fn endpoint_falls_back_to_cloud() {
        let config = BackendConfig::from_lookup(env(&[
            ("PROJECT_ID", "proj"),
            ("PROJECT_API", "secret"),
            ("DATABASE_ID", "db"),
        ]))
        .unwrap();

        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.database_id, "db");
        assert!(!format!("{config:?}").contains("secret"));
    }

    #[test]
    fn missing_or_blank_values_are_configuration_errors() {
        let err = BackendConfig::from_lookup(env(&[
            ("PROJECT_ID", "proj"),
            ("PROJECT_API", "  "),
            ("DATABASE_ID", "db"),
        ]))
        .unwrap_err();

        match err {
            DocumentStoreError::Configuration(msg) => assert!(msg.contains("PROJECT_API")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn collection_ids_report_every_missing_variable() {
        static A: Schema = Schema::new("Alpha", &[FieldDefinition::string("x")]);
        static B: Schema = Schema::new("Beta", &[FieldDefinition::string("x")]);
        let var = |s: &Schema| format!("{}_ID", s.name.to_uppercase());

        let ids = CollectionIds::from_lookup(&[&A, &B], var, env(&[("ALPHA_ID", "a1"), ("BETA_ID", "b1")]))
            .unwrap();
        assert_eq!(ids.resolve("Alpha").unwrap(), "a1");
        assert_eq!(ids.len(), 2);

        let err = CollectionIds::from_lookup(&[&A, &B], var, env(&[])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: missing collection id variable(s): ALPHA_ID, BETA_ID"
        );
    }

    #[test]
    fn unresolved_schema_is_a_configuration_error() {
        let ids = CollectionIds::new().with("Case", "cases");
        assert_eq!(ids.resolve("Case").unwrap(), "cases");
        assert!(matches!(ids.resolve("Reminder"), Err(DocumentStoreError::Configuration(_))));
    }
}
