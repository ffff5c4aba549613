//! The legal-services data model: ten collections, their schemas and records.
//!
//! Collection ids are not fixed in code. Each schema's id is read from the variable
//! `NEXT_PUBLIC_<NAME>_ID`, where `<NAME>` is the uppercased schema name
//! (`NEXT_PUBLIC_LAWYERPROFILE_ID`, `NEXT_PUBLIC_DRAFTEDDOCUMENTS_ID`, ...).

mod records;
mod schemas;

pub use records::{
    Announcements, Appointment, AssistantProfile, Case, Document, DraftedDocuments, Feedback,
    LawyerProfile, Reminder, Subscription,
};
pub use schemas::{
    ALL_SCHEMAS, ANNOUNCEMENTS, APPOINTMENT, ASSISTANT_PROFILE, CASE, DOCUMENT, DRAFTED_DOCUMENTS,
    FEEDBACK, LAWYER_PROFILE, REMINDER, SUBSCRIPTION,
};

use lexstore_core::{config::CollectionIds, error::DocumentStoreResult, schema::Schema};

/// Name of the variable holding the collection id of `schema`.
pub fn collection_id_var(schema: &Schema) -> String {
    format!("NEXT_PUBLIC_{}_ID", schema.name.to_uppercase())
}

/// Reads the collection ids of every legal-services schema through `lookup`.
pub fn collection_ids_from_lookup<F>(lookup: F) -> DocumentStoreResult<CollectionIds>
where
    F: Fn(&str) -> Option<String>,
{
    CollectionIds::from_lookup(&ALL_SCHEMAS, collection_id_var, lookup)
}

/// Reads the collection ids of every legal-services schema from the environment.
pub fn collection_ids_from_env() -> DocumentStoreResult<CollectionIds> {
    collection_ids_from_lookup(|key| std::env::var(key).ok())
}

/// Connects to Appwrite using `ENDPOINT`, `PROJECT_ID`, `PROJECT_API`, `DATABASE_ID`
/// and the per-schema collection id variables.
#[cfg(feature = "appwrite")]
pub async fn store_from_env()
-> DocumentStoreResult<lexstore_core::store::DocumentStore<lexstore_appwrite::AppwriteBackend>> {
    use lexstore_core::{backend::BackendBuilder, config::BackendConfig, store::DocumentStore};

    let config = BackendConfig::from_env()?;
    let collections = collection_ids_from_env()?;
    let backend = lexstore_appwrite::AppwriteBackendBuilder::from_config(&config)
        .build()
        .await?;

    Ok(DocumentStore::new(backend, collections))
}
