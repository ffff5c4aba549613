use async_trait::async_trait;
use serde_json::{Map, Value};

use lexstore::{
    backend::{AttributeInfo, CollectionInfo, NumericAttribute, StringAttribute},
    legal,
    memory::InMemoryBackend,
    prelude::*,
    provision::AttributeOutcome,
};

/// Delegates to an in-memory backend, failing the calls it is told to fail.
#[derive(Debug, Default)]
struct FlakyBackend {
    inner: InMemoryBackend,
    fail_listing: bool,
    fail_floats: bool,
}

fn refused() -> DocumentStoreError {
    DocumentStoreError::Backend {
        status: Some(500),
        kind: Some("general_server_error".into()),
        message: "Server Error".into(),
    }
}

#[async_trait]
impl DocumentBackend for FlakyBackend {
    async fn create_document(
        &self,
        collection: &str,
        id: &DocumentId,
        fields: Map<String, Value>,
    ) -> DocumentStoreResult<RawDocument> {
        self.inner.create_document(collection, id, fields).await
    }

    async fn get_document(&self, collection: &str, id: &DocumentId) -> DocumentStoreResult<RawDocument> {
        self.inner.get_document(collection, id).await
    }

    async fn update_document(
        &self,
        collection: &str,
        id: &DocumentId,
        fields: Map<String, Value>,
    ) -> DocumentStoreResult<RawDocument> {
        self.inner.update_document(collection, id, fields).await
    }

    async fn delete_document(&self, collection: &str, id: &DocumentId) -> DocumentStoreResult<()> {
        self.inner.delete_document(collection, id).await
    }

    async fn list_collections(&self) -> DocumentStoreResult<Vec<CollectionInfo>> {
        if self.fail_listing {
            return Err(refused());
        }
        self.inner.list_collections().await
    }

    async fn create_collection(&self, id: &str, name: &str) -> DocumentStoreResult<CollectionInfo> {
        self.inner.create_collection(id, name).await
    }

    async fn list_attributes(&self, collection: &str) -> DocumentStoreResult<Vec<AttributeInfo>> {
        self.inner.list_attributes(collection).await
    }

    async fn create_string_attribute(
        &self,
        collection: &str,
        attribute: StringAttribute,
    ) -> DocumentStoreResult<()> {
        self.inner.create_string_attribute(collection, attribute).await
    }

    async fn create_integer_attribute(
        &self,
        collection: &str,
        attribute: NumericAttribute,
    ) -> DocumentStoreResult<()> {
        self.inner.create_integer_attribute(collection, attribute).await
    }

    async fn create_float_attribute(
        &self,
        collection: &str,
        attribute: NumericAttribute,
    ) -> DocumentStoreResult<()> {
        if self.fail_floats {
            return Err(refused());
        }
        self.inner.create_float_attribute(collection, attribute).await
    }
}

#[tokio::test]
async fn failed_attributes_do_not_stop_the_rest() {
    let backend = FlakyBackend { fail_floats: true, ..Default::default() };

    let report = Provisioner::new(&backend)
        .provision(&[&legal::LAWYER_PROFILE, &legal::REMINDER])
        .await;

    let lawyer = report.schema("LawyerProfile").unwrap();
    let failed: Vec<_> = lawyer
        .attributes
        .iter()
        .filter(|(_, outcome)| matches!(outcome, AttributeOutcome::Failed(_)))
        .map(|(key, _)| *key)
        .collect();
    assert_eq!(failed, ["consultationFees", "rating"]);

    let created: Vec<_> = lawyer.created_attributes().collect();
    assert!(created.contains(&"reviews"));
    assert!(created.contains(&"profilePic"));
    assert_eq!(created.len(), legal::LAWYER_PROFILE.fields.len() - 2);

    assert!(report.schema("Reminder").unwrap().failures().is_empty());

    match report.into_result() {
        Err(DocumentStoreError::Provisioning(failures)) => assert_eq!(failures.len(), 2),
        other => panic!("expected provisioning failures, got {other:?}"),
    }
}

#[tokio::test]
async fn rerun_repairs_missing_attributes() {
    let mut backend = FlakyBackend { fail_floats: true, ..Default::default() };
    let first = Provisioner::new(&backend).provision(&[&legal::FEEDBACK]).await;
    assert!(!first.is_success());

    backend.fail_floats = false;
    let second = Provisioner::new(&backend).provision(&[&legal::FEEDBACK]).await;

    assert!(second.is_success(), "{:?}", second.failures());
    let feedback = second.schema("Feedback").unwrap();
    assert!(!feedback.collection_created);
    assert_eq!(feedback.created_attributes().collect::<Vec<_>>(), ["rating"]);
    assert_eq!(feedback.collection_id, first.schema("Feedback").unwrap().collection_id);
}

#[tokio::test]
async fn failed_collection_listing_creates_nothing() {
    let backend = FlakyBackend { fail_listing: true, ..Default::default() };

    let report = Provisioner::new(&backend).provision(&legal::ALL_SCHEMAS).await;

    assert_eq!(report.failures().len(), 10);
    assert!(report.schemas.iter().all(|s| s.collection_id.is_none()));
    assert!(backend.inner.list_collections().await.unwrap().is_empty());
}

#[tokio::test]
async fn existing_collections_are_matched_by_name() {
    let backend = InMemoryBackend::builder()
        .with_collection("reminders", "Reminder")
        .build()
        .await
        .unwrap();

    let report = Provisioner::new(&backend).provision(&[&legal::REMINDER]).await;

    let reminder = report.schema("Reminder").unwrap();
    assert!(!reminder.collection_created);
    assert_eq!(reminder.collection_id.as_deref(), Some("reminders"));
    assert_eq!(report.collection_ids().resolve("Reminder").unwrap(), "reminders");
}

#[tokio::test]
async fn mismatched_attributes_are_reported_as_conflicts() {
    let backend = InMemoryBackend::builder()
        .with_collection("reminders", "Reminder")
        .build()
        .await
        .unwrap();
    backend
        .create_integer_attribute(
            "reminders",
            NumericAttribute {
                key: "reminderTitle".into(),
                required: true,
                min: None,
                max: None,
                default: None,
            },
        )
        .await
        .unwrap();

    let report = Provisioner::new(&backend).provision(&[&legal::REMINDER]).await;
    let reminder = report.schema("Reminder").unwrap();

    assert!(matches!(
        reminder.attributes.iter().find(|(key, _)| *key == "reminderTitle"),
        Some((_, AttributeOutcome::Conflict(_)))
    ));
    assert_eq!(reminder.created_attributes().count(), legal::REMINDER.fields.len() - 1);
    assert_eq!(report.failures().len(), 1);
}
