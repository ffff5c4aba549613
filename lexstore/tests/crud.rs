use std::fmt::Debug;

use futures::future::try_join_all;
use serde_json::{Map, Value, json};

use lexstore::{
    legal::{self, *},
    memory::InMemoryBackend,
    prelude::*,
};

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

async fn provisioned_store() -> DocumentStore<InMemoryBackend> {
    let backend = InMemoryBackend::new();
    let collections = Provisioner::new(&backend)
        .provision(&legal::ALL_SCHEMAS)
        .await
        .into_result()
        .unwrap()
        .collection_ids();

    DocumentStore::new(backend, collections)
}

/// Creates, reads, updates one field of, and deletes `record`, checking each response.
async fn exercise<R>(store: &DocumentStore<InMemoryBackend>, record: R, field: &str, value: Value)
where
    R: Record + PartialEq + Debug,
{
    let collection = store.typed_collection::<R>().unwrap();

    let created = collection.create(record.clone()).await.unwrap();
    assert_eq!(created.record, record);
    assert_eq!(created.meta.collection_id, collection.id());

    let read = collection.read(created.id()).await.unwrap();
    assert_eq!(read.record, record);

    let patch = Patch::<R>::new().set(field, &value).unwrap();
    let updated = collection.update(created.id(), patch).await.unwrap();

    let mut expected = record.to_fields().unwrap();
    expected.insert(field.to_string(), value);
    assert_eq!(updated.record.to_fields().unwrap(), expected);
    assert_eq!(
        collection.read(created.id()).await.unwrap().record,
        updated.record
    );

    let confirmation = collection.delete(created.id()).await.unwrap();
    assert_eq!(&confirmation.document_id, created.id());

    let err = collection.read(created.id()).await.unwrap_err();
    assert!(err.is_not_found(), "{} read after delete: {err}", R::schema().name);
}

fn lawyer() -> LawyerProfile {
    LawyerProfile {
        email: "jane@example.com".into(),
        name: "Jane Roe".into(),
        phone: "5551234567".into(),
        address: "1 Court Sq".into(),
        city: "Springfield".into(),
        state: "IL".into(),
        zip: "62701".into(),
        country: "US".into(),
        practice_areas: vec!["Family".into(), "Estate \"Planning\"".into()],
        experience: Some("12 years".into()),
        education: None,
        languages: vec!["English".into(), "Español".into()],
        consultation_fees: 150.5,
        rating: 4.0,
        reviews: vec![],
        cases_handled: Some(120),
        cases_won: Some(90),
        cases_lost: None,
        profile_pic: "http://example.com/jane.jpg".into(),
    }
}

fn reminder(n: usize) -> Reminder {
    Reminder {
        user_id: "user-1".into(),
        reminder_id: format!("rem-{n}"),
        reminder_title: format!("Filing deadline {n}"),
        reminder_description: "Submit the brief".into(),
        reminder_date: "2025-04-01".into(),
        reminder_time: "09:00".into(),
        reminder_status: "pending".into(),
    }
}

#[tokio::test]
async fn every_schema_supports_the_four_operations() {
    let store = provisioned_store().await;

    exercise(&store, lawyer(), "phone", json!("5559876543")).await;

    exercise(
        &store,
        AssistantProfile {
            user_id: "assistant_user_001".into(),
            email: "assistant@example.com".into(),
            name: "Assistant Name".into(),
            phone: "5555555555".into(),
            address: "123 Assistant Ave".into(),
            city: "HelperCity".into(),
            state: "HS".into(),
            zip: "55555".into(),
            country: "AssistLand".into(),
            cases_assisted: vec!["case-1".into()],
            profile_pic: "http://example.com/assistant.jpg".into(),
            pern: vec!["paralegal".into(), "scheduler".into()],
        },
        "pern",
        json!(["paralegal"]),
    )
    .await;

    exercise(
        &store,
        Subscription {
            user_id: "user-1".into(),
            subscription_id: "sub-1".into(),
            subscription_type: "monthly".into(),
            subscription_amount: 29.99,
            subscription_date: "2025-01-01".into(),
            subscription_expiry: "2025-02-01".into(),
            subscription_status: "active".into(),
        },
        "subscriptionStatus",
        json!("cancelled"),
    )
    .await;

    exercise(
        &store,
        Case {
            user_id: "user-1".into(),
            case_id: "case-1".into(),
            case_type: "Civil".into(),
            case_title: "Roe v. Doe".into(),
            case_description: "Contract dispute".into(),
            case_status: "open".into(),
            case_date: "2025-01-10".into(),
            client_id: "client-1".into(),
            lawyer_id: "lawyer-1".into(),
            chamber_id: "chamber-1".into(),
            assistant_id: "assistant-1".into(),
            hearing_date: "2025-03-03".into(),
            hearing_time: "10:30".into(),
            hearing_venue: "Courtroom 4".into(),
            documents: vec![],
            notes: "Bring exhibits".into(),
            rating: 0.0,
            review: "".into(),
        },
        "documents",
        json!(["doc-1", "doc-2"]),
    )
    .await;

    exercise(
        &store,
        Document {
            user_id: "user-1".into(),
            document_id: "doc-1".into(),
            document_name: "Complaint".into(),
            document_type: "pdf".into(),
            document_url: "http://example.com/complaint.pdf".into(),
            document_date: "2025-01-11".into(),
            case_id: "case-1".into(),
        },
        "documentName",
        json!("Amended Complaint"),
    )
    .await;

    exercise(&store, reminder(1), "reminderStatus", json!("done")).await;

    exercise(
        &store,
        Feedback {
            feedback_id: "fb-1".into(),
            user_id: "client-1".into(),
            case_id: "case-1".into(),
            rating: 4.5,
            comment: "Responsive and clear".into(),
            feedback_date: "2025-05-01".into(),
        },
        "rating",
        json!(5.0),
    )
    .await;

    exercise(
        &store,
        Appointment {
            appointment_id: "apt-1".into(),
            user_id: "client-1".into(),
            lawyer_id: "lawyer-1".into(),
            client_id: "client-1".into(),
            appointment_date: "2025-02-14".into(),
            appointment_time: "15:00".into(),
            appointment_type: "Consultation".into(),
            appointment_status: "Scheduled".into(),
            notes: "".into(),
        },
        "appointmentStatus",
        json!("Completed"),
    )
    .await;

    exercise(
        &store,
        Announcements {
            announcement_id: "ann-1".into(),
            announcement_title: "Office closed".into(),
            announcement_description: "Closed for the holiday".into(),
            announcement_date: "2025-12-24".into(),
            announcement_time: "00:00".into(),
            announcement_status: "published".into(),
            announcement_media: "http://example.com/banner.png".into(),
        },
        "announcementStatus",
        json!("archived"),
    )
    .await;

    exercise(
        &store,
        DraftedDocuments {
            user_id: "user-1".into(),
            client_id: "client-1".into(),
            case_id: "case-1".into(),
            document_id: "draft-1".into(),
            document_name: "Motion to dismiss".into(),
            document_type: "docx".into(),
            document_url: "http://example.com/motion.docx".into(),
            document_date: "2025-01-20".into(),
        },
        "documentUrl",
        json!("http://example.com/motion-v2.docx"),
    )
    .await;
}

#[tokio::test]
async fn lawyer_profile_scenario() {
    let store = provisioned_store().await;
    let lawyers = store.schema_collection(&legal::LAWYER_PROFILE).unwrap();

    let created = lawyers
        .create(object(json!({
            "email": "test@example.com",
            "name": "John Doe",
            "phone": "1234567890",
            "practiceAreas": ["Criminal", "Civil"],
            "profilePic": "http://example.com/profile.jpg",
            "consultationFees": 100.0,
            "rating": 0,
            "reviews": [],
        })))
        .await
        .unwrap();
    let id = created.id().clone();

    let read = lawyers.read(&id).await.unwrap();
    assert_eq!(read.get("email"), Some(&json!("test@example.com")));
    assert_eq!(read.get("practiceAreas"), Some(&json!(["Criminal", "Civil"])));
    assert_eq!(read.get("reviews"), Some(&json!([])));

    let updated = lawyers
        .update(&id, object(json!({ "phone": "9876543210" })))
        .await
        .unwrap();
    assert_eq!(updated.get("phone"), Some(&json!("9876543210")));

    let read = lawyers.read(&id).await.unwrap();
    assert_eq!(read.get("phone"), Some(&json!("9876543210")));
    assert_eq!(read.get("email"), Some(&json!("test@example.com")));

    lawyers.delete(&id).await.unwrap();

    let err = lawyers.read(&id).await.unwrap_err();
    assert!(matches!(err, DocumentStoreError::DocumentNotFound(..)));
}

#[tokio::test]
async fn arrays_are_stored_as_text() {
    let store = provisioned_store().await;
    let lawyers = store.typed_collection::<LawyerProfile>().unwrap();

    let created = lawyers.create(lawyer()).await.unwrap();

    let raw = store
        .backend()
        .get_document(lawyers.id(), created.id())
        .await
        .unwrap();
    let text = raw.get("practiceAreas").and_then(Value::as_str).unwrap();

    assert_eq!(
        lexstore::codec::decode_array(text).unwrap(),
        ["Family", "Estate \"Planning\""]
    );
    assert_eq!(raw.get("reviews"), Some(&json!("[]")));
}

#[tokio::test]
async fn partial_update_keeps_other_fields() {
    let store = provisioned_store().await;
    let lawyers = store.typed_collection::<LawyerProfile>().unwrap();
    let original = lawyer();

    let created = lawyers.create(original.clone()).await.unwrap();
    let patch = Patch::new()
        .set("rating", 4.8)
        .unwrap()
        .set("reviews", ["Excellent"])
        .unwrap();
    let updated = lawyers.update(created.id(), patch).await.unwrap();

    assert_eq!(updated.rating, 4.8);
    assert_eq!(updated.reviews, ["Excellent"]);
    assert_eq!(
        LawyerProfile { rating: original.rating, reviews: original.reviews.clone(), ..updated.record },
        original
    );
}

#[tokio::test]
async fn null_optional_arrays_read_as_empty() {
    let store = provisioned_store().await;
    let lawyers = store.typed_collection::<LawyerProfile>().unwrap();

    let created = lawyers.create(lawyer()).await.unwrap();
    let patch = Patch::new().set("languages", Value::Null).unwrap();
    let updated = lawyers.update(created.id(), patch).await.unwrap();
    assert!(updated.languages.is_empty());

    let read = lawyers.read(created.id()).await.unwrap();
    assert!(read.languages.is_empty());
    assert_eq!(read.practice_areas, lawyer().practice_areas);
}

#[tokio::test]
async fn replace_clears_unset_optional_fields() {
    let store = provisioned_store().await;
    let lawyers = store.typed_collection::<LawyerProfile>().unwrap();

    let created = lawyers
        .create(LawyerProfile { cases_handled: Some(3), ..lawyer() })
        .await
        .unwrap();
    assert_eq!(created.experience.as_deref(), Some("12 years"));

    let replacement = LawyerProfile {
        experience: None,
        cases_handled: None,
        cases_won: None,
        phone: "5550000000".into(),
        ..lawyer()
    };
    let replaced = lawyers.replace(created.id(), replacement.clone()).await.unwrap();
    assert_eq!(replaced.record, replacement);

    let read = lawyers.read(created.id()).await.unwrap();
    assert_eq!(read.experience, None);
    assert_eq!(read.cases_handled, None);
    assert_eq!(read.record, replacement);
}

#[tokio::test]
async fn oversized_arrays_never_reach_the_backend() {
    let store = provisioned_store().await;
    let lawyers = store.typed_collection::<LawyerProfile>().unwrap();

    let record = LawyerProfile { reviews: vec!["x".repeat(10_000)], ..lawyer() };
    let err = lawyers.create(record).await.unwrap_err();

    assert!(matches!(
        err,
        DocumentStoreError::CapacityExceeded { ref field, capacity: 10_000, .. } if field == "reviews"
    ));
    assert_eq!(store.backend().document_count(lawyers.id()).await, 0);
}

#[tokio::test]
async fn patches_reject_unknown_fields() {
    let err = Patch::<Reminder>::new().set("reminderColour", "red").unwrap_err();

    assert!(matches!(err, DocumentStoreError::InvalidDocument(_)));
}

#[tokio::test]
async fn unknown_attributes_are_rejected_by_the_backend() {
    let store = provisioned_store().await;
    let reminders = store.schema_collection(&legal::REMINDER).unwrap();

    let err = reminders
        .create(object(json!({ "reminderTitle": "x", "priority": 1 })))
        .await
        .unwrap_err();

    assert!(matches!(err, DocumentStoreError::Backend { status: Some(400), .. }));
}

#[tokio::test]
async fn missing_collection_ids_are_configuration_errors() {
    let store = DocumentStore::new(InMemoryBackend::new(), CollectionIds::new());

    assert!(matches!(
        store.typed_collection::<Reminder>(),
        Err(DocumentStoreError::Configuration(_))
    ));
    assert!(matches!(
        store.schema_collection(&legal::CASE),
        Err(DocumentStoreError::Configuration(_))
    ));
}

#[tokio::test]
async fn unknown_collections_are_not_found() {
    let store = provisioned_store().await;

    let err = store
        .collection("no-such-collection")
        .read("abc")
        .await
        .unwrap_err();

    assert!(matches!(err, DocumentStoreError::CollectionNotFound(_)));
}

#[tokio::test]
async fn concurrent_operations_on_distinct_documents() {
    let store = provisioned_store().await;
    let reminders = store.typed_collection::<Reminder>().unwrap();

    let created = try_join_all((0..25).map(|n| reminders.create(reminder(n))))
        .await
        .unwrap();

    let mut ids: Vec<_> = created.iter().map(|s| s.id().clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 25);

    let updated = try_join_all(created.iter().map(|s| {
        reminders.update(s.id(), Patch::new().set("reminderStatus", "done").unwrap())
    }))
    .await
    .unwrap();
    assert!(updated.iter().all(|s| s.reminder_status == "done"));

    let read = try_join_all(created.iter().map(|s| reminders.read(s.id())))
        .await
        .unwrap();
    for (before, after) in created.iter().zip(&read) {
        assert_eq!(after.reminder_title, before.reminder_title);
    }

    try_join_all(created.iter().map(|s| reminders.delete(s.id())))
        .await
        .unwrap();
    assert_eq!(store.backend().document_count(reminders.id()).await, 0);
}

#[tokio::test]
async fn provisioning_twice_changes_nothing() {
    let backend = InMemoryBackend::new();
    let provisioner = Provisioner::new(&backend);

    let first = provisioner.provision(&legal::ALL_SCHEMAS).await;
    assert!(first.is_success(), "{:?}", first.failures());
    assert!(first.schemas.iter().all(|s| s.collection_created));
    assert_eq!(
        first.schema("LawyerProfile").unwrap().created_attributes().count(),
        legal::LAWYER_PROFILE.fields.len()
    );

    let second = provisioner.provision(&legal::ALL_SCHEMAS).await;
    assert!(second.is_success(), "{:?}", second.failures());
    assert!(second.schemas.iter().all(|s| !s.collection_created));
    assert_eq!(second.schemas.iter().flat_map(|s| s.created_attributes()).count(), 0);

    assert_eq!(second.collection_ids(), first.collection_ids());
    assert_eq!(backend.list_collections().await.unwrap().len(), 10);
}
