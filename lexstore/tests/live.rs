//! Runs the LawyerProfile scenario against a real Appwrite database.
//!
//! Needs `PROJECT_ID`, `PROJECT_API`, `DATABASE_ID` and the `NEXT_PUBLIC_*_ID`
//! collection variables, optionally `ENDPOINT`. Run with `cargo test -- --ignored`.

#![cfg(feature = "appwrite")]

use serde_json::{Map, Value, json};

use lexstore::{legal, prelude::*};

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

#[tokio::test]
#[ignore = "requires a live Appwrite project"]
async fn lawyer_profile_scenario_against_appwrite() {
    let store = legal::store_from_env().await.unwrap();
    let lawyers = store.schema_collection(&legal::LAWYER_PROFILE).unwrap();

    let created = lawyers
        .create(object(json!({
            "email": "test@example.com",
            "name": "John Doe",
            "phone": "1234567890",
            "address": "123 Lawyer St.",
            "city": "Cityville",
            "state": "ST",
            "zip": "12345",
            "country": "CountryX",
            "practiceAreas": ["Criminal", "Civil"],
            "experience": "5 years",
            "education": "JD, Law School",
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

    let updated = lawyers
        .update(&id, object(json!({ "phone": "9876543210" })))
        .await
        .unwrap();
    assert_eq!(updated.get("phone"), Some(&json!("9876543210")));
    assert_eq!(updated.get("email"), Some(&json!("test@example.com")));

    lawyers.delete(&id).await.unwrap();

    let err = lawyers.read(&id).await.unwrap_err();
    assert!(err.is_not_found(), "{err}");
}
