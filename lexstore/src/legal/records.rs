//! Typed records of the legal-services collections.
//!
//! Field names map to attribute names in camelCase. Array attributes are plain
//! `Vec<String>` here; their text encoding happens inside the collection adapter.

use serde::{Deserialize, Serialize};

use lexstore_core::{document::Record, schema::Schema};

use super::schemas;

macro_rules! record {
    ($record:ident => $schema:expr) => {
        impl Record for $record {
            fn schema() -> &'static Schema {
                &$schema
            }
        }
    };
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LawyerProfile {
    pub email: String,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    pub practice_areas: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    pub consultation_fees: f64,
    pub rating: f64,
    pub reviews: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cases_handled: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cases_won: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cases_lost: Option<i64>,
    pub profile_pic: String,
}

record!(LawyerProfile => schemas::LAWYER_PROFILE);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantProfile {
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    pub cases_assisted: Vec<String>,
    pub profile_pic: String,
    /// Roles held by the assistant.
    pub pern: Vec<String>,
}

record!(AssistantProfile => schemas::ASSISTANT_PROFILE);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub user_id: String,
    pub subscription_id: String,
    pub subscription_type: String,
    pub subscription_amount: f64,
    pub subscription_date: String,
    pub subscription_expiry: String,
    pub subscription_status: String,
}

record!(Subscription => schemas::SUBSCRIPTION);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub user_id: String,
    pub case_id: String,
    pub case_type: String,
    pub case_title: String,
    pub case_description: String,
    pub case_status: String,
    pub case_date: String,
    pub client_id: String,
    pub lawyer_id: String,
    pub chamber_id: String,
    pub assistant_id: String,
    pub hearing_date: String,
    pub hearing_time: String,
    pub hearing_venue: String,
    /// Ids of the documents filed for the case.
    pub documents: Vec<String>,
    pub notes: String,
    pub rating: f64,
    pub review: String,
}

record!(Case => schemas::CASE);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub user_id: String,
    pub document_id: String,
    pub document_name: String,
    pub document_type: String,
    pub document_url: String,
    pub document_date: String,
    pub case_id: String,
}

record!(Document => schemas::DOCUMENT);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub user_id: String,
    pub reminder_id: String,
    pub reminder_title: String,
    pub reminder_description: String,
    pub reminder_date: String,
    pub reminder_time: String,
    pub reminder_status: String,
}

record!(Reminder => schemas::REMINDER);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub feedback_id: String,
    /// Client or lawyer who left the feedback.
    pub user_id: String,
    pub case_id: String,
    /// Out of 5.
    pub rating: f64,
    pub comment: String,
    pub feedback_date: String,
}

record!(Feedback => schemas::FEEDBACK);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub appointment_id: String,
    pub user_id: String,
    pub lawyer_id: String,
    pub client_id: String,
    pub appointment_date: String,
    pub appointment_time: String,
    pub appointment_type: String,
    pub appointment_status: String,
    pub notes: String,
}

record!(Appointment => schemas::APPOINTMENT);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcements {
    pub announcement_id: String,
    pub announcement_title: String,
    pub announcement_description: String,
    pub announcement_date: String,
    pub announcement_time: String,
    pub announcement_status: String,
    pub announcement_media: String,
}

record!(Announcements => schemas::ANNOUNCEMENTS);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftedDocuments {
    pub user_id: String,
    pub client_id: String,
    pub case_id: String,
    pub document_id: String,
    pub document_name: String,
    pub document_type: String,
    pub document_url: String,
    pub document_date: String,
}

record!(DraftedDocuments => schemas::DRAFTED_DOCUMENTS);
