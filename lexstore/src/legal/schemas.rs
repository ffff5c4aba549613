//! Schema declarations of the legal-services collections.
//!
//! Field order is the order in which attributes are provisioned.

use lexstore_core::schema::{FieldDefinition, Schema};

const fn string(name: &'static str) -> FieldDefinition {
    FieldDefinition::string(name).required()
}

const fn float(name: &'static str) -> FieldDefinition {
    FieldDefinition::float(name).required()
}

const fn array(name: &'static str) -> FieldDefinition {
    FieldDefinition::array(name).required()
}

pub static LAWYER_PROFILE: Schema = Schema::new(
    "LawyerProfile",
    &[
        string("email"),
        string("name"),
        string("phone"),
        string("address"),
        string("city"),
        string("state"),
        string("zip"),
        string("country"),
        array("practiceAreas"),
        FieldDefinition::string("experience"),
        FieldDefinition::string("education"),
        FieldDefinition::array("languages"),
        float("consultationFees"),
        float("rating"),
        array("reviews"),
        FieldDefinition::integer("casesHandled"),
        FieldDefinition::integer("casesWon"),
        FieldDefinition::integer("casesLost"),
        string("profilePic"),
    ],
);

pub static ASSISTANT_PROFILE: Schema = Schema::new(
    "AssistantProfile",
    &[
        string("userId"),
        string("email"),
        string("name"),
        string("phone"),
        string("address"),
        string("city"),
        string("state"),
        string("zip"),
        string("country"),
        array("casesAssisted"),
        string("profilePic"),
        // roles
        array("pern"),
    ],
);

pub static SUBSCRIPTION: Schema = Schema::new(
    "Subscription",
    &[
        string("userId"),
        string("subscriptionId"),
        string("subscriptionType"),
        float("subscriptionAmount"),
        string("subscriptionDate"),
        string("subscriptionExpiry"),
        string("subscriptionStatus"),
    ],
);

pub static CASE: Schema = Schema::new(
    "Case",
    &[
        string("userId"),
        string("caseId"),
        string("caseType"),
        string("caseTitle"),
        string("caseDescription"),
        string("caseStatus"),
        string("caseDate"),
        string("clientId"),
        string("lawyerId"),
        string("chamberId"),
        string("assistantId"),
        string("hearingDate"),
        string("hearingTime"),
        string("hearingVenue"),
        array("documents"),
        string("notes"),
        float("rating"),
        string("review"),
    ],
);

pub static DOCUMENT: Schema = Schema::new(
    "Document",
    &[
        string("userId"),
        string("documentId"),
        string("documentName"),
        string("documentType"),
        string("documentUrl"),
        string("documentDate"),
        string("caseId"),
    ],
);

pub static REMINDER: Schema = Schema::new(
    "Reminder",
    &[
        string("userId"),
        string("reminderId"),
        string("reminderTitle"),
        string("reminderDescription"),
        string("reminderDate"),
        string("reminderTime"),
        string("reminderStatus"),
    ],
);

pub static FEEDBACK: Schema = Schema::new(
    "Feedback",
    &[
        string("feedbackId"),
        string("userId"),
        string("caseId"),
        float("rating"),
        string("comment"),
        string("feedbackDate"),
    ],
);

pub static APPOINTMENT: Schema = Schema::new(
    "Appointment",
    &[
        string("appointmentId"),
        string("userId"),
        string("lawyerId"),
        string("clientId"),
        string("appointmentDate"),
        string("appointmentTime"),
        string("appointmentType"),
        string("appointmentStatus"),
        string("notes"),
    ],
);

pub static ANNOUNCEMENTS: Schema = Schema::new(
    "Announcements",
    &[
        string("announcementId"),
        string("announcementTitle"),
        string("announcementDescription"),
        string("announcementDate"),
        string("announcementTime"),
        string("announcementStatus"),
        string("announcementMedia"),
    ],
);

pub static DRAFTED_DOCUMENTS: Schema = Schema::new(
    "DraftedDocuments",
    &[
        string("userId"),
        string("clientId"),
        string("caseId"),
        string("documentId"),
        string("documentName"),
        string("documentType"),
        string("documentUrl"),
        string("documentDate"),
    ],
);

/// Every legal-services schema, in provisioning order.
pub static ALL_SCHEMAS: [&Schema; 10] = [
    &LAWYER_PROFILE,
    &ASSISTANT_PROFILE,
    &SUBSCRIPTION,
    &CASE,
    &DOCUMENT,
    &REMINDER,
    &FEEDBACK,
    &APPOINTMENT,
    &ANNOUNCEMENTS,
    &DRAFTED_DOCUMENTS,
];
