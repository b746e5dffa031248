//! Storage key conventions.
//!
//! Pure string functions. These define the canonical layout of drafts and
//! records in whatever key-value store the host application provides.

use uuid::Uuid;

pub fn screening_draft(questionnaire_id: &str) -> String {
    format!("drafts/screening/{questionnaire_id}")
}

pub fn registration_draft(donor_id: Uuid) -> String {
    format!("drafts/registration/{donor_id}")
}

pub fn declaration(appointment_id: Uuid, record_id: Uuid) -> String {
    format!("appointments/{appointment_id}/declarations/{record_id}.json")
}

pub const CONFIG_FILE: &str = "config.json";
