use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::appointment::BookingRequest;
use super::declaration::HealthDeclarationForm;

/// Current draft schema version. Drafts with any other version are discarded.
pub const DRAFT_VERSION: u32 = 1;

/// Saved progress of a screening session.
///
/// Answers are kept as raw codes; they are validated against the question's
/// options when the session is resumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScreeningDraft {
    #[serde(default)]
    pub version: u32,
    pub questionnaire_id: String,
    pub current_index: usize,
    #[serde(default)]
    pub answers: BTreeMap<u8, String>,
    pub saved_at: jiff::Timestamp,
}

/// Saved progress of the donation-registration flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RegistrationDraft {
    #[serde(default)]
    pub version: u32,
    pub donor_id: Uuid,
    #[serde(default)]
    pub booking: Option<BookingRequest>,
    #[serde(default)]
    pub declaration: HealthDeclarationForm,
    /// The donor confirmed the review screen.
    #[serde(default)]
    pub reviewed: bool,
    pub saved_at: jiff::Timestamp,
}

impl RegistrationDraft {
    pub fn new(donor_id: Uuid) -> Self {
        Self {
            version: DRAFT_VERSION,
            donor_id,
            booking: None,
            declaration: HealthDeclarationForm::default(),
            reviewed: false,
            saved_at: jiff::Timestamp::now(),
        }
    }
}
