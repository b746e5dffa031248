use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::declaration::HealthDeclarationForm;

/// A submitted health declaration, stored with the appointment it gates.
///
/// Submission only proves the form was well-formed. Whether the donor may
/// actually donate is decided afterwards by clinical staff and written to
/// `review`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HealthDeclarationRecord {
    pub id: Uuid,
    pub appointment_id: Uuid,
    pub form: HealthDeclarationForm,
    pub submitted_at: jiff::Timestamp,
    pub review: Option<ClinicalReview>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClinicalReview {
    pub outcome: ClinicalOutcome,
    pub note: Option<String>,
    pub reviewed_at: jiff::Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ClinicalOutcome {
    Eligible,
    /// Temporarily deferred, may donate later.
    Deferred,
    Ineligible,
}

impl HealthDeclarationRecord {
    pub fn new(form: HealthDeclarationForm, appointment_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            appointment_id,
            form,
            submitted_at: jiff::Timestamp::now(),
            review: None,
        }
    }

    /// Store the staff decision. A later review replaces an earlier one.
    pub fn record_review(&mut self, outcome: ClinicalOutcome, note: Option<String>) {
        let note = note
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        self.review = Some(ClinicalReview {
            outcome,
            note,
            reviewed_at: jiff::Timestamp::now(),
        });
    }

    pub fn outcome(&self) -> Option<ClinicalOutcome> {
        self.review.as_ref().map(|r| r.outcome)
    }
}
