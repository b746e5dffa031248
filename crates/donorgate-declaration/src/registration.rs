//! The resumable donation-registration flow: pick a slot, fill in the
//! health declaration, confirm the review screen, submit.

use std::sync::Arc;

use donorgate_core::keys;
use donorgate_core::models::appointment::BookingRequest;
use donorgate_core::models::declaration::HealthDeclarationForm;
use donorgate_core::models::draft::{RegistrationDraft, DRAFT_VERSION};
use donorgate_storage::{DraftStore, KeyValueStore};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::completeness::is_declaration_complete;
use crate::multi_select::normalize_form;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RegistrationStep {
    ChooseSlot,
    HealthDeclaration,
    Review,
    /// Everything is in place; the registration can be submitted.
    Ready,
}

pub fn next_step(draft: &RegistrationDraft) -> RegistrationStep {
    if draft.booking.is_none() {
        RegistrationStep::ChooseSlot
    } else if !is_declaration_complete(&draft.declaration) {
        RegistrationStep::HealthDeclaration
    } else if !draft.reviewed {
        RegistrationStep::Review
    } else {
        RegistrationStep::Ready
    }
}

/// Picking another slot invalidates an earlier review.
pub fn choose_slot(draft: &mut RegistrationDraft, request: BookingRequest) {
    if draft.booking != Some(request) {
        draft.reviewed = false;
    }
    draft.booking = Some(request);
}

/// Any change to the answers invalidates an earlier review.
pub fn update_declaration(draft: &mut RegistrationDraft, form: HealthDeclarationForm) {
    if draft.declaration != form {
        draft.reviewed = false;
    }
    draft.declaration = form;
}

/// Confirm the review screen. Only takes effect when review is the next
/// step; returns the step the flow is on afterwards.
pub fn confirm_review(draft: &mut RegistrationDraft) -> RegistrationStep {
    if next_step(draft) == RegistrationStep::Review {
        draft.reviewed = true;
    }
    next_step(draft)
}

/// The draft store for one donor's registration.
pub fn registration_drafts(backend: Option<Arc<dyn KeyValueStore>>, donor_id: Uuid) -> DraftStore {
    DraftStore::from_backend(backend, keys::registration_draft(donor_id))
}

/// Pick up a saved registration, or start a new one.
pub fn resume_registration(drafts: &DraftStore, donor_id: Uuid) -> RegistrationDraft {
    let Some(mut draft) = drafts.load::<RegistrationDraft>() else {
        return RegistrationDraft::new(donor_id);
    };
    if draft.version != DRAFT_VERSION || draft.donor_id != donor_id {
        tracing::warn!(
            version = draft.version,
            key = drafts.key(),
            "ignoring registration draft that does not match"
        );
        return RegistrationDraft::new(donor_id);
    }
    draft.declaration = normalize_form(draft.declaration);
    // Review must be confirmed again after a resume.
    draft.reviewed = false;
    draft
}

pub fn save_registration(drafts: &DraftStore, draft: &mut RegistrationDraft) {
    draft.version = DRAFT_VERSION;
    draft.saved_at = jiff::Timestamp::now();
    drafts.save(draft);
}
