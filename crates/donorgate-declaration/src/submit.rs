use std::future::Future;
use std::sync::Arc;

use donorgate_audit::events::{action, AuditEvent};
use donorgate_core::config::BookingPolicy;
use donorgate_core::keys;
use donorgate_core::models::appointment::{Appointment, AppointmentStatus};
use donorgate_core::models::declaration::HealthDeclarationForm;
use donorgate_core::models::draft::RegistrationDraft;
use donorgate_core::models::record::HealthDeclarationRecord;
use donorgate_storage::{state, KeyValueStore};
use jiff::civil::Date;
use thiserror::Error;
use uuid::Uuid;

use crate::booking::check_booking;
use crate::completeness::missing_fields;
use crate::error::SubmitError;
use crate::multi_select::normalize_form;
use crate::registration::{next_step, RegistrationStep};

/// A refusal from the record store. The reason is shown to the donor as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct SubmissionFailure {
    pub reason: String,
}

impl SubmissionFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Where submitted declarations go. Provided by the host application.
pub trait Submitter: Send + Sync {
    fn submit(
        &self,
        record: &HealthDeclarationRecord,
    ) -> impl Future<Output = Result<(), SubmissionFailure>> + Send;
}

/// Writes records into a key-value store under
/// `appointments/{appointment_id}/declarations/{record_id}.json`.
pub struct StoreSubmitter {
    store: Arc<dyn KeyValueStore>,
}

impl StoreSubmitter {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

impl Submitter for StoreSubmitter {
    async fn submit(&self, record: &HealthDeclarationRecord) -> Result<(), SubmissionFailure> {
        let key = keys::declaration(record.appointment_id, record.id);
        state::save_state(self.store.as_ref(), &key, record)
            .map_err(|e| SubmissionFailure::new(e.to_string()))
    }
}

/// Submit a declaration for an appointment.
///
/// An incomplete form never reaches the submitter. Exactly one attempt is
/// made; retrying is the caller's decision.
pub async fn submit_declaration<S: Submitter>(
    form: &HealthDeclarationForm,
    appointment_id: Uuid,
    submitter: &S,
) -> Result<HealthDeclarationRecord, SubmitError> {
    let missing = missing_fields(form);
    if !missing.is_empty() {
        tracing::debug!(%appointment_id, missing = missing.len(), "declaration incomplete");
        return Err(SubmitError::Incomplete { missing });
    }

    let record = HealthDeclarationRecord::new(normalize_form(form.clone()), appointment_id);
    match submitter.submit(&record).await {
        Ok(()) => {
            tracing::info!(%appointment_id, record_id = %record.id, "declaration submitted");
            AuditEvent::new(
                action::DECLARATION_SUBMITTED,
                "health_declaration",
                record.id.to_string(),
            )
            .with_details(serde_json::json!({ "appointment_id": appointment_id }))
            .emit();
            Ok(record)
        }
        Err(failure) => {
            tracing::warn!(%appointment_id, reason = %failure.reason, "declaration rejected");
            AuditEvent::new(
                action::DECLARATION_SUBMIT_FAILED,
                "health_declaration",
                record.id.to_string(),
            )
            .with_details(serde_json::json!({ "appointment_id": appointment_id }))
            .emit();
            Err(SubmitError::Rejected(failure))
        }
    }
}

/// A booked appointment together with the declaration that gated it.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedRegistration {
    pub appointment: Appointment,
    pub declaration: HealthDeclarationRecord,
}

/// Book the draft's slot and submit its declaration.
///
/// The draft must be [`RegistrationStep::Ready`] and the slot must pass
/// [`check_booking`] against `existing`.
pub async fn submit_registration<S: Submitter>(
    draft: &RegistrationDraft,
    existing: &[Appointment],
    today: Date,
    policy: &BookingPolicy,
    submitter: &S,
) -> Result<CompletedRegistration, SubmitError> {
    let step = next_step(draft);
    let (RegistrationStep::Ready, Some(request)) = (step, draft.booking) else {
        return Err(SubmitError::NotReady(step));
    };

    if let Err(conflict) = check_booking(existing, &request, today, policy) {
        tracing::info!(donor_id = %draft.donor_id, %conflict, "booking refused");
        AuditEvent::new(
            action::BOOKING_CONFLICT,
            "appointment",
            request.event_id.to_string(),
        )
        .with_actor(draft.donor_id.to_string())
        .with_details(serde_json::to_value(&conflict).unwrap_or_default())
        .emit();
        return Err(conflict.into());
    }

    let appointment = Appointment {
        id: Uuid::new_v4(),
        donor_id: draft.donor_id,
        event_id: request.event_id,
        scheduled_for: request.scheduled_for,
        status: AppointmentStatus::Pending,
    };
    let declaration = submit_declaration(&draft.declaration, appointment.id, submitter).await?;
    Ok(CompletedRegistration {
        appointment,
        declaration,
    })
}
