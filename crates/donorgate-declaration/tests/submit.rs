use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use donorgate_core::config::BookingPolicy;
use donorgate_core::domain::{TriState, YesNo};
use donorgate_core::keys;
use donorgate_core::models::appointment::{Appointment, AppointmentStatus, BookingRequest};
use donorgate_core::models::declaration::{HealthDeclarationForm, Last6MonthsFlag, MultiSelect};
use donorgate_core::models::draft::RegistrationDraft;
use donorgate_core::models::record::HealthDeclarationRecord;
use donorgate_declaration::booking::BookingConflict;
use donorgate_declaration::completeness::DeclarationField;
use donorgate_declaration::registration::{
    choose_slot, confirm_review, update_declaration, RegistrationStep,
};
use donorgate_declaration::submit::{
    submit_declaration, submit_registration, StoreSubmitter, SubmissionFailure, Submitter,
};
use donorgate_declaration::SubmitError;
use donorgate_storage::state::load_state;
use donorgate_storage::{KeyValueStore, MemoryStore};
use jiff::civil::{date, Date};
use uuid::Uuid;

const TODAY: Date = date(2026, 3, 10);

/// Records every call; optionally refuses with a fixed reason.
#[derive(Default)]
struct FakeSubmitter {
    calls: AtomicUsize,
    received: Mutex<Vec<HealthDeclarationRecord>>,
    refuse_with: Option<String>,
}

impl FakeSubmitter {
    fn refusing(reason: &str) -> Self {
        Self {
            refuse_with: Some(reason.to_string()),
            ..Default::default()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Submitter for FakeSubmitter {
    async fn submit(&self, record: &HealthDeclarationRecord) -> Result<(), SubmissionFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = &self.refuse_with {
            return Err(SubmissionFailure::new(reason.clone()));
        }
        self.received.lock().unwrap().push(record.clone());
        Ok(())
    }
}

fn complete_form() -> HealthDeclarationForm {
    HealthDeclarationForm {
        has_donated_before: Some(YesNo::No),
        has_current_disease: Some(YesNo::No),
        prior_serious_disease: Some(TriState::No),
        last_month: Some(YesNo::No),
        last_14_days: Some(TriState::No),
        last_7_days: Some(TriState::No),
        ..Default::default()
    }
}

fn ready_draft() -> RegistrationDraft {
    let mut draft = RegistrationDraft::new(Uuid::new_v4());
    choose_slot(
        &mut draft,
        BookingRequest {
            event_id: Uuid::new_v4(),
            scheduled_for: date(2026, 4, 1),
        },
    );
    update_declaration(&mut draft, complete_form());
    confirm_review(&mut draft);
    draft
}

#[tokio::test]
async fn incomplete_form_never_reaches_the_store() {
    let submitter = FakeSubmitter::default();
    let form = HealthDeclarationForm {
        last_14_days: Some(TriState::Other),
        ..complete_form()
    };

    let err = submit_declaration(&form, Uuid::new_v4(), &submitter)
        .await
        .unwrap_err();
    match err {
        SubmitError::Incomplete { missing } => {
            assert_eq!(missing, vec![DeclarationField::Last14DaysDetails]);
        }
        other => panic!("expected Incomplete, got {other:?}"),
    }
    assert_eq!(submitter.calls(), 0);
}

#[tokio::test]
async fn complete_form_is_submitted_once() {
    let submitter = FakeSubmitter::default();
    let appointment_id = Uuid::new_v4();

    let record = submit_declaration(&complete_form(), appointment_id, &submitter)
        .await
        .unwrap();

    assert_eq!(record.appointment_id, appointment_id);
    assert_eq!(record.form, complete_form());
    assert!(record.review.is_none());
    assert_eq!(submitter.calls(), 1);
    assert_eq!(submitter.received.lock().unwrap()[0], record);
}

#[tokio::test]
async fn risk_factors_are_submitted_not_judged() {
    let submitter = FakeSubmitter::default();
    let mut form = HealthDeclarationForm {
        has_current_disease: Some(YesNo::Yes),
        current_disease_details: "diabetes".into(),
        ..complete_form()
    };
    form.last_6_months.set(Last6MonthsFlag::TattooOrPiercing, true);

    let record = submit_declaration(&form, Uuid::new_v4(), &submitter)
        .await
        .unwrap();
    assert!(record.form.last_6_months.tattoo_or_piercing);
}

#[tokio::test]
async fn refusal_reason_is_surfaced_verbatim_without_retry() {
    let reason = "Appointment slot no longer available (code 409)";
    let submitter = FakeSubmitter::refusing(reason);

    let err = submit_declaration(&complete_form(), Uuid::new_v4(), &submitter)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), reason);
    assert!(matches!(err, SubmitError::Rejected(ref f) if f.reason == reason));
    assert_eq!(submitter.calls(), 1);
}

#[tokio::test]
async fn store_submitter_writes_under_the_appointment() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let submitter = StoreSubmitter::new(store.clone());
    let appointment_id = Uuid::new_v4();

    let record = submit_declaration(&complete_form(), appointment_id, &submitter)
        .await
        .unwrap();

    let stored: HealthDeclarationRecord =
        load_state(store.as_ref(), &keys::declaration(appointment_id, record.id)).unwrap();
    assert_eq!(stored, record);
}

#[tokio::test]
async fn registration_books_and_submits() {
    let submitter = FakeSubmitter::default();
    let draft = ready_draft();

    let done = submit_registration(&draft, &[], TODAY, &BookingPolicy::default(), &submitter)
        .await
        .unwrap();

    assert_eq!(done.appointment.donor_id, draft.donor_id);
    assert_eq!(done.appointment.status, AppointmentStatus::Pending);
    assert_eq!(done.declaration.appointment_id, done.appointment.id);
    assert_eq!(submitter.calls(), 1);
}

#[tokio::test]
async fn registration_requires_review() {
    let submitter = FakeSubmitter::default();
    let mut draft = ready_draft();
    draft.reviewed = false;

    let err = submit_registration(&draft, &[], TODAY, &BookingPolicy::default(), &submitter)
        .await
        .unwrap_err();
    assert!(matches!(err, SubmitError::NotReady(RegistrationStep::Review)));
    assert_eq!(submitter.calls(), 0);
}

#[tokio::test]
async fn booking_conflict_stops_submission() {
    let submitter = FakeSubmitter::default();
    let draft = ready_draft();
    let request = draft.booking.unwrap();
    let existing = [Appointment {
        id: Uuid::new_v4(),
        donor_id: draft.donor_id,
        event_id: request.event_id,
        scheduled_for: request.scheduled_for,
        status: AppointmentStatus::Confirmed,
    }];

    let err = submit_registration(&draft, &existing, TODAY, &BookingPolicy::default(), &submitter)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SubmitError::Booking(BookingConflict::AlreadyBookedForEvent { appointment_id })
            if appointment_id == existing[0].id
    ));
    assert_eq!(submitter.calls(), 0);
}
