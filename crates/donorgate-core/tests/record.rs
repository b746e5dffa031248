use donorgate_core::models::declaration::HealthDeclarationForm;
use donorgate_core::models::record::{ClinicalOutcome, HealthDeclarationRecord};
use uuid::Uuid;

#[test]
fn new_record_awaits_review() {
    let appointment_id = Uuid::new_v4();
    let record = HealthDeclarationRecord::new(HealthDeclarationForm::default(), appointment_id);
    assert_eq!(record.appointment_id, appointment_id);
    assert!(record.review.is_none());
    assert_eq!(record.outcome(), None);
}

#[test]
fn review_is_stored_and_replaced() {
    let mut record = HealthDeclarationRecord::new(HealthDeclarationForm::default(), Uuid::new_v4());
    record.record_review(ClinicalOutcome::Deferred, Some("  low haemoglobin ".to_string()));
    assert_eq!(record.outcome(), Some(ClinicalOutcome::Deferred));
    assert_eq!(
        record.review.as_ref().and_then(|r| r.note.as_deref()),
        Some("low haemoglobin")
    );

    record.record_review(ClinicalOutcome::Eligible, Some("   ".to_string()));
    assert_eq!(record.outcome(), Some(ClinicalOutcome::Eligible));
    assert_eq!(record.review.as_ref().and_then(|r| r.note.clone()), None);
}
