use donorgate_audit::events::action;
use donorgate_audit::AuditEvent;

#[test]
fn builder_fills_optional_fields() {
    let event = AuditEvent::new(action::SCREENING_VERDICT, "screening", "donor_self_check")
        .with_actor("donor-42")
        .with_details(serde_json::json!({ "verdict": "eligible" }));

    assert_eq!(event.action, "screening.verdict");
    assert_eq!(event.actor.as_deref(), Some("donor-42"));
    assert_eq!(event.details.as_ref().unwrap()["verdict"], "eligible");
    event.emit();
}

#[test]
fn serializes_for_shipping() {
    let event = AuditEvent::new(action::BOOKING_CONFLICT, "appointment", "abc");
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["resource_type"], "appointment");
    assert!(json["actor"].is_null());
}
