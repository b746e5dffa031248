use donorgate_core::config::BookingPolicy;
use donorgate_core::models::appointment::{Appointment, AppointmentStatus, BookingRequest};
use donorgate_declaration::booking::{check_booking, BookingConflict};
use jiff::civil::{date, Date};
use uuid::Uuid;

const TODAY: Date = date(2026, 3, 10);

fn appointment(event_id: Uuid, on: Date, status: AppointmentStatus) -> Appointment {
    Appointment {
        id: Uuid::new_v4(),
        donor_id: Uuid::nil(),
        event_id,
        scheduled_for: on,
        status,
    }
}

fn request(on: Date) -> BookingRequest {
    BookingRequest {
        event_id: Uuid::new_v4(),
        scheduled_for: on,
    }
}

#[test]
fn first_booking_is_accepted() {
    let policy = BookingPolicy::default();
    assert_eq!(check_booking(&[], &request(TODAY), TODAY, &policy), Ok(()));
}

#[test]
fn past_dates_are_refused() {
    let policy = BookingPolicy::default();
    let result = check_booking(&[], &request(date(2026, 3, 9)), TODAY, &policy);
    assert_eq!(
        result,
        Err(BookingConflict::PastDate {
            requested: date(2026, 3, 9)
        })
    );
}

#[test]
fn same_event_cannot_be_booked_twice() {
    let policy = BookingPolicy::default();
    let req = request(date(2026, 4, 1));
    let existing = [appointment(req.event_id, date(2026, 4, 1), AppointmentStatus::Pending)];

    let result = check_booking(&existing, &req, TODAY, &policy);
    assert_eq!(
        result,
        Err(BookingConflict::AlreadyBookedForEvent {
            appointment_id: existing[0].id
        })
    );
}

#[test]
fn cancelled_appointment_for_same_event_is_ignored() {
    let policy = BookingPolicy::default();
    let req = request(date(2026, 4, 1));
    let existing = [appointment(req.event_id, date(2026, 4, 1), AppointmentStatus::Cancelled)];
    assert_eq!(check_booking(&existing, &req, TODAY, &policy), Ok(()));
}

#[test]
fn open_upcoming_appointment_blocks_another() {
    let policy = BookingPolicy::default();
    let later = appointment(Uuid::new_v4(), date(2026, 5, 2), AppointmentStatus::Confirmed);
    let sooner = appointment(Uuid::new_v4(), date(2026, 3, 20), AppointmentStatus::Pending);
    let existing = [later, sooner.clone()];

    let result = check_booking(&existing, &request(date(2026, 6, 1)), TODAY, &policy);
    assert_eq!(
        result,
        Err(BookingConflict::ActiveAppointment {
            appointment_id: sooner.id,
            scheduled_for: sooner.scheduled_for,
        })
    );
}

#[test]
fn stale_pending_appointment_in_the_past_does_not_block() {
    let policy = BookingPolicy::default();
    let existing = [appointment(Uuid::new_v4(), date(2025, 1, 5), AppointmentStatus::Pending)];
    assert_eq!(
        check_booking(&existing, &request(date(2026, 3, 15)), TODAY, &policy),
        Ok(())
    );
}

#[test]
fn stale_pending_appointment_for_same_event_does_not_block() {
    let policy = BookingPolicy::default();
    let req = request(date(2026, 3, 15));
    let existing = [appointment(req.event_id, date(2025, 1, 5), AppointmentStatus::Pending)];
    assert_eq!(check_booking(&existing, &req, TODAY, &policy), Ok(()));
}

#[test]
fn same_event_booked_for_today_still_blocks() {
    let policy = BookingPolicy::default();
    let req = request(date(2026, 3, 15));
    let existing = [appointment(req.event_id, TODAY, AppointmentStatus::Confirmed)];
    assert!(matches!(
        check_booking(&existing, &req, TODAY, &policy),
        Err(BookingConflict::AlreadyBookedForEvent { .. })
    ));
}

#[test]
fn minimum_interval_after_donation() {
    let policy = BookingPolicy {
        min_days_between_donations: 84,
    };
    let existing = [
        appointment(Uuid::new_v4(), date(2025, 11, 2), AppointmentStatus::Completed),
        appointment(Uuid::new_v4(), date(2026, 2, 1), AppointmentStatus::Completed),
    ];

    let result = check_booking(&existing, &request(date(2026, 4, 25)), TODAY, &policy);
    assert_eq!(
        result,
        Err(BookingConflict::TooSoonAfterDonation {
            last_donation: date(2026, 2, 1),
            next_eligible: date(2026, 4, 26),
        })
    );

    assert_eq!(
        check_booking(&existing, &request(date(2026, 4, 26)), TODAY, &policy),
        Ok(())
    );
}

#[test]
fn zero_interval_policy_only_checks_dates() {
    let policy = BookingPolicy {
        min_days_between_donations: 0,
    };
    let existing = [appointment(Uuid::new_v4(), TODAY, AppointmentStatus::Completed)];
    assert_eq!(check_booking(&existing, &request(TODAY), TODAY, &policy), Ok(()));
}

#[test]
fn conflicts_render_for_the_donor() {
    let conflict = BookingConflict::TooSoonAfterDonation {
        last_donation: date(2026, 2, 1),
        next_eligible: date(2026, 4, 26),
    };
    assert_eq!(
        conflict.to_string(),
        "last donation was on 2026-02-01; next possible date is 2026-04-26"
    );
    let json = serde_json::to_value(&conflict).unwrap();
    assert_eq!(json["kind"], "too_soon_after_donation");
}
