use donorgate_core::config::BookingPolicy;
use donorgate_core::models::appointment::{Appointment, AppointmentStatus, BookingRequest};
use jiff::civil::Date;
use jiff::ToSpan;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;
use uuid::Uuid;

/// Why a slot cannot be booked.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum BookingConflict {
    #[error("cannot book {requested}: the date has already passed")]
    PastDate { requested: Date },

    #[error("already registered for this event (appointment {appointment_id})")]
    AlreadyBookedForEvent { appointment_id: Uuid },

    #[error("an upcoming appointment on {scheduled_for} is still open")]
    ActiveAppointment {
        appointment_id: Uuid,
        scheduled_for: Date,
    },

    #[error("last donation was on {last_donation}; next possible date is {next_eligible}")]
    TooSoonAfterDonation {
        last_donation: Date,
        next_eligible: Date,
    },
}

/// Check a requested slot against the donor's existing appointments.
///
/// Rules, first failure wins:
/// 1. the date is today or later;
/// 2. no active appointment today or later for the same event;
/// 3. no other active appointment today or later;
/// 4. the minimum interval since the last completed donation has elapsed.
pub fn check_booking(
    existing: &[Appointment],
    request: &BookingRequest,
    today: Date,
    policy: &BookingPolicy,
) -> Result<(), BookingConflict> {
    if request.scheduled_for < today {
        return Err(BookingConflict::PastDate {
            requested: request.scheduled_for,
        });
    }

    // Active appointments dated before today are stale and never conflict.
    let active = existing
        .iter()
        .filter(|a| a.status.is_active() && a.scheduled_for >= today);

    if let Some(same_event) = active.clone().find(|a| a.event_id == request.event_id) {
        return Err(BookingConflict::AlreadyBookedForEvent {
            appointment_id: same_event.id,
        });
    }

    if let Some(upcoming) = active.min_by_key(|a| a.scheduled_for) {
        return Err(BookingConflict::ActiveAppointment {
            appointment_id: upcoming.id,
            scheduled_for: upcoming.scheduled_for,
        });
    }

    let last_donation = existing
        .iter()
        .filter(|a| a.status == AppointmentStatus::Completed)
        .map(|a| a.scheduled_for)
        .max();
    if let Some(last_donation) = last_donation {
        let gap = i64::from(policy.min_days_between_donations).days();
        let next_eligible = last_donation.saturating_add(gap);
        if request.scheduled_for < next_eligible {
            return Err(BookingConflict::TooSoonAfterDonation {
                last_donation,
                next_eligible,
            });
        }
    }

    Ok(())
}
