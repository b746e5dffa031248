use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Appointment {
    pub id: Uuid,
    pub donor_id: Uuid,
    pub event_id: Uuid,
    pub scheduled_for: jiff::civil::Date,
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    /// The donation took place.
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    /// Pending and confirmed appointments still hold a slot.
    pub fn is_active(self) -> bool {
        matches!(self, AppointmentStatus::Pending | AppointmentStatus::Confirmed)
    }
}

/// The slot a donor picked in the registration flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BookingRequest {
    pub event_id: Uuid,
    pub scheduled_for: jiff::civil::Date,
}
