use thiserror::Error;

use crate::booking::BookingConflict;
use crate::completeness::DeclarationField;
use crate::registration::RegistrationStep;
use crate::submit::SubmissionFailure;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("declaration incomplete: {} required field(s) unanswered", .missing.len())]
    Incomplete { missing: Vec<DeclarationField> },

    #[error("registration not ready, next step is {0:?}")]
    NotReady(RegistrationStep),

    #[error(transparent)]
    Booking(#[from] BookingConflict),

    /// The record store refused the declaration. Displays the store's reason
    /// unchanged.
    #[error(transparent)]
    Rejected(#[from] SubmissionFailure),
}
