//! donorgate-declaration
//!
//! The health declaration that gates an appointment booking: multi-select
//! maintenance, the completeness check, booking conflicts, the resumable
//! registration flow and submission to the host's record store.
//!
//! Nothing here decides medical eligibility. A complete declaration is
//! submitted as-is and reviewed by clinical staff later.

pub mod booking;
pub mod completeness;
pub mod error;
pub mod multi_select;
pub mod registration;
pub mod submit;

pub use crate::booking::{check_booking, BookingConflict};
pub use crate::completeness::{is_declaration_complete, missing_fields, DeclarationField};
pub use crate::error::SubmitError;
pub use crate::multi_select::apply_multi_select;
pub use crate::registration::{next_step, RegistrationStep};
pub use crate::submit::{submit_declaration, submit_registration, Submitter};
