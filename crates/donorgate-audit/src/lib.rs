//! donorgate-audit
//!
//! Application-level audit events for screening verdicts, declaration
//! submissions and booking decisions, emitted through `tracing`.

pub mod events;

pub use crate::events::AuditEvent;
