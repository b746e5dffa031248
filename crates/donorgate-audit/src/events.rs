use serde::Serialize;
use tracing::info;

/// Action names used in audit events.
pub mod action {
    pub const SCREENING_VERDICT: &str = "screening.verdict";
    pub const DECLARATION_SUBMITTED: &str = "declaration.submitted";
    pub const DECLARATION_SUBMIT_FAILED: &str = "declaration.submit_failed";
    pub const BOOKING_CONFLICT: &str = "booking.conflict";
}

/// A structured audit event.
///
/// Events are logged via `tracing`; the host's subscriber decides where they
/// end up. They never carry free-text health details, only identifiers and
/// outcome codes.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub action: String,
    pub resource_type: String,
    pub resource_id: String,
    pub actor: Option<String>,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(
        action: impl Into<String>,
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
    ) -> Self {
        Self {
            action: action.into(),
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
            actor: None,
            details: None,
        }
    }

    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Emit this audit event via tracing.
    pub fn emit(&self) {
        let details = self
            .details
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_default();
        info!(
            audit.action = %self.action,
            audit.resource_type = %self.resource_type,
            audit.resource_id = %self.resource_id,
            audit.actor = self.actor.as_deref().unwrap_or("anonymous"),
            audit.details = %details,
            "audit event"
        );
    }
}
