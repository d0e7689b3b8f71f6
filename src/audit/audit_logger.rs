use crate::stores::AuditStore;
use crate::types::internal::audit::{SystemActionEvent, UserChangeEvent};
use std::sync::Arc;

/// Fire-and-forget recorder for audit events.
///
/// Every method swallows store failures after logging them locally: audit
/// recording must never fail or roll back the business transition that
/// triggered it. Callers invoke these after their own write has committed.
pub struct AuditLogger {
    audit_store: Arc<AuditStore>,
}

impl AuditLogger {
    /// Create a new AuditLogger backed by the given store
    pub fn new(audit_store: Arc<AuditStore>) -> Self {
        Self { audit_store }
    }

    /// Record a guest-account lifecycle event
    pub async fn record_system_action(&self, event: SystemActionEvent) {
        let log_type = event.log_type.clone();
        let target = event.target_account_id.clone();
        if let Err(e) = self.audit_store.write_system_event(event).await {
            tracing::warn!(
                log_type = %log_type,
                target = target.as_deref().unwrap_or("-"),
                "Failed to record system action: {e}"
            );
        }
    }

    /// Record a user-master change event
    pub async fn record_user_change(&self, event: UserChangeEvent) {
        let action = event.action;
        let target = event.target_user_id.clone();
        if let Err(e) = self.audit_store.write_user_change(event).await {
            tracing::warn!(
                action = %action,
                target = %target,
                "Failed to record user change: {e}"
            );
        }
    }
}
