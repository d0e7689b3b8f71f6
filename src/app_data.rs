use crate::audit::AuditLogger;
use crate::config::{DatabaseConnections, Settings};
use crate::stores::{AccountStore, AuditStore, UserStore};
use std::sync::Arc;

/// Centralized application data following the main-owned stores pattern
///
/// All stores are created once in main.rs and shared across services. Each
/// service extracts the Arcs it needs in its `new(app_data)` constructor.
pub struct AppData {
    pub connections: DatabaseConnections,
    pub settings: Settings,
    pub audit_store: Arc<AuditStore>,
    pub audit_logger: Arc<AuditLogger>,
    pub account_store: Arc<AccountStore>,
    pub user_store: Arc<UserStore>,
}

impl AppData {
    /// Wire up stores over connected, migrated databases
    pub fn init(connections: DatabaseConnections, settings: Settings) -> Self {
        tracing::debug!("Creating stores...");
        let audit_store = Arc::new(AuditStore::new(connections.audit.clone()));
        let audit_logger = Arc::new(AuditLogger::new(audit_store.clone()));
        let account_store = Arc::new(AccountStore::new(connections.directory.clone()));
        let user_store = Arc::new(UserStore::new(connections.directory.clone()));
        tracing::debug!("Stores created");

        Self {
            connections,
            settings,
            audit_store,
            audit_logger,
            account_store,
            user_store,
        }
    }
}
