// Audit layer - fire-and-forget recording of lifecycle and directory changes
pub mod audit_logger;

pub use audit_logger::AuditLogger;
