use thiserror::Error;

pub mod audit;
pub mod database;

pub use audit::AuditError;
pub use database::DatabaseError;

/// Internal error type for store operations
///
/// Infrastructure errors only; not exposed via API. Endpoints convert through
/// the domain `AccountError` into the ApiResponse error enums.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Audit(#[from] AuditError),
}

impl InternalError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::Operation {
            operation: operation.to_string(),
            source,
        })
    }
}
