// Errors layer - Error type definitions
pub mod account;
pub mod api;
pub mod internal;

// Re-exports for convenience
pub use account::AccountError;
pub use api::{AccountApiError, AdminApiError};
pub use internal::InternalError;
