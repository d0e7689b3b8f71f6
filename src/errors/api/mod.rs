pub mod account;
pub mod admin;

pub use account::AccountApiError;
pub use admin::AdminApiError;
