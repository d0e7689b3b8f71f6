// API layer - HTTP endpoints
pub mod accounts;
pub mod health;
pub mod helpers;
pub mod logs;
pub mod users;

pub use accounts::AccountsApi;
pub use health::HealthApi;
pub use logs::LogsApi;
pub use users::UsersApi;
