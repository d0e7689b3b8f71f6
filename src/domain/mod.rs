// Domain layer - status enums, transition rules, field validation
pub mod status;
pub mod validation;

pub use status::{AccountAction, AccountStatus, EmploymentStatus};
pub use validation::FieldError;
