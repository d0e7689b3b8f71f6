// DTO layer - API request/response models
pub mod account;
pub mod common;
pub mod logs;
pub mod user;
