// Services layer - Business logic and orchestration
pub mod directory_sync;
pub mod lifecycle;
pub mod user_admin;

pub use directory_sync::DirectorySync;
pub use lifecycle::{LifecycleService, ListScope};
pub use user_admin::UserAdminService;
