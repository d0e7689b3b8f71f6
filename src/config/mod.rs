mod database;
mod logging;
mod settings;

pub use database::DatabaseConnections;
pub use logging::{init_logging, LoggingError};
pub use settings::Settings;
