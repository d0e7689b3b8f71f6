// SeaORM entities - main (directory) database and audit database
pub mod guest_account;
pub mod sequence_counter;
pub mod system_action_log;
pub mod user_change_log;
pub mod user_profile;
