pub mod amount;
pub mod app_config;
pub mod traits;
