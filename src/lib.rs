pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod pricing;
pub mod utils;
pub mod views;

pub use api::ApiClient;
pub use config::Config;
pub use utils::error::{ClientError, ClientResult};
