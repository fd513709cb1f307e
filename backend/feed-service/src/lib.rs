pub mod config;
pub mod cursor;
pub mod error;
pub mod gateways;
pub mod handlers;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
pub use services::FeedService;
