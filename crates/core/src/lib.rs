// Core types and functionality for the template application

pub mod config;
pub mod service;
pub mod util;

pub use config::{AppConfig, ConfigError, Environment};
pub use service::{CoreService, ServiceError};
