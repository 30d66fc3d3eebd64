use crate::config::AppConfig;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Message doubles as the HTTP 400 body text, keep it stable.
    #[error("Name is required")]
    NameRequired,
}

/// Stateless greeting service. Holds the config it was constructed with and
/// exposes pure operations over it; one instance per process mode.
#[derive(Debug, Clone)]
pub struct CoreService {
    config: AppConfig,
}

impl CoreService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// The held configuration, verbatim.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Format a greeting for `name`. Empty names are rejected here so every
    /// adapter shares one enforcement point.
    pub fn greet(&self, name: &str) -> Result<String, ServiceError> {
        if name.is_empty() {
            return Err(ServiceError::NameRequired);
        }
        Ok(format!("Hello, {}! Welcome to {}.", name, self.config.name))
    }
}
