use thiserror::Error;

/// Errors raised while bootstrapping or running a service.
///
/// Request handlers in this workspace never surface these to clients; each
/// endpoint renders its own fallback payload instead.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl AppError {
    pub fn config(message: impl std::fmt::Display) -> Self {
        AppError::ConfigError(anyhow::anyhow!("{}", message))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}
