use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("Service error: {0}")]
    Service(String),
}

impl Error {
    /// NotFound error for a missing entity, e.g. `Error::not_found("Camera", 7)`.
    pub fn not_found(entity: &str, id: i64) -> Self {
        Error::NotFound(format!("{} with Id {} not found", entity, id))
    }
}
