use thiserror::Error;

/// Failure kinds raised by restaurant stores. Callers switch on the variant,
/// never on the message.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("no restaurant named '{0}'")]
    NotFound(String),
    #[error("restaurant '{0}' already exists")]
    Conflict(String),
    #[error("storage read failed: {0}")]
    StorageRead(String),
    #[error("storage write failed: {0}")]
    StorageWrite(String),
}

impl StoreError {
    pub fn not_found(name: &str) -> Self { Self::NotFound(name.to_string()) }

    /// Stable numeric code for logging
    pub fn code(&self) -> u16 {
        match self {
            StoreError::Validation(_) => 1001,
            StoreError::NotFound(_) => 1002,
            StoreError::Conflict(_) => 1003,
            StoreError::StorageRead(_) => 1201,
            StoreError::StorageWrite(_) => 1202,
        }
    }
}

impl From<models::errors::ModelError> for StoreError {
    fn from(e: models::errors::ModelError) -> Self {
        use models::errors::ModelError;
        match e {
            ModelError::Validation(m) => StoreError::Validation(m),
            ModelError::Conflict(name) => StoreError::Conflict(name),
            ModelError::Db(m) => StoreError::StorageWrite(m),
        }
    }
}
