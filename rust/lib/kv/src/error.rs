use thiserror::Error;

#[derive(Error, Debug)]
pub enum KVError {
    #[error("key is read-only: {0}")]
    ReadOnly(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl KVError {
    /// Wrap any displayable backend error as a storage error.
    pub fn storage<E: std::fmt::Display>(e: E) -> Self {
        KVError::Storage(e.to_string())
    }
}
