//! Service-level error type.
//!
//! Core errors propagate to the caller undecorated; the HTTP layer maps
//! them to status codes via [`ServiceError::status_code`] and renders the
//! `Display` text.

use std::error::Error;
use std::fmt;

use crate::produce::FactoryError;
use crate::store::StoreError;

/// Error type for service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Removing or fetching an id absent from a category.
    NotFound(u64),
    /// No registered collection claims the category. Indicates the wiring
    /// and the category enumeration are out of sync.
    NoCollection,
    /// Record construction from raw fields failed.
    Factory(FactoryError),
    /// Storage failure.
    Store(StoreError),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::NotFound(id) => write!(f, "Produce with ID {} not found.", id),
            ServiceError::NoCollection => write!(f, "no collection found"),
            ServiceError::Factory(e) => write!(f, "{}", e),
            ServiceError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ServiceError::Factory(e) => Some(e),
            ServiceError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FactoryError> for ServiceError {
    fn from(err: FactoryError) -> Self {
        ServiceError::Factory(err)
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        ServiceError::Store(err)
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::Store(StoreError::Serde(err.to_string()))
    }
}

impl ServiceError {
    /// Map this error to an HTTP status code.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::NotFound(_) => 404,
            ServiceError::NoCollection => 500,
            ServiceError::Factory(_) => 422,
            ServiceError::Store(_) => 500,
        }
    }
}
