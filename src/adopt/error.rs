//! Error type shared by the adoption library

use thiserror::Error;

/// Errors raised by catalog, account and request operations
#[derive(Debug, Error)]
pub enum Error {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid {field}: {value}")]
    InvalidValue { field: &'static str, value: String },

    #[error("Email already registered.")]
    EmailTaken(String),

    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("Not signed in. Run `pet-adopt login` first.")]
    NotSignedIn,

    #[error("Admin access only. Please log in as {0}.")]
    AdminOnly(String),

    #[error("Pet not found: {0}")]
    PetNotFound(u64),

    #[error("Adoption request not found: {0}")]
    RequestNotFound(String),

    #[error("Request id prefix '{0}' matches more than one request")]
    AmbiguousRequest(String),

    #[error("{0} has already been adopted.")]
    PetAlreadyAdopted(String),

    #[error("{0} already has a pending adoption request.")]
    RequestAlreadyPending(String),

    #[error("Request {id} is already {status}")]
    InvalidTransition { id: String, status: String },

    #[error("Corrupt value under key '{key}'")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode value for key '{key}'")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Storage(#[from] rusqlite::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias for library operations
pub type Result<T> = std::result::Result<T, Error>;

/// Reject empty or whitespace-only form fields
pub(crate) fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(Error::MissingField(field))
    } else {
        Ok(())
    }
}
