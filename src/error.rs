// Error taxonomy for the registry core
//
// Three kinds, all terminal for the single operation that raised them:
// validation runs before any mutation, so no partial state is ever left
// behind and both stores stay usable after any failure.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Missing or malformed caller input - the caller must correct and retry
    #[error("{0}")]
    Validation(String),

    /// A referenced entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// A uniqueness invariant would be violated
    #[error("{0}")]
    Conflict(String),
}

pub type Result<T> = std::result::Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_displays_message_verbatim() {
        let err = RegistryError::Validation("Search term is required.".to_string());
        assert_eq!(err.to_string(), "Search term is required.");

        let err = RegistryError::NotFound("Client with ID CLIENT-9999 not found.".to_string());
        assert_eq!(err.to_string(), "Client with ID CLIENT-9999 not found.");
    }
}
