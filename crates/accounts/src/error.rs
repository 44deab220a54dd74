/// Failures of the account layer itself, as opposed to rejected input.
///
/// Duplicate emails and invalid form fields are reported through
/// [`RegistrationResult`](crate::users::RegistrationResult), not here.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Password hashing failed: {0}")]
    Hashing(String),
}
