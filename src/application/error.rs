/// Error taxonomy shared by all use cases.
///
/// The presentation layer maps each variant onto an HTTP status; the
/// `Database` source text is logged but never shown to the client.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("Invalid email or password")]
    Auth,
    // Same wording as a validation failure so registration responses do not
    // reveal whether an email is already taken.
    #[error("Could not create an account with the supplied details")]
    Conflict,
    #[error("Item not found or access denied")]
    NotFound,
    #[error("Internal error")]
    Database(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
