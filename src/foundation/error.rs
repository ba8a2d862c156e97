/// Crate-wide result alias.
pub type SigntrackResult<T> = Result<T, SigntrackError>;

/// Errors surfaced by the order store, the kiosk flows and the export codec.
///
/// The capture surface itself never returns these to its host; it logs and degrades.
#[derive(thiserror::Error, Debug)]
pub enum SigntrackError {
    /// Input failed a user-facing validation rule.
    #[error("validation error: {0}")]
    Validation(String),

    /// A referenced record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The caller is not allowed to perform the operation.
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// The drawing surface could not perform an operation.
    #[error("surface error: {0}")]
    Surface(String),

    /// Image encoding or decoding failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(String),

    /// Anything else, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SigntrackError {
    /// Build a [`SigntrackError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SigntrackError::NotFound`].
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Build a [`SigntrackError::AccessDenied`].
    pub fn access_denied(msg: impl Into<String>) -> Self {
        Self::AccessDenied(msg.into())
    }

    /// Build a [`SigntrackError::Surface`].
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Build a [`SigntrackError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`SigntrackError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
