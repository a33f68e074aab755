use thiserror::Error;

/// Why a single translation call failed.
///
/// All variants are per-row failures: the batch loop records them in the
/// output cell and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    /// The provider answered with a non-200 status.
    #[error("API Error: {message}")]
    Provider { status: u16, message: String },

    /// The provider answered 200 but the completion text was missing.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The request never produced a response (connect failure, timeout, body read).
    #[error("Network error: {0}")]
    Network(String),
}

impl TranslationError {
    /// HTTP status reported by the provider, if any.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Provider { status, .. } => Some(*status),
            Self::MalformedResponse(_) | Self::Network(_) => None,
        }
    }
}
