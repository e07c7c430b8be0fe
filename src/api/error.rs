use thiserror::Error;

/// Failures surfaced by the expense store.
///
/// `Validation` never reaches the network; everything else comes from a
/// request that was attempted.
#[derive(Debug, Error)]
pub(crate) enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("session rejected by server: {}", .message.as_deref().unwrap_or("unauthorized"))]
    Unauthorized { message: Option<String> },

    #[error("server returned HTTP {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Remote { status: u16, message: Option<String> },

    #[error("could not reach server: {0}")]
    Transport(String),

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Text for the user-facing alert: the server's own message when it sent
    /// one, otherwise `fallback`.
    pub(crate) fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::Remote {
                message: Some(msg), ..
            }
            | Self::Unauthorized { message: Some(msg) } => msg.clone(),
            _ => fallback.to_string(),
        }
    }

    pub(crate) fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}
