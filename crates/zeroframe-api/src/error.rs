use thiserror::Error;

/// Errors surfaced by the typed API.
#[derive(Debug, Error)]
pub enum ZeroFrameError {
    /// The frame rejected the call.
    #[error("frame transport failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("command returned a falsy response")]
    FalsyResponse,
    /// The host answered with `{"error": ...}`.
    #[error("remote error: {0}")]
    Remote(String),
    #[error("could not interpret response")]
    InvalidResponse,
    /// Rejected locally; nothing was sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("could not de/serialize value: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("invalid base64 content: {0}")]
    Decode(#[from] base64::DecodeError),
}

impl ZeroFrameError {
    pub fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Transport(Box::new(err))
    }
}
