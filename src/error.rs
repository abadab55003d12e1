use derive_more::{Display, Error};

/// Coarse classification of a [`SeedError`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ErrorKind {
    Transport,
    InvalidResponse,
    Config,
}

#[derive(Debug, Display, Error)]
pub enum SeedError {
    /// The network exchange did not complete (refused, timeout, DNS, truncated body).
    #[display(fmt = "transport failure calling {}: {}", url, message)]
    Transport { url: String, message: String },

    /// The server answered, but not with what the endpoint contract promises.
    #[display(fmt = "invalid response from {}: {}", endpoint, reason)]
    InvalidResponse { endpoint: String, reason: String },

    #[display(fmt = "invalid value for {}: {}", key, message)]
    Config { key: String, message: String },
}

impl SeedError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SeedError::Transport { .. } => ErrorKind::Transport,
            SeedError::InvalidResponse { .. } => ErrorKind::InvalidResponse,
            SeedError::Config { .. } => ErrorKind::Config,
        }
    }

    pub fn invalid_response(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        SeedError::InvalidResponse {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }
}
