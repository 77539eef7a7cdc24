use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unsupported record type: {0}")]
    UnsupportedRecordType(String),

    #[error("Malformed packet: {0}")]
    MalformedPacket(String),

    #[error("Query timeout waiting for {server}")]
    Timeout { server: String },

    #[error("Network error talking to {server}: {reason}")]
    NetworkError { server: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DomainError {
    pub fn network(server: impl ToString, reason: impl ToString) -> Self {
        Self::NetworkError {
            server: server.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn timeout(server: impl ToString) -> Self {
        Self::Timeout {
            server: server.to_string(),
        }
    }

    /// Transport and protocol failures are worth another attempt; input and
    /// configuration errors are not.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::MalformedPacket(_) | Self::NetworkError { .. }
        )
    }

    /// Stable machine-readable name used in API error payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) | Self::UnsupportedRecordType(_) => "InvalidInput",
            Self::MalformedPacket(_) => "MalformedPacket",
            Self::Timeout { .. } => "Timeout",
            Self::NetworkError { .. } => "NetworkError",
            Self::Config(_) => "Config",
        }
    }
}
