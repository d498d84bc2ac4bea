// file: src/error.rs
// version: 1.0.0
// guid: 432e5ebf-4d83-4621-8257-625931404a12

use crate::transport::TransportError;
use thiserror::Error;

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, Ec2CmdError>;

/// Error types for EC2 command invocations
#[derive(Error, Debug)]
pub enum Ec2CmdError {
    #[error("Invalid selector '{expression}': {reason}")]
    InvalidSelector { expression: String, reason: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Transport(TransportError),

    #[error(
        "Name resolution failure while contacting EC2 endpoint {endpoint}. \
         Check network connectivity and that the region or --endpoint-url \
         names a reachable endpoint."
    )]
    EndpointUnresolved {
        endpoint: String,
        #[source]
        source: TransportError,
    },

    #[error("Operation cancelled: {0}")]
    Cancelled(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Credentials error: {0}")]
    Credentials(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Ec2CmdError {
    /// Create a new invalid selector error
    pub fn invalid_selector(expression: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSelector {
            expression: expression.into(),
            reason: reason.into(),
        }
    }

    /// Create a new invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a new cancellation error
    pub fn cancelled(msg: impl Into<String>) -> Self {
        Self::Cancelled(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new credentials error
    pub fn credentials(msg: impl Into<String>) -> Self {
        Self::Credentials(msg.into())
    }

    /// Wrap a transport failure for the caller.
    ///
    /// Name-resolution failures get a diagnostic that points at the endpoint
    /// instead of the resolver's raw message; everything else passes through.
    pub fn from_transport(err: TransportError) -> Self {
        if let TransportError::NameResolution { endpoint, .. } = &err {
            let endpoint = endpoint.clone();
            return Self::EndpointUnresolved {
                endpoint,
                source: err,
            };
        }
        Self::Transport(err)
    }

    /// Whether the invocation ended because the host asked it to stop
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }
}

impl From<TransportError> for Ec2CmdError {
    fn from(err: TransportError) -> Self {
        Self::from_transport(err)
    }
}
