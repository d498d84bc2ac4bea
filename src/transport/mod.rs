// file: src/transport/mod.rs
// version: 1.0.0
// guid: cfd6e58f-3369-49ec-83ba-b4f26e0dbd96

//! Transport collaborator for EC2 Query API calls.
//!
//! The adapter only depends on [`Ec2Transport`]. [`HttpTransport`] is the
//! production implementation: it signs each call with SigV4 and posts it to
//! the regional EC2 endpoint. Retry policy lives here, never in the adapter.

pub mod http;
pub mod signing;
pub mod xml;

pub use http::HttpTransport;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// EC2 API version spoken by every request.
pub const API_VERSION: &str = "2016-11-15";

/// Form parameters of one Query API call, excluding `Action` and `Version`.
pub type QueryParams = BTreeMap<String, String>;

/// Result type for transport calls
pub type TransportResult<T> = std::result::Result<T, TransportError>;

/// Sends one EC2 action and returns the raw response document.
#[async_trait::async_trait]
pub trait Ec2Transport: Send + Sync {
    /// Send `action` with `params` and return the XML response body
    async fn send(&self, action: &str, params: &QueryParams) -> TransportResult<String>;
}

#[async_trait::async_trait]
impl<T: Ec2Transport + ?Sized> Ec2Transport for Arc<T> {
    async fn send(&self, action: &str, params: &QueryParams) -> TransportResult<String> {
        (**self).send(action, params).await
    }
}

/// Failures raised by a transport
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("{0}")]
    Service(ServiceError),

    #[error("Could not resolve EC2 endpoint {endpoint}: {source}")]
    NameResolution {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed {action} response: {message}")]
    Decode { action: String, message: String },

    #[error("Request signing failed: {0}")]
    Signing(String),
}

impl TransportError {
    /// Create a new decode error
    pub fn decode(action: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            action: action.into(),
            message: message.into(),
        }
    }

    /// Whether a fresh attempt could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Service(err) => err.is_retryable(),
            Self::Http(err) => err.is_timeout() || err.is_connect(),
            Self::NameResolution { .. } | Self::Decode { .. } | Self::Signing(_) => false,
        }
    }
}

/// Error document returned by the EC2 service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceError {
    pub code: String,
    pub message: String,
    pub status: u16,
    pub request_id: Option<String>,
}

impl ServiceError {
    pub fn new(code: impl Into<String>, message: impl Into<String>, status: u16) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            status,
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Throttling and server-side faults are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        if matches!(self.status, 429 | 500 | 502 | 503 | 504) {
            return true;
        }
        matches!(
            self.code.as_str(),
            "Throttling"
                | "ThrottlingException"
                | "RequestLimitExceeded"
                | "EC2ThrottledException"
                | "InternalError"
                | "ServiceUnavailable"
                | "Unavailable"
                | "RequestTimeout"
        )
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EC2 error [{}]: {} (HTTP {})",
            self.code, self.message, self.status
        )?;
        if let Some(ref id) = self.request_id {
            write!(f, " [RequestId: {}]", id)?;
        }
        Ok(())
    }
}

/// Add `Prefix.1`, `Prefix.2`, ... entries for a list parameter.
pub fn add_list(params: &mut QueryParams, prefix: &str, values: &[String]) {
    for (i, value) in values.iter().enumerate() {
        params.insert(format!("{}.{}", prefix, i + 1), value.clone());
    }
}

/// Add `name` only when a value is bound.
pub fn add_optional<V: ToString>(params: &mut QueryParams, name: &str, value: Option<&V>) {
    if let Some(value) = value {
        params.insert(name.to_string(), value.to_string());
    }
}
