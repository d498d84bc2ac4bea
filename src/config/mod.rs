// file: src/config/mod.rs
// version: 1.0.0
// guid: b781bee4-e7a3-426a-a688-df9be7b1dde2

//! Configuration module for ec2-cmd
//!
//! Settings are layered: built-in defaults, then the YAML config file, then
//! environment variables, then command-line flags.

pub mod credentials;
pub mod loader;

pub use credentials::Credentials;
pub use loader::ConfigLoader;

use crate::error::{Ec2CmdError, Result};
use serde::{Deserialize, Serialize};

/// Runtime settings for the transport and the confirmation gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub region: Option<String>,
    pub profile: Option<String>,
    pub endpoint_url: Option<String>,
    pub timeout_seconds: u64,
    pub connect_timeout_seconds: u64,
    pub retry: RetryConfig,
    /// When false, mutating commands run as if `--force` was given
    pub confirm_mutations: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            region: None,
            profile: None,
            endpoint_url: None,
            timeout_seconds: 60,
            connect_timeout_seconds: 10,
            retry: RetryConfig::default(),
            confirm_mutations: true,
        }
    }
}

/// Retry policy of the HTTP transport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff_ms: 100,
            max_backoff_ms: 20_000,
        }
    }
}

impl Settings {
    /// Check value ranges after all layers are applied
    pub fn validate(&self) -> Result<()> {
        if let Some(ref region) = self.region {
            let valid = !region.is_empty()
                && region
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
            if !valid {
                return Err(Ec2CmdError::config(format!("Invalid region: {}", region)));
            }
        }

        if let Some(ref endpoint) = self.endpoint_url {
            let parsed = url::Url::parse(endpoint)
                .map_err(|e| Ec2CmdError::config(format!("Invalid endpoint URL {}: {}", endpoint, e)))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(Ec2CmdError::config(format!(
                    "Endpoint URL must use http or https: {}",
                    endpoint
                )));
            }
        }

        if self.timeout_seconds == 0 {
            return Err(Ec2CmdError::config("timeout_seconds must be greater than zero"));
        }

        if self.retry.max_attempts == 0 {
            return Err(Ec2CmdError::config("retry.max_attempts must be at least 1"));
        }

        Ok(())
    }

    /// Region, or a configuration error naming the ways to set one
    pub fn require_region(&self) -> Result<&str> {
        self.region.as_deref().ok_or_else(|| {
            Ec2CmdError::config("No region configured; pass --region or set AWS_REGION")
        })
    }

    /// Endpoint override, else the regional EC2 endpoint
    pub fn ec2_endpoint(&self) -> Result<String> {
        if let Some(ref endpoint) = self.endpoint_url {
            return Ok(endpoint.trim_end_matches('/').to_string());
        }
        Ok(regional_endpoint(self.require_region()?))
    }
}

/// `https://ec2.{region}.amazonaws.com`, with the China partition suffix.
pub fn regional_endpoint(region: &str) -> String {
    if region.starts_with("cn-") {
        format!("https://ec2.{}.amazonaws.com.cn", region)
    } else {
        format!("https://ec2.{}.amazonaws.com", region)
    }
}
