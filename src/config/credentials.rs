// file: src/config/credentials.rs
// version: 1.1.0
// guid: 47e8b9c1-9679-4c90-a77d-739cbb59d86c

//! Credential resolution: environment first, then the shared credentials file

use super::ConfigLoader;
use crate::error::{Ec2CmdError, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Access key pair plus optional session token
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("session_token", &self.session_token.as_ref().map(|_| "** redacted **"))
            .finish()
    }
}

impl Credentials {
    pub fn new(access_key_id: &str, secret_access_key: &str) -> Self {
        Self {
            access_key_id: access_key_id.to_string(),
            secret_access_key: secret_access_key.to_string(),
            session_token: None,
        }
    }

    pub fn with_session_token(mut self, token: &str) -> Self {
        self.session_token = Some(token.to_string());
        self
    }

    /// Environment variables win; otherwise the named profile (or
    /// `default`) from the shared credentials file.
    ///
    /// `explicit_profile` marks a profile given on the command line. Only
    /// that skips the environment keys; a profile from `AWS_PROFILE` or the
    /// config file is a fallback.
    pub fn resolve(
        loader: &ConfigLoader,
        profile: Option<&str>,
        explicit_profile: bool,
    ) -> Result<Self> {
        if !explicit_profile {
            if let Some(creds) = Self::from_env(loader) {
                debug!("Using credentials from environment");
                return Ok(creds);
            }
        }

        let profile = profile.unwrap_or("default");
        let path = Self::shared_credentials_path(loader).ok_or_else(|| {
            Ec2CmdError::credentials("Cannot locate the shared credentials file")
        })?;

        match Self::from_shared_file(&path, profile)? {
            Some(creds) => {
                debug!("Using credentials for profile '{}' from {}", profile, path.display());
                Ok(creds)
            }
            None => Err(Ec2CmdError::credentials(format!(
                "No credentials found: set AWS_ACCESS_KEY_ID/AWS_SECRET_ACCESS_KEY or add profile '{}' to {}",
                profile,
                path.display()
            ))),
        }
    }

    /// `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`, `AWS_SESSION_TOKEN`
    pub fn from_env(loader: &ConfigLoader) -> Option<Self> {
        let access_key = loader.env("AWS_ACCESS_KEY_ID")?;
        let secret_key = loader.env("AWS_SECRET_ACCESS_KEY")?;
        let mut creds = Self::new(access_key, secret_key);
        if let Some(token) = loader.env("AWS_SESSION_TOKEN") {
            creds = creds.with_session_token(token);
        }
        Some(creds)
    }

    /// Read one profile from an INI credentials file. A missing file is
    /// not an error.
    pub fn from_shared_file(path: &Path, profile: &str) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)?;
        Ok(parse_profile(&content, profile))
    }

    fn shared_credentials_path(loader: &ConfigLoader) -> Option<PathBuf> {
        if let Some(path) = loader.env("AWS_SHARED_CREDENTIALS_FILE") {
            return Some(PathBuf::from(path));
        }
        dirs::home_dir().map(|home| home.join(".aws").join("credentials"))
    }
}

/// Minimal INI reader for `[name]` / `[profile name]` sections.
fn parse_profile(content: &str, profile: &str) -> Option<Credentials> {
    let mut in_section = false;
    let mut access_key = None;
    let mut secret_key = None;
    let mut token = None;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            let header = header.trim();
            let name = header.strip_prefix("profile ").unwrap_or(header).trim();
            in_section = name == profile;
            continue;
        }

        if !in_section {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            let value = value.trim().to_string();
            match key.trim() {
                "aws_access_key_id" => access_key = Some(value),
                "aws_secret_access_key" => secret_key = Some(value),
                "aws_session_token" => token = Some(value),
                _ => {}
            }
        }
    }

    let mut creds = Credentials::new(&access_key?, &secret_key?);
    if let Some(token) = token {
        creds = creds.with_session_token(&token);
    }
    Some(creds)
}
