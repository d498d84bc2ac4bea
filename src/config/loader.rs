// file: src/config/loader.rs
// version: 1.0.0
// guid: 1420232f-a0bf-4c14-a7ef-8fe096d4d68f

//! Configuration file loading and environment variable substitution

use super::Settings;
use crate::error::{Ec2CmdError, Result};
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "EC2CMD_CONFIG";

/// Configuration loader with environment variable substitution
pub struct ConfigLoader {
    env_vars: HashMap<String, String>,
}

impl ConfigLoader {
    /// Create a new config loader over the process environment
    pub fn new() -> Self {
        Self {
            env_vars: std::env::vars().collect(),
        }
    }

    /// Create a loader that sees only the given variables
    pub fn with_env(env_vars: HashMap<String, String>) -> Self {
        Self { env_vars }
    }

    /// Set environment variable for substitution and overrides
    pub fn set_env_var(&mut self, key: String, value: String) {
        self.env_vars.insert(key, value);
    }

    /// Look up a non-empty variable
    pub fn env(&self, key: &str) -> Option<&str> {
        self.env_vars
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// Defaults, then the config file, then environment overrides.
    ///
    /// An explicit path must exist. Without one, `$EC2CMD_CONFIG` and then
    /// the per-user config file are used when present.
    pub fn resolve_settings(&self, explicit: Option<&Path>) -> Result<Settings> {
        let mut settings = match explicit {
            Some(path) => self.load_settings(path)?,
            None => match self.discover_config_path() {
                Some(path) => self.load_settings(&path)?,
                None => Settings::default(),
            },
        };

        self.apply_env_overrides(&mut settings);
        debug!("Resolved settings: {:?}", settings);
        Ok(settings)
    }

    /// Load settings from a YAML file
    pub fn load_settings<P: AsRef<Path>>(&self, path: P) -> Result<Settings> {
        let path = path.as_ref();
        info!("Loading configuration from {}", path.display());

        let content = fs::read_to_string(path).map_err(|e| {
            Ec2CmdError::config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let expanded = self.expand_env_vars(&content)?;
        if expanded.trim().is_empty() {
            return Ok(Settings::default());
        }
        let settings: Settings = serde_yaml::from_str(&expanded)?;
        settings.validate()?;

        Ok(settings)
    }

    /// Per-user config file location
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ec2cmd").join("config.yaml"))
    }

    fn discover_config_path(&self) -> Option<PathBuf> {
        if let Some(path) = self.env(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        Self::default_config_path().filter(|path| path.exists())
    }

    /// Apply the standard AWS environment variables
    fn apply_env_overrides(&self, settings: &mut Settings) {
        if let Some(region) = self.env("AWS_REGION").or_else(|| self.env("AWS_DEFAULT_REGION")) {
            settings.region = Some(region.to_string());
        }

        if let Some(profile) = self.env("AWS_PROFILE") {
            settings.profile = Some(profile.to_string());
        }

        if let Some(endpoint) = self
            .env("AWS_ENDPOINT_URL_EC2")
            .or_else(|| self.env("AWS_ENDPOINT_URL"))
        {
            settings.endpoint_url = Some(endpoint.to_string());
        }

        if let Some(attempts) = self
            .env("AWS_MAX_ATTEMPTS")
            .and_then(|v| v.parse::<u32>().ok())
        {
            settings.retry.max_attempts = attempts;
        }
    }

    /// Expand `${VAR}` references in configuration content
    fn expand_env_vars(&self, content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| Ec2CmdError::config(format!("Invalid regex pattern: {}", e)))?;

        let mut result = content.to_string();
        let mut missing_vars = Vec::new();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];

            if let Some(value) = self.env_vars.get(var_name) {
                result = result.replace(placeholder, value);
            } else if !missing_vars.iter().any(|m| m == var_name) {
                missing_vars.push(var_name.to_string());
            }
        }

        if !missing_vars.is_empty() {
            return Err(Ec2CmdError::config(format!(
                "Missing environment variables: {}",
                missing_vars.join(", ")
            )));
        }

        Ok(result)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
