// file: src/commands/allowed_images.rs
// version: 1.0.0
// guid: a4c6e8f0-2b3d-4f5a-9c7e-1d2f3a4b5c67

//! Allowed AMIs settings.
//!
//! Criteria themselves are managed elsewhere; these commands only toggle the
//! setting and report it.

use crate::operation::{Ec2Operation, Mutability, OperationDescriptor};
use crate::transport::xml::ItemList;
use crate::transport::QueryParams;
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum AllowedImagesSettingsState {
    Enabled,
    AuditMode,
}

impl AllowedImagesSettingsState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enabled => "enabled",
            Self::AuditMode => "audit-mode",
        }
    }
}

impl fmt::Display for AllowedImagesSettingsState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by the enable and disable actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "PascalCase", deserialize = "camelCase"))]
pub struct AllowedImagesSettingsChange {
    pub allowed_images_settings_state: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "PascalCase", deserialize = "camelCase"))]
pub struct ImageCriterion {
    #[serde(rename(deserialize = "imageProviderSet"), default)]
    pub image_providers: ItemList<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "PascalCase", deserialize = "camelCase"))]
pub struct AllowedImagesSettings {
    pub state: String,
    #[serde(rename(deserialize = "imageCriterionSet"), default)]
    pub image_criteria: ItemList<ImageCriterion>,
    #[serde(default)]
    pub managed_by: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct DisableAllowedImagesSettings;

impl Ec2Operation for DisableAllowedImagesSettings {
    type Response = AllowedImagesSettingsChange;

    const DESCRIPTOR: OperationDescriptor = OperationDescriptor {
        command: "disable-allowed-images-settings",
        action: "DisableAllowedImagesSettings",
        summary: "Stop restricting AMI discovery and use to allowed images",
        mutability: Mutability::Mutating,
        default_selector: "AllowedImagesSettingsState",
        parameters: &[],
        response_fields: &["AllowedImagesSettingsState"],
    };
}

/// Restrict AMI discovery and use to the allowed images criteria
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Args)]
#[serde(rename_all = "PascalCase")]
pub struct EnableAllowedImagesSettings {
    /// `audit-mode` reports non-compliant AMIs without blocking them
    #[arg(long, value_enum)]
    pub allowed_images_settings_state: AllowedImagesSettingsState,
}

impl EnableAllowedImagesSettings {
    pub fn new(state: AllowedImagesSettingsState) -> Self {
        Self {
            allowed_images_settings_state: state,
        }
    }
}

impl Ec2Operation for EnableAllowedImagesSettings {
    type Response = AllowedImagesSettingsChange;

    const DESCRIPTOR: OperationDescriptor = OperationDescriptor {
        command: "enable-allowed-images-settings",
        action: "EnableAllowedImagesSettings",
        summary: "Restrict AMI discovery and use to allowed images",
        mutability: Mutability::Mutating,
        default_selector: "AllowedImagesSettingsState",
        parameters: &["AllowedImagesSettingsState"],
        response_fields: &["AllowedImagesSettingsState"],
    };

    fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.insert(
            "AllowedImagesSettingsState".to_string(),
            self.allowed_images_settings_state.to_string(),
        );
        params
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct GetAllowedImagesSettings;

impl Ec2Operation for GetAllowedImagesSettings {
    type Response = AllowedImagesSettings;

    const DESCRIPTOR: OperationDescriptor = OperationDescriptor {
        command: "get-allowed-images-settings",
        action: "GetAllowedImagesSettings",
        summary: "Show the allowed AMIs setting and its criteria",
        mutability: Mutability::ReadOnly,
        default_selector: "*",
        parameters: &[],
        response_fields: &["State", "ImageCriteria", "ManagedBy"],
    };
}
