// file: src/commands/image_block.rs
// version: 1.0.0
// guid: 9e3b7f4c-1b2a-4d7e-8c3f-5a6b7c8d9e01

//! Block public access for AMIs

use crate::operation::{Ec2Operation, Mutability, OperationDescriptor};
use crate::transport::QueryParams;
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fmt;

/// State accepted by `EnableImageBlockPublicAccess`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ImageBlockPublicAccessState {
    BlockNewSharing,
}

impl ImageBlockPublicAccessState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BlockNewSharing => "block-new-sharing",
        }
    }
}

impl fmt::Display for ImageBlockPublicAccessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "PascalCase", deserialize = "camelCase"))]
pub struct ImageBlockPublicAccess {
    pub image_block_public_access_state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed_by: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct DisableImageBlockPublicAccess;

impl Ec2Operation for DisableImageBlockPublicAccess {
    type Response = ImageBlockPublicAccess;

    const DESCRIPTOR: OperationDescriptor = OperationDescriptor {
        command: "disable-image-block-public-access",
        action: "DisableImageBlockPublicAccess",
        summary: "Allow AMIs in the region to be shared publicly",
        mutability: Mutability::Mutating,
        default_selector: "ImageBlockPublicAccessState",
        parameters: &[],
        response_fields: &["ImageBlockPublicAccessState"],
    };
}

/// Block public sharing of AMIs in the region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Args)]
#[serde(rename_all = "PascalCase")]
pub struct EnableImageBlockPublicAccess {
    #[arg(long, value_enum, default_value_t = ImageBlockPublicAccessState::BlockNewSharing)]
    pub image_block_public_access_state: ImageBlockPublicAccessState,
}

impl Default for EnableImageBlockPublicAccess {
    fn default() -> Self {
        Self {
            image_block_public_access_state: ImageBlockPublicAccessState::BlockNewSharing,
        }
    }
}

impl Ec2Operation for EnableImageBlockPublicAccess {
    type Response = ImageBlockPublicAccess;

    const DESCRIPTOR: OperationDescriptor = OperationDescriptor {
        command: "enable-image-block-public-access",
        action: "EnableImageBlockPublicAccess",
        summary: "Prevent AMIs in the region from being shared publicly",
        mutability: Mutability::Mutating,
        default_selector: "ImageBlockPublicAccessState",
        parameters: &["ImageBlockPublicAccessState"],
        response_fields: &["ImageBlockPublicAccessState"],
    };

    fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.insert(
            "ImageBlockPublicAccessState".to_string(),
            self.image_block_public_access_state.to_string(),
        );
        params
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct GetImageBlockPublicAccessState;

impl Ec2Operation for GetImageBlockPublicAccessState {
    type Response = ImageBlockPublicAccess;

    const DESCRIPTOR: OperationDescriptor = OperationDescriptor {
        command: "get-image-block-public-access-state",
        action: "GetImageBlockPublicAccessState",
        summary: "Show the AMI block public access state",
        mutability: Mutability::ReadOnly,
        default_selector: "ImageBlockPublicAccessState",
        parameters: &[],
        response_fields: &["ImageBlockPublicAccessState", "ManagedBy"],
    };
}
