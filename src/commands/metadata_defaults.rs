// file: src/commands/metadata_defaults.rs
// version: 1.0.0
// guid: 6b7c8d9e-0f1a-4b2c-8d3e-4f5a6b7c8d90

//! Account-level instance metadata service defaults

use crate::error::{Ec2CmdError, Result};
use crate::operation::{Ec2Operation, Mutability, OperationDescriptor};
use crate::transport::{add_optional, QueryParams};
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hop limit the service accepts; `-1` means no preference.
const HOP_LIMIT_RANGE: std::ops::RangeInclusive<i32> = 1..=64;
const HOP_LIMIT_NO_PREFERENCE: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum HttpTokensState {
    Optional,
    Required,
    NoPreference,
}

impl fmt::Display for HttpTokensState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Optional => "optional",
            Self::Required => "required",
            Self::NoPreference => "no-preference",
        })
    }
}

/// Used for both `HttpEndpoint` and `InstanceMetadataTags`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DefaultToggle {
    Enabled,
    Disabled,
    NoPreference,
}

impl fmt::Display for DefaultToggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
            Self::NoPreference => "no-preference",
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "PascalCase", deserialize = "camelCase"))]
pub struct InstanceMetadataDefaults {
    #[serde(default)]
    pub http_tokens: Option<String>,
    #[serde(default)]
    pub http_put_response_hop_limit: Option<i32>,
    #[serde(default)]
    pub http_endpoint: Option<String>,
    #[serde(default)]
    pub instance_metadata_tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "PascalCase", deserialize = "camelCase"))]
pub struct InstanceMetadataDefaultsResponse {
    /// Absent when no account-level defaults are set
    #[serde(default)]
    pub account_level: Option<InstanceMetadataDefaults>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifyInstanceMetadataDefaultsResponse {
    #[serde(rename(serialize = "Return", deserialize = "return"))]
    pub return_value: bool,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct GetInstanceMetadataDefaults;

impl Ec2Operation for GetInstanceMetadataDefaults {
    type Response = InstanceMetadataDefaultsResponse;

    const DESCRIPTOR: OperationDescriptor = OperationDescriptor {
        command: "get-instance-metadata-defaults",
        action: "GetInstanceMetadataDefaults",
        summary: "Show account-level instance metadata defaults",
        mutability: Mutability::ReadOnly,
        default_selector: "AccountLevel",
        parameters: &[],
        response_fields: &["AccountLevel"],
    };
}

/// Change account-level IMDS defaults for new instances in the region.
///
/// Unset options are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Args)]
#[serde(rename_all = "PascalCase")]
pub struct ModifyInstanceMetadataDefaults {
    #[arg(long, value_enum)]
    pub http_tokens: Option<HttpTokensState>,

    /// 1-64, or -1 for no preference
    #[arg(long, allow_negative_numbers = true)]
    pub http_put_response_hop_limit: Option<i32>,

    #[arg(long, value_enum)]
    pub http_endpoint: Option<DefaultToggle>,

    #[arg(long, value_enum)]
    pub instance_metadata_tags: Option<DefaultToggle>,
}

impl Ec2Operation for ModifyInstanceMetadataDefaults {
    type Response = ModifyInstanceMetadataDefaultsResponse;

    const DESCRIPTOR: OperationDescriptor = OperationDescriptor {
        command: "modify-instance-metadata-defaults",
        action: "ModifyInstanceMetadataDefaults",
        summary: "Change account-level instance metadata defaults",
        mutability: Mutability::Mutating,
        default_selector: "Return",
        parameters: &[
            "HttpTokens",
            "HttpPutResponseHopLimit",
            "HttpEndpoint",
            "InstanceMetadataTags",
        ],
        response_fields: &["Return"],
    };

    fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        add_optional(&mut params, "HttpTokens", self.http_tokens.as_ref());
        add_optional(
            &mut params,
            "HttpPutResponseHopLimit",
            self.http_put_response_hop_limit.as_ref(),
        );
        add_optional(&mut params, "HttpEndpoint", self.http_endpoint.as_ref());
        add_optional(
            &mut params,
            "InstanceMetadataTags",
            self.instance_metadata_tags.as_ref(),
        );
        params
    }

    fn validate(&self) -> Result<()> {
        if let Some(limit) = self.http_put_response_hop_limit {
            if limit != HOP_LIMIT_NO_PREFERENCE && !HOP_LIMIT_RANGE.contains(&limit) {
                return Err(Ec2CmdError::invalid_argument(format!(
                    "HttpPutResponseHopLimit must be between 1 and 64, or -1; got {}",
                    limit
                )));
            }
        }
        Ok(())
    }
}
