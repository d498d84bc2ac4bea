// file: src/commands/key_pairs.rs
// version: 1.0.0
// guid: c2d3e4f5-a6b7-4c8d-9e0f-1a2b3c4d5e6f

//! EC2 key pairs

use crate::error::{Ec2CmdError, Result};
use crate::operation::{Ec2Operation, Mutability, OperationDescriptor};
use crate::transport::xml::ItemList;
use crate::transport::{add_list, add_optional, QueryParams};
use chrono::{DateTime, Utc};
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    Rsa,
    Ed25519,
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rsa => "rsa",
            Self::Ed25519 => "ed25519",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum KeyFormat {
    Pem,
    Ppk,
}

impl fmt::Display for KeyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pem => "pem",
            Self::Ppk => "ppk",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "PascalCase", deserialize = "camelCase"))]
pub struct Tag {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

/// The private key is only ever returned here.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "PascalCase", deserialize = "camelCase"))]
pub struct CreatedKeyPair {
    pub key_name: String,
    pub key_fingerprint: String,
    pub key_material: String,
    pub key_pair_id: String,
    #[serde(rename(deserialize = "tagSet"), default)]
    pub tags: ItemList<Tag>,
}

impl fmt::Debug for CreatedKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreatedKeyPair")
            .field("key_name", &self.key_name)
            .field("key_fingerprint", &self.key_fingerprint)
            .field("key_material", &"** redacted **")
            .field("key_pair_id", &self.key_pair_id)
            .field("tags", &self.tags)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedKeyPair {
    #[serde(rename(serialize = "Return", deserialize = "return"))]
    pub return_value: bool,
    #[serde(
        rename(serialize = "KeyPairId", deserialize = "keyPairId"),
        default
    )]
    pub key_pair_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "PascalCase", deserialize = "camelCase"))]
pub struct KeyPairInfo {
    #[serde(default)]
    pub key_pair_id: Option<String>,
    #[serde(default)]
    pub key_type: Option<String>,
    #[serde(rename(deserialize = "tagSet"), default)]
    pub tags: ItemList<Tag>,
    pub key_name: String,
    #[serde(default)]
    pub key_fingerprint: Option<String>,
    /// Only present when `IncludePublicKey` was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    #[serde(default)]
    pub create_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "PascalCase", deserialize = "camelCase"))]
pub struct DescribeKeyPairsResponse {
    #[serde(rename(deserialize = "keySet"), default)]
    pub key_pairs: ItemList<KeyPairInfo>,
}

/// Create a key pair; AWS keeps the public key, the private key is printed once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Args)]
#[serde(rename_all = "PascalCase")]
pub struct CreateKeyPair {
    /// Unique name for the key pair
    #[arg(long)]
    pub key_name: String,

    #[arg(long, value_enum)]
    pub key_type: Option<KeyType>,

    #[arg(long, value_enum)]
    pub key_format: Option<KeyFormat>,
}

impl CreateKeyPair {
    pub fn new(key_name: impl Into<String>) -> Self {
        Self {
            key_name: key_name.into(),
            key_type: None,
            key_format: None,
        }
    }
}

impl Ec2Operation for CreateKeyPair {
    type Response = CreatedKeyPair;

    const DESCRIPTOR: OperationDescriptor = OperationDescriptor {
        command: "create-key-pair",
        action: "CreateKeyPair",
        summary: "Create a key pair and print its private key",
        mutability: Mutability::Mutating,
        default_selector: "*",
        parameters: &["KeyName", "KeyType", "KeyFormat"],
        response_fields: &["KeyName", "KeyFingerprint", "KeyMaterial", "KeyPairId", "Tags"],
    };

    fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.insert("KeyName".to_string(), self.key_name.clone());
        add_optional(&mut params, "KeyType", self.key_type.as_ref());
        add_optional(&mut params, "KeyFormat", self.key_format.as_ref());
        params
    }

    fn validate(&self) -> Result<()> {
        if self.key_name.trim().is_empty() {
            return Err(Ec2CmdError::invalid_argument("KeyName must not be empty"));
        }
        Ok(())
    }

    fn target(&self) -> String {
        self.key_name.clone()
    }
}

/// Delete a key pair by name or ID
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Args)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteKeyPair {
    #[arg(long)]
    pub key_name: Option<String>,

    #[arg(long)]
    pub key_pair_id: Option<String>,
}

impl Ec2Operation for DeleteKeyPair {
    type Response = DeletedKeyPair;

    const DESCRIPTOR: OperationDescriptor = OperationDescriptor {
        command: "delete-key-pair",
        action: "DeleteKeyPair",
        summary: "Delete a key pair",
        mutability: Mutability::Mutating,
        default_selector: "*",
        parameters: &["KeyName", "KeyPairId"],
        response_fields: &["Return", "KeyPairId"],
    };

    fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        add_optional(&mut params, "KeyName", self.key_name.as_ref());
        add_optional(&mut params, "KeyPairId", self.key_pair_id.as_ref());
        params
    }

    fn validate(&self) -> Result<()> {
        let bound = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        if !bound(&self.key_name) && !bound(&self.key_pair_id) {
            return Err(Ec2CmdError::invalid_argument(
                "delete-key-pair requires KeyName or KeyPairId",
            ));
        }
        Ok(())
    }

    fn target(&self) -> String {
        match (&self.key_pair_id, &self.key_name) {
            (Some(id), _) => id.clone(),
            (None, Some(name)) => name.clone(),
            (None, None) => String::new(),
        }
    }
}

/// Describe key pairs, optionally filtered by name or ID
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Args)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeKeyPairs {
    #[arg(long = "key-name")]
    pub key_names: Vec<String>,

    #[arg(long = "key-pair-id")]
    pub key_pair_ids: Vec<String>,

    /// Include the public key material in the response
    #[arg(long)]
    pub include_public_key: bool,
}

impl Ec2Operation for DescribeKeyPairs {
    type Response = DescribeKeyPairsResponse;

    const DESCRIPTOR: OperationDescriptor = OperationDescriptor {
        command: "describe-key-pairs",
        action: "DescribeKeyPairs",
        summary: "Describe key pairs",
        mutability: Mutability::ReadOnly,
        default_selector: "KeyPairs",
        parameters: &["KeyNames", "KeyPairIds", "IncludePublicKey"],
        response_fields: &["KeyPairs"],
    };

    fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        add_list(&mut params, "KeyName", &self.key_names);
        add_list(&mut params, "KeyPairId", &self.key_pair_ids);
        if self.include_public_key {
            params.insert("IncludePublicKey".to_string(), "true".to_string());
        }
        params
    }
}
