// file: src/commands/ebs.rs
// version: 1.0.0
// guid: 0f0f4d5c-7a55-4a4b-9a3e-6a3c2bb3b1d2

//! EBS account defaults: encryption by default and the default KMS key

use crate::error::{Ec2CmdError, Result};
use crate::operation::{Ec2Operation, Mutability, OperationDescriptor};
use crate::transport::QueryParams;
use clap::Args;
use serde::{Deserialize, Serialize};

/// `ebsEncryptionByDefault` returned by the enable and disable actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "PascalCase", deserialize = "camelCase"))]
pub struct EbsEncryptionByDefault {
    pub ebs_encryption_by_default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "PascalCase", deserialize = "camelCase"))]
pub struct EbsEncryptionStatus {
    pub ebs_encryption_by_default: bool,
    #[serde(default)]
    pub sse_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "PascalCase", deserialize = "camelCase"))]
pub struct EbsDefaultKmsKey {
    #[serde(default)]
    pub kms_key_id: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct DisableEbsEncryptionByDefault;

impl Ec2Operation for DisableEbsEncryptionByDefault {
    type Response = EbsEncryptionByDefault;

    const DESCRIPTOR: OperationDescriptor = OperationDescriptor {
        command: "disable-ebs-encryption-by-default",
        action: "DisableEbsEncryptionByDefault",
        summary: "Disable EBS encryption by default for new volumes",
        mutability: Mutability::Mutating,
        default_selector: "EbsEncryptionByDefault",
        parameters: &[],
        response_fields: &["EbsEncryptionByDefault"],
    };
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct EnableEbsEncryptionByDefault;

impl Ec2Operation for EnableEbsEncryptionByDefault {
    type Response = EbsEncryptionByDefault;

    const DESCRIPTOR: OperationDescriptor = OperationDescriptor {
        command: "enable-ebs-encryption-by-default",
        action: "EnableEbsEncryptionByDefault",
        summary: "Enable EBS encryption by default for new volumes",
        mutability: Mutability::Mutating,
        default_selector: "EbsEncryptionByDefault",
        parameters: &[],
        response_fields: &["EbsEncryptionByDefault"],
    };
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct GetEbsEncryptionByDefault;

impl Ec2Operation for GetEbsEncryptionByDefault {
    type Response = EbsEncryptionStatus;

    const DESCRIPTOR: OperationDescriptor = OperationDescriptor {
        command: "get-ebs-encryption-by-default",
        action: "GetEbsEncryptionByDefault",
        summary: "Show whether EBS encryption by default is enabled",
        mutability: Mutability::ReadOnly,
        default_selector: "EbsEncryptionByDefault",
        parameters: &[],
        response_fields: &["EbsEncryptionByDefault", "SseType"],
    };
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct GetEbsDefaultKmsKeyId;

impl Ec2Operation for GetEbsDefaultKmsKeyId {
    type Response = EbsDefaultKmsKey;

    const DESCRIPTOR: OperationDescriptor = OperationDescriptor {
        command: "get-ebs-default-kms-key-id",
        action: "GetEbsDefaultKmsKeyId",
        summary: "Show the default KMS key used for EBS encryption",
        mutability: Mutability::ReadOnly,
        default_selector: "KmsKeyId",
        parameters: &[],
        response_fields: &["KmsKeyId"],
    };
}

/// Change the default KMS key for EBS encryption
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Args)]
#[serde(rename_all = "PascalCase")]
pub struct ModifyEbsDefaultKmsKeyId {
    /// Key ID, key ARN, alias name or alias ARN
    #[arg(long)]
    pub kms_key_id: String,
}

impl ModifyEbsDefaultKmsKeyId {
    pub fn new(kms_key_id: impl Into<String>) -> Self {
        Self {
            kms_key_id: kms_key_id.into(),
        }
    }
}

impl Ec2Operation for ModifyEbsDefaultKmsKeyId {
    type Response = EbsDefaultKmsKey;

    const DESCRIPTOR: OperationDescriptor = OperationDescriptor {
        command: "modify-ebs-default-kms-key-id",
        action: "ModifyEbsDefaultKmsKeyId",
        summary: "Change the default KMS key used for EBS encryption",
        mutability: Mutability::Mutating,
        default_selector: "KmsKeyId",
        parameters: &["KmsKeyId"],
        response_fields: &["KmsKeyId"],
    };

    fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.insert("KmsKeyId".to_string(), self.kms_key_id.clone());
        params
    }

    fn validate(&self) -> Result<()> {
        if self.kms_key_id.trim().is_empty() {
            return Err(Ec2CmdError::invalid_argument("KmsKeyId must not be empty"));
        }
        Ok(())
    }

    fn target(&self) -> String {
        self.kms_key_id.clone()
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ResetEbsDefaultKmsKeyId;

impl Ec2Operation for ResetEbsDefaultKmsKeyId {
    type Response = EbsDefaultKmsKey;

    const DESCRIPTOR: OperationDescriptor = OperationDescriptor {
        command: "reset-ebs-default-kms-key-id",
        action: "ResetEbsDefaultKmsKeyId",
        summary: "Reset the default EBS KMS key to the AWS managed key",
        mutability: Mutability::Mutating,
        default_selector: "KmsKeyId",
        parameters: &[],
        response_fields: &["KmsKeyId"],
    };
}
