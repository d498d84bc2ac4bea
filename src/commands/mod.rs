// file: src/commands/mod.rs
// version: 3.0.0
// guid: b3c95817-32f1-4e1c-8b34-78f6e85029dc

//! EC2 operations.
//!
//! Each submodule defines typed requests implementing
//! [`Ec2Operation`](crate::operation::Ec2Operation) together with their
//! response documents. [`ALL_DESCRIPTORS`] lists every operation for the CLI.

pub mod allowed_images;
pub mod ebs;
pub mod image_block;
pub mod key_pairs;
pub mod metadata_defaults;
pub mod serial_console;
pub mod snapshot_block;

use crate::operation::{Ec2Operation, OperationDescriptor};

/// Descriptors of every supported operation, in CLI listing order
pub const ALL_DESCRIPTORS: &[OperationDescriptor] = &[
    ebs::DisableEbsEncryptionByDefault::DESCRIPTOR,
    ebs::EnableEbsEncryptionByDefault::DESCRIPTOR,
    ebs::GetEbsEncryptionByDefault::DESCRIPTOR,
    ebs::GetEbsDefaultKmsKeyId::DESCRIPTOR,
    ebs::ModifyEbsDefaultKmsKeyId::DESCRIPTOR,
    ebs::ResetEbsDefaultKmsKeyId::DESCRIPTOR,
    serial_console::DisableSerialConsoleAccess::DESCRIPTOR,
    serial_console::EnableSerialConsoleAccess::DESCRIPTOR,
    serial_console::GetSerialConsoleAccessStatus::DESCRIPTOR,
    image_block::DisableImageBlockPublicAccess::DESCRIPTOR,
    image_block::EnableImageBlockPublicAccess::DESCRIPTOR,
    image_block::GetImageBlockPublicAccessState::DESCRIPTOR,
    snapshot_block::DisableSnapshotBlockPublicAccess::DESCRIPTOR,
    snapshot_block::EnableSnapshotBlockPublicAccess::DESCRIPTOR,
    snapshot_block::GetSnapshotBlockPublicAccessState::DESCRIPTOR,
    allowed_images::DisableAllowedImagesSettings::DESCRIPTOR,
    allowed_images::EnableAllowedImagesSettings::DESCRIPTOR,
    allowed_images::GetAllowedImagesSettings::DESCRIPTOR,
    metadata_defaults::GetInstanceMetadataDefaults::DESCRIPTOR,
    metadata_defaults::ModifyInstanceMetadataDefaults::DESCRIPTOR,
    key_pairs::CreateKeyPair::DESCRIPTOR,
    key_pairs::DeleteKeyPair::DESCRIPTOR,
    key_pairs::DescribeKeyPairs::DESCRIPTOR,
];

/// Look up a descriptor by CLI command name
pub fn find_descriptor(command: &str) -> Option<&'static OperationDescriptor> {
    ALL_DESCRIPTORS.iter().find(|d| d.command == command)
}
