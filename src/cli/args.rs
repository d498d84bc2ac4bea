// file: src/cli/args.rs
// version: 2.0.0
// guid: f6g7h8i9-j0k1-2345-6789-012345fghijk

//! Command line argument definitions

use crate::commands::{
    allowed_images::EnableAllowedImagesSettings,
    ebs::ModifyEbsDefaultKmsKeyId,
    image_block::EnableImageBlockPublicAccess,
    key_pairs::{CreateKeyPair, DeleteKeyPair, DescribeKeyPairs},
    metadata_defaults::ModifyInstanceMetadataDefaults,
    snapshot_block::EnableSnapshotBlockPublicAccess,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ec2cmd")]
#[command(about = "Run single Amazon EC2 account-setting and key pair operations")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Skip the confirmation prompt for mutating commands
    #[arg(long, global = true)]
    pub force: bool,

    /// Output selector: `*`, a response field such as `State`, or `^Param`
    #[arg(long, global = true, value_name = "EXPR")]
    pub select: Option<String>,

    /// Describe what a mutating command would do without calling EC2
    #[arg(long, global = true)]
    pub what_if: bool,

    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Profile in the shared credentials file
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// Send requests to this endpoint instead of the regional one
    #[arg(long, global = true, value_name = "URL")]
    pub endpoint_url: Option<String>,

    /// Path to a YAML config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit diagnostics as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Disable EBS encryption by default for new volumes
    DisableEbsEncryptionByDefault,

    /// Enable EBS encryption by default for new volumes
    EnableEbsEncryptionByDefault,

    /// Show whether EBS encryption by default is enabled
    GetEbsEncryptionByDefault,

    /// Show the default KMS key used for EBS encryption
    GetEbsDefaultKmsKeyId,

    /// Change the default KMS key used for EBS encryption
    ModifyEbsDefaultKmsKeyId(ModifyEbsDefaultKmsKeyId),

    /// Reset the default EBS KMS key to the AWS managed key
    ResetEbsDefaultKmsKeyId,

    /// Disable access to the EC2 serial console
    DisableSerialConsoleAccess,

    /// Enable access to the EC2 serial console
    EnableSerialConsoleAccess,

    /// Show whether EC2 serial console access is enabled
    GetSerialConsoleAccessStatus,

    /// Allow AMIs in the region to be shared publicly
    DisableImageBlockPublicAccess,

    /// Prevent AMIs in the region from being shared publicly
    EnableImageBlockPublicAccess(EnableImageBlockPublicAccess),

    /// Show the AMI block public access state
    GetImageBlockPublicAccessState,

    /// Allow EBS snapshots in the region to be shared publicly
    DisableSnapshotBlockPublicAccess,

    /// Block public sharing of EBS snapshots in the region
    EnableSnapshotBlockPublicAccess(EnableSnapshotBlockPublicAccess),

    /// Show the EBS snapshot block public access state
    GetSnapshotBlockPublicAccessState,

    /// Stop restricting AMI discovery and use to allowed images
    DisableAllowedImagesSettings,

    /// Restrict AMI discovery and use to allowed images
    EnableAllowedImagesSettings(EnableAllowedImagesSettings),

    /// Show the allowed AMIs setting and its criteria
    GetAllowedImagesSettings,

    /// Show account-level instance metadata defaults
    GetInstanceMetadataDefaults,

    /// Change account-level instance metadata defaults
    ModifyInstanceMetadataDefaults(ModifyInstanceMetadataDefaults),

    /// Create a key pair and print its private key
    CreateKeyPair(CreateKeyPair),

    /// Delete a key pair
    DeleteKeyPair(DeleteKeyPair),

    /// Describe key pairs
    DescribeKeyPairs(DescribeKeyPairs),

    /// List every command with its EC2 action and default selector
    ListCommands,
}

/// How results are written to stdout
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Strings raw, other values as pretty JSON
    #[default]
    Text,
    /// Always JSON
    Json,
}
