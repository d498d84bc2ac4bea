// file: src/cli/commands.rs
// version: 2.0.0
// guid: g7h8i9j0-k1l2-3456-7890-123456ghijkl

//! Command implementations for the CLI

use super::args::{Cli, Commands, OutputFormat};
use super::output::{render, render_listing};
use crate::adapter::{CommandAdapter, InvocationContext, Outcome};
use crate::commands::{
    allowed_images, ebs, image_block, metadata_defaults, serial_console, snapshot_block,
    ALL_DESCRIPTORS,
};
use crate::config::{ConfigLoader, Credentials, Settings};
use crate::error::{Ec2CmdError, Result};
use crate::host::{ConfirmationHost, ConsoleHost};
use crate::logging::with_async_operation_span;
use crate::operation::Ec2Operation;
use crate::transport::{Ec2Transport, HttpTransport};
use std::io::IsTerminal;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Per-invocation flags shared by every subcommand
#[derive(Debug, Clone, Default)]
pub struct InvocationOptions {
    pub selector: Option<String>,
    pub force: bool,
    pub what_if: bool,
    pub cancel: CancellationToken,
}

impl InvocationOptions {
    pub fn from_cli(cli: &Cli, cancel: CancellationToken) -> Self {
        Self {
            selector: cli.select.clone(),
            force: cli.force,
            what_if: cli.what_if,
            cancel,
        }
    }
}

/// Run the parsed command line to completion
pub async fn run(cli: Cli, cancel: CancellationToken) -> Result<()> {
    if let Commands::ListCommands = cli.command {
        print!("{}", render_listing(ALL_DESCRIPTORS, std::io::stdout().is_terminal()));
        return Ok(());
    }

    let loader = ConfigLoader::new();
    let settings = resolve_settings(&cli, &loader)?;
    let credentials =
        Credentials::resolve(&loader, settings.profile.as_deref(), cli.profile.is_some())?;
    let transport = HttpTransport::new(&settings, &credentials)?;
    debug!("Using EC2 endpoint {}", transport.endpoint());

    let adapter = CommandAdapter::new(transport, ConsoleHost::new())
        .with_confirm_mutations(settings.confirm_mutations);
    let options = InvocationOptions::from_cli(&cli, cancel);

    let outcome = dispatch(&adapter, cli.command, &options).await?;
    print_outcome(&outcome, cli.output)
}

/// Layered settings with the command-line flags applied last
pub fn resolve_settings(cli: &Cli, loader: &ConfigLoader) -> Result<Settings> {
    let mut settings = loader.resolve_settings(cli.config.as_deref())?;

    if let Some(ref region) = cli.region {
        settings.region = Some(region.clone());
    }
    if let Some(ref profile) = cli.profile {
        settings.profile = Some(profile.clone());
    }
    if let Some(ref endpoint) = cli.endpoint_url {
        settings.endpoint_url = Some(endpoint.clone());
    }

    settings.validate()?;
    Ok(settings)
}

/// Route a subcommand to its operation
pub async fn dispatch<T, H>(
    adapter: &CommandAdapter<T, H>,
    command: Commands,
    options: &InvocationOptions,
) -> Result<Outcome>
where
    T: Ec2Transport,
    H: ConfirmationHost + 'static,
{
    match command {
        Commands::DisableEbsEncryptionByDefault => {
            invoke(adapter, ebs::DisableEbsEncryptionByDefault, options).await
        }
        Commands::EnableEbsEncryptionByDefault => {
            invoke(adapter, ebs::EnableEbsEncryptionByDefault, options).await
        }
        Commands::GetEbsEncryptionByDefault => {
            invoke(adapter, ebs::GetEbsEncryptionByDefault, options).await
        }
        Commands::GetEbsDefaultKmsKeyId => {
            invoke(adapter, ebs::GetEbsDefaultKmsKeyId, options).await
        }
        Commands::ModifyEbsDefaultKmsKeyId(request) => invoke(adapter, request, options).await,
        Commands::ResetEbsDefaultKmsKeyId => {
            invoke(adapter, ebs::ResetEbsDefaultKmsKeyId, options).await
        }
        Commands::DisableSerialConsoleAccess => {
            invoke(adapter, serial_console::DisableSerialConsoleAccess, options).await
        }
        Commands::EnableSerialConsoleAccess => {
            invoke(adapter, serial_console::EnableSerialConsoleAccess, options).await
        }
        Commands::GetSerialConsoleAccessStatus => {
            invoke(adapter, serial_console::GetSerialConsoleAccessStatus, options).await
        }
        Commands::DisableImageBlockPublicAccess => {
            invoke(adapter, image_block::DisableImageBlockPublicAccess, options).await
        }
        Commands::EnableImageBlockPublicAccess(request) => {
            invoke(adapter, request, options).await
        }
        Commands::GetImageBlockPublicAccessState => {
            invoke(adapter, image_block::GetImageBlockPublicAccessState, options).await
        }
        Commands::DisableSnapshotBlockPublicAccess => {
            invoke(adapter, snapshot_block::DisableSnapshotBlockPublicAccess, options).await
        }
        Commands::EnableSnapshotBlockPublicAccess(request) => {
            invoke(adapter, request, options).await
        }
        Commands::GetSnapshotBlockPublicAccessState => {
            invoke(adapter, snapshot_block::GetSnapshotBlockPublicAccessState, options).await
        }
        Commands::DisableAllowedImagesSettings => {
            invoke(adapter, allowed_images::DisableAllowedImagesSettings, options).await
        }
        Commands::EnableAllowedImagesSettings(request) => invoke(adapter, request, options).await,
        Commands::GetAllowedImagesSettings => {
            invoke(adapter, allowed_images::GetAllowedImagesSettings, options).await
        }
        Commands::GetInstanceMetadataDefaults => {
            invoke(adapter, metadata_defaults::GetInstanceMetadataDefaults, options).await
        }
        Commands::ModifyInstanceMetadataDefaults(request) => {
            invoke(adapter, request, options).await
        }
        Commands::CreateKeyPair(request) => invoke(adapter, request, options).await,
        Commands::DeleteKeyPair(request) => invoke(adapter, request, options).await,
        Commands::DescribeKeyPairs(request) => invoke(adapter, request, options).await,
        Commands::ListCommands => Err(Ec2CmdError::invalid_argument(
            "list-commands does not call EC2",
        )),
    }
}

async fn invoke<O, T, H>(
    adapter: &CommandAdapter<T, H>,
    request: O,
    options: &InvocationOptions,
) -> Result<Outcome>
where
    O: Ec2Operation,
    T: Ec2Transport,
    H: ConfirmationHost + 'static,
{
    let mut ctx = InvocationContext::new(request)
        .with_force(options.force)
        .with_what_if(options.what_if)
        .with_cancellation(options.cancel.clone());
    if let Some(ref selector) = options.selector {
        ctx = ctx.with_selector(selector.clone());
    }

    info!("Running {}", O::DESCRIPTOR);
    with_async_operation_span(O::DESCRIPTOR.command, || adapter.invoke(ctx)).await
}

fn print_outcome(outcome: &Outcome, format: OutputFormat) -> Result<()> {
    match outcome {
        Outcome::Completed(value) => {
            if let Some(text) = render(value, format)? {
                println!("{}", text);
            }
        }
        Outcome::WhatIf(description) => println!("{}", description),
        Outcome::Declined => info!("Operation declined; nothing was changed"),
    }
    Ok(())
}
