// file: src/lib.rs
// version: 1.0.0
// guid: 7dc11597-30a2-433e-aee0-fe17be399b83

//! # ec2-cmd
//!
//! Command adapters for Amazon EC2. Every command maps one CLI subcommand to
//! exactly one EC2 API call: bind parameters into a request, confirm when the
//! call mutates account state, send it through a transport, and project the
//! response through an output selector.
//!
//! The dispatch contract lives in [`adapter`]; each EC2 operation is a typed
//! request implementing [`operation::Ec2Operation`] under [`commands`].

pub mod adapter;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod operation;
pub mod selector;
pub mod transport;

pub use adapter::{CommandAdapter, InvocationContext, InvocationState, Outcome};
pub use error::{Ec2CmdError, Result};
pub use operation::{Ec2Operation, OperationDescriptor};
pub use selector::OutputSelector;

/// Version information for the utility
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
