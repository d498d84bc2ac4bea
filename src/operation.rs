// file: src/operation.rs
// version: 1.0.0
// guid: fe2c87b4-daf8-40c9-a27a-b274bcddfcc0

//! Operation descriptors and the typed request contract

use crate::error::Result;
use crate::transport::{xml, QueryParams, TransportResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// Whether an operation changes account state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutability {
    ReadOnly,
    Mutating,
}

/// Static metadata of one command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationDescriptor {
    /// CLI subcommand name
    pub command: &'static str,
    /// EC2 Query API action
    pub action: &'static str,
    pub summary: &'static str,
    pub mutability: Mutability,
    /// Selector applied when the caller supplies none
    pub default_selector: &'static str,
    /// Request parameter names, as addressed by `^Name` selectors
    pub parameters: &'static [&'static str],
    /// Top-level response fields, as addressed by field selectors
    pub response_fields: &'static [&'static str],
}

impl OperationDescriptor {
    pub fn is_mutating(&self) -> bool {
        self.mutability == Mutability::Mutating
    }
}

impl fmt::Display for OperationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.command, self.action)
    }
}

/// A bound request for one EC2 action.
///
/// The request value serialises with the API's parameter names so `^Name`
/// selectors can echo it back; the response type decodes from the XML
/// document and serialises with the API's field names.
pub trait Ec2Operation: Serialize + Send + Sync {
    type Response: Serialize + DeserializeOwned + Send;

    const DESCRIPTOR: OperationDescriptor;

    /// Query parameters for this request (without `Action`/`Version`)
    fn to_params(&self) -> QueryParams {
        QueryParams::new()
    }

    /// Reject parameter combinations the service would refuse
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Resource named in the confirmation prompt
    fn target(&self) -> String {
        "the current account and region".to_string()
    }

    fn decode(body: &str) -> TransportResult<Self::Response> {
        xml::decode(Self::DESCRIPTOR.action, body)
    }
}
