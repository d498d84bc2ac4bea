// file: src/commands/serial_console.rs
// version: 1.0.0
// guid: 5c1d2a0e-8f0b-4f0e-bb6c-2d4b0b9e7e11

//! EC2 serial console access for the account

use crate::operation::{Ec2Operation, Mutability, OperationDescriptor};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "PascalCase", deserialize = "camelCase"))]
pub struct SerialConsoleAccess {
    pub serial_console_access_enabled: bool,
    /// Only reported by the status query
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed_by: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct DisableSerialConsoleAccess;

impl Ec2Operation for DisableSerialConsoleAccess {
    type Response = SerialConsoleAccess;

    const DESCRIPTOR: OperationDescriptor = OperationDescriptor {
        command: "disable-serial-console-access",
        action: "DisableSerialConsoleAccess",
        summary: "Disable access to the EC2 serial console",
        mutability: Mutability::Mutating,
        default_selector: "SerialConsoleAccessEnabled",
        parameters: &[],
        response_fields: &["SerialConsoleAccessEnabled"],
    };
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct EnableSerialConsoleAccess;

impl Ec2Operation for EnableSerialConsoleAccess {
    type Response = SerialConsoleAccess;

    const DESCRIPTOR: OperationDescriptor = OperationDescriptor {
        command: "enable-serial-console-access",
        action: "EnableSerialConsoleAccess",
        summary: "Enable access to the EC2 serial console",
        mutability: Mutability::Mutating,
        default_selector: "SerialConsoleAccessEnabled",
        parameters: &[],
        response_fields: &["SerialConsoleAccessEnabled"],
    };
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct GetSerialConsoleAccessStatus;

impl Ec2Operation for GetSerialConsoleAccessStatus {
    type Response = SerialConsoleAccess;

    const DESCRIPTOR: OperationDescriptor = OperationDescriptor {
        command: "get-serial-console-access-status",
        action: "GetSerialConsoleAccessStatus",
        summary: "Show whether EC2 serial console access is enabled",
        mutability: Mutability::ReadOnly,
        default_selector: "SerialConsoleAccessEnabled",
        parameters: &[],
        response_fields: &["SerialConsoleAccessEnabled", "ManagedBy"],
    };
}
