// file: src/logging/mod.rs
// version: 2.0.0
// guid: i9j0k1l2-m3n4-5678-9012-345678ijklmn

//! Diagnostic logging for ec2cmd. Everything goes to stderr so stdout only
//! carries command output.

pub mod logger;

pub use logger::{init_logger, with_async_operation_span};
