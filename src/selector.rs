// file: src/selector.rs
// version: 1.0.0
// guid: 986b82a8-3aae-411f-9a5f-b77dcf77df0e

//! Output selectors.
//!
//! `*` returns the whole response, `Field` or `Field.Sub` a response field,
//! and `^Param` echoes a bound request parameter. Names match
//! case-insensitively and are stored in their canonical casing.

use crate::error::{Ec2CmdError, Result};
use crate::operation::OperationDescriptor;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

const PARAM_MARKER: char = '^';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSelector {
    Whole,
    Field(Vec<String>),
    Param(String),
}

impl OutputSelector {
    /// Parse `expression` and check every name against `descriptor`.
    pub fn parse(expression: &str, descriptor: &OperationDescriptor) -> Result<Self> {
        let expr = expression.trim();
        if expr.is_empty() {
            return Err(Ec2CmdError::invalid_selector(expression, "selector is empty"));
        }

        if expr == "*" {
            return Ok(Self::Whole);
        }

        if let Some(name) = expr.strip_prefix(PARAM_MARKER) {
            if name.is_empty() {
                return Err(Ec2CmdError::invalid_selector(
                    expression,
                    "'^' must be followed by a parameter name",
                ));
            }
            return match canonical(name, descriptor.parameters) {
                Some(param) => Ok(Self::Param(param.to_string())),
                None => Err(Ec2CmdError::invalid_selector(
                    expression,
                    format!(
                        "{} has no parameter '{}'; valid parameters: {}",
                        descriptor.command,
                        name,
                        listing(descriptor.parameters)
                    ),
                )),
            };
        }

        let segments: Vec<&str> = expr.split('.').collect();
        if segments.iter().any(|s| s.trim().is_empty()) {
            return Err(Ec2CmdError::invalid_selector(
                expression,
                "field path contains an empty segment",
            ));
        }

        let head = canonical(segments[0], descriptor.response_fields).ok_or_else(|| {
            Ec2CmdError::invalid_selector(
                expression,
                format!(
                    "{} response has no field '{}'; valid fields: {}",
                    descriptor.command,
                    segments[0],
                    listing(descriptor.response_fields)
                ),
            )
        })?;

        let mut path = vec![head.to_string()];
        path.extend(segments[1..].iter().map(|s| s.trim().to_string()));
        Ok(Self::Field(path))
    }

    /// The descriptor's default selector
    pub fn default_for(descriptor: &OperationDescriptor) -> Result<Self> {
        Self::parse(descriptor.default_selector, descriptor)
    }

    /// Project a response (or the request, for `^Param`) to the output value.
    pub fn project<Req, Resp>(&self, request: &Req, response: &Resp) -> Result<Value>
    where
        Req: Serialize + ?Sized,
        Resp: Serialize + ?Sized,
    {
        match self {
            Self::Whole => Ok(serde_json::to_value(response)?),
            Self::Field(path) => {
                let value = serde_json::to_value(response)?;
                Ok(lookup_path(&value, path))
            }
            Self::Param(name) => {
                let value = serde_json::to_value(request)?;
                Ok(lookup_path(&value, std::slice::from_ref(name)))
            }
        }
    }
}

impl fmt::Display for OutputSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Whole => write!(f, "*"),
            Self::Field(path) => write!(f, "{}", path.join(".")),
            Self::Param(name) => write!(f, "{}{}", PARAM_MARKER, name),
        }
    }
}

fn canonical<'a>(name: &str, names: &'a [&'a str]) -> Option<&'a str> {
    let name = name.trim();
    names
        .iter()
        .copied()
        .find(|candidate| candidate.eq_ignore_ascii_case(name))
}

fn listing(names: &[&str]) -> String {
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}

/// Nested segments match object keys case-insensitively; a missing key
/// projects to null.
fn lookup_path(value: &Value, path: &[String]) -> Value {
    let mut current = value;
    for segment in path {
        let next = current.as_object().and_then(|map| {
            map.get(segment).or_else(|| {
                map.iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(segment))
                    .map(|(_, v)| v)
            })
        });
        match next {
            Some(v) => current = v,
            None => return Value::Null,
        }
    }
    current.clone()
}
