// file: src/adapter.rs
// version: 1.1.0
// guid: dcaafa8f-dc88-453c-855b-68e573599dd9

//! The command adapter: one request, one call, one projected result.
//!
//! ```text
//! Idle -> Confirming -> Executing -> Succeeded | Failed | Cancelled
//!              |
//!              +-> Declined | WhatIf
//! ```

use crate::error::{Ec2CmdError, Result};
use crate::host::{ConfirmationHost, ConfirmationPrompt};
use crate::operation::Ec2Operation;
use crate::selector::OutputSelector;
use crate::transport::Ec2Transport;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use uuid::Uuid;

/// Per-invocation state; consumed by [`CommandAdapter::invoke`]
#[derive(Debug, Clone)]
pub struct InvocationContext<O> {
    pub id: Uuid,
    pub request: O,
    pub selector: Option<String>,
    pub force: bool,
    pub what_if: bool,
    pub cancel: CancellationToken,
}

impl<O: Ec2Operation> InvocationContext<O> {
    pub fn new(request: O) -> Self {
        Self {
            id: Uuid::new_v4(),
            request,
            selector: None,
            force: false,
            what_if: false,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_what_if(mut self, what_if: bool) -> Self {
        self.what_if = what_if;
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}

/// How an invocation ended without an error
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The call ran; carries the projected value
    Completed(Value),
    /// The caller declined confirmation; nothing was sent
    Declined,
    /// What-if run; carries the description of the skipped call
    WhatIf(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationState {
    Idle,
    Confirming,
    Executing,
    Succeeded,
    Failed,
    Cancelled,
    Declined,
    WhatIf,
}

impl fmt::Display for InvocationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Confirming => "confirming",
            Self::Executing => "executing",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Declined => "declined",
            Self::WhatIf => "what-if",
        };
        f.write_str(name)
    }
}

/// Runs operations against a transport, asking `host` before mutations
pub struct CommandAdapter<T, H> {
    transport: T,
    host: Arc<H>,
    confirm_mutations: bool,
}

impl<T: Ec2Transport, H: ConfirmationHost + 'static> CommandAdapter<T, H> {
    pub fn new(transport: T, host: H) -> Self {
        Self {
            transport,
            host: Arc::new(host),
            confirm_mutations: true,
        }
    }

    /// With `false`, mutating operations run as if forced
    pub fn with_confirm_mutations(mut self, confirm: bool) -> Self {
        self.confirm_mutations = confirm;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Validate, confirm, execute and project one invocation.
    pub async fn invoke<O: Ec2Operation>(&self, ctx: InvocationContext<O>) -> Result<Outcome> {
        let descriptor = &O::DESCRIPTOR;
        let id = ctx.id;
        transition(id, InvocationState::Idle);

        let selector = match ctx.selector.as_deref() {
            Some(expr) => OutputSelector::parse(expr, descriptor)?,
            None => OutputSelector::default_for(descriptor)?,
        };
        ctx.request.validate()?;

        if descriptor.is_mutating() {
            let prompt = ConfirmationPrompt {
                command: descriptor.command,
                action: descriptor.action,
                target: ctx.request.target(),
            };

            if ctx.what_if {
                transition(id, InvocationState::WhatIf);
                return Ok(Outcome::WhatIf(format!("What if: {}", prompt.describe())));
            }

            if !ctx.force && self.confirm_mutations {
                transition(id, InvocationState::Confirming);
                let approved = match self.confirm(prompt, &ctx.cancel).await {
                    Ok(approved) => approved,
                    Err(e) => {
                        if e.is_cancelled() {
                            transition(id, InvocationState::Cancelled);
                        }
                        return Err(e);
                    }
                };
                if !approved {
                    transition(id, InvocationState::Declined);
                    info!("{} declined; no request sent", descriptor.command);
                    return Ok(Outcome::Declined);
                }
            }
        }

        transition(id, InvocationState::Executing);
        let result = self.execute(&ctx.request, &selector, &ctx.cancel).await;
        match &result {
            Ok(_) => transition(id, InvocationState::Succeeded),
            Err(e) if e.is_cancelled() => transition(id, InvocationState::Cancelled),
            Err(_) => transition(id, InvocationState::Failed),
        }
        result.map(Outcome::Completed)
    }

    /// Ask the host on the blocking pool so a pending prompt still
    /// observes `cancel`. A prompt abandoned this way keeps its thread until
    /// input arrives or the process exits.
    async fn confirm(&self, prompt: ConfirmationPrompt, cancel: &CancellationToken) -> Result<bool> {
        let command = prompt.command;
        let host = Arc::clone(&self.host);
        let pending = tokio::task::spawn_blocking(move || host.confirm(&prompt));

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                Err(Ec2CmdError::cancelled(format!("{} was interrupted at the prompt", command)))
            }
            joined = pending => joined.map_err(std::io::Error::from)?,
        }
    }

    /// Send exactly one request and project the response with `selector`.
    ///
    /// Returns [`Ec2CmdError::Cancelled`] as soon as `cancel` fires; the
    /// in-flight call is dropped, never retried.
    pub async fn execute<O: Ec2Operation>(
        &self,
        request: &O,
        selector: &OutputSelector,
        cancel: &CancellationToken,
    ) -> Result<Value> {
        let action = O::DESCRIPTOR.action;
        let params = request.to_params();
        debug!("Sending {} with {} parameter(s)", action, params.len());

        let body = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                return Err(Ec2CmdError::cancelled(format!("{} was interrupted", action)));
            }
            result = self.transport.send(action, &params) => result?,
        };

        let response = O::decode(&body)?;
        selector.project(request, &response)
    }
}

fn transition(id: Uuid, state: InvocationState) {
    debug!(invocation = %id, "state -> {}", state);
}
