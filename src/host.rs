// file: src/host.rs
// version: 1.0.0
// guid: 8088900e-ef83-404a-9423-f8ca3abca41e

//! Host collaborator: interactive confirmation for mutating commands

use crate::error::Result;
use colored::Colorize;
use std::io::{BufRead, Write};

/// What the caller is asked to approve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationPrompt {
    pub command: &'static str,
    pub action: &'static str,
    pub target: String,
}

impl ConfirmationPrompt {
    /// One-line description, shared by the prompt and what-if output
    pub fn describe(&self) -> String {
        format!(
            "Performing the operation \"{} ({})\" on target \"{}\".",
            self.command, self.action, self.target
        )
    }
}

/// Obtains explicit approval before a mutating call
pub trait ConfirmationHost: Send + Sync {
    /// `Ok(false)` means the caller declined
    fn confirm(&self, prompt: &ConfirmationPrompt) -> Result<bool>;
}

/// Prompts on stderr and reads the answer from stdin. Anything but `y` or
/// `yes` declines, including end of input.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleHost;

impl ConsoleHost {
    pub fn new() -> Self {
        Self
    }

    fn ask<R: BufRead, W: Write>(prompt: &ConfirmationPrompt, input: &mut R, output: &mut W) -> Result<bool> {
        writeln!(output, "{}", "Are you sure you want to perform this action?".yellow().bold())?;
        writeln!(output, "{}", prompt.describe())?;
        write!(output, "[Y] Yes  [N] No  (default is \"N\"): ")?;
        output.flush()?;

        let mut answer = String::new();
        input.read_line(&mut answer)?;
        Ok(is_affirmative(&answer))
    }
}

impl ConfirmationHost for ConsoleHost {
    fn confirm(&self, prompt: &ConfirmationPrompt) -> Result<bool> {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        let mut output = std::io::stderr();
        Self::ask(prompt, &mut input, &mut output)
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
