//! Confirmation prompts for destructive actions.

use std::io::{BufRead, Write};

/// Asks the user to confirm an action.
pub trait Confirm {
    /// Return true if the user accepts. Read failures count as a refusal.
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Accepts every prompt without asking.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}

/// Prompts on a writer and reads a `y`/`yes` answer from a reader.
#[derive(Debug)]
pub struct PromptConfirm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
    /// Create a prompt over the given streams.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<R, W> {
    fn confirm(&mut self, prompt: &str) -> bool {
        if write!(self.output, "{prompt} [y/N] ")
            .and_then(|()| self.output.flush())
            .is_err()
        {
            return false;
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(0) | Err(_) => false,
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        }
    }
}
