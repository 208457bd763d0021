//! Aggregated validation results
//!
//! Validation never stops at the first problem. Rules append messages to a
//! [`ValidationErrorBuilder`], which becomes an error only if something was
//! recorded.

use thiserror::Error;

/// One or more validation failures, reported together
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Validation Failed: {}", render(.messages))]
pub struct ValidationError {
    messages: Vec<String>,
}

fn render(messages: &[String]) -> String {
    messages
        .iter()
        .enumerate()
        .map(|(i, message)| format!("{}: {};", i + 1, message))
        .collect()
}

impl ValidationError {
    /// Messages in the order the rules produced them; never empty
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Whether any message contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.messages.iter().any(|m| m.contains(needle))
    }
}

/// Accumulates validation messages
#[derive(Debug, Default)]
pub struct ValidationErrorBuilder {
    messages: Vec<String>,
}

impl ValidationErrorBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure
    pub fn add(&mut self, message: impl Into<String>) -> &mut Self {
        self.messages.push(message.into());
        self
    }

    /// Record `message` when `failed` holds
    pub fn add_if(&mut self, failed: bool, message: impl Into<String>) -> &mut Self {
        if failed {
            self.add(message);
        }
        self
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// `Ok(())` if nothing was recorded, otherwise every message as one error
    pub fn build(self) -> Result<(), ValidationError> {
        if self.messages.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                messages: self.messages,
            })
        }
    }
}
