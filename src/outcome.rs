//! Non-fatal step results.
//!
//! A best-effort step either completes ([`Outcome::Done`]) or completes with a
//! warning. Fatal conditions are `Err(InstallError)` instead; callers decide
//! whether to surface or aggregate warnings through a [`Report`].

/// Result of a step whose failure must not abort the surrounding operation.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The step succeeded.
    Done,
    /// The step failed in a tolerated way.
    Warning(String),
}

impl Outcome {
    /// Build a warning outcome.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::Warning(message.into())
    }
}

/// Warnings accumulated over one lifecycle operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    warnings: Vec<String>,
}

impl Report {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the warning carried by `outcome`, if any.
    pub fn record(&mut self, outcome: Outcome) {
        if let Outcome::Warning(message) = outcome {
            self.warn(message);
        }
    }

    /// Add a warning message.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(%message, "recorded warning");
        self.warnings.push(message);
    }

    /// Warnings in the order they were recorded.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// True when nothing went wrong.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}
