//! Warning collection for the resolution pass
//!
//! Warnings are append-only diagnostics surfaced to the caller; resolution
//! logic never reads them back to alter control flow.

use serde::{Deserialize, Serialize};

/// Structured warning with a code, human message, and remediation hint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarningReport {
    pub code: String,
    pub message: String,
    pub hint: String,
}

impl WarningReport {
    pub fn new(code: impl Into<String>, message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            hint: hint.into(),
        }
    }
}

/// Append-only sink for warnings accumulated during a resolution pass
#[derive(Debug, Default)]
pub struct WarningCollector {
    warnings: Vec<WarningReport>,
}

impl WarningCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning
    pub fn push(&mut self, code: &str, message: impl Into<String>, hint: &str) {
        self.warnings.push(WarningReport::new(code, message, hint));
    }

    /// All warnings collected so far, in insertion order
    pub fn warnings(&self) -> &[WarningReport] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    /// Consume the collector, yielding the warnings
    pub fn into_warnings(self) -> Vec<WarningReport> {
        self.warnings
    }
}
