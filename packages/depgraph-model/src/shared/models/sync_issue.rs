//! IDE-visible sync issues

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    UnresolvedDependency,
    Generic,
}

/// Non-fatal problem reported alongside a model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncIssue {
    pub severity: Severity,
    pub kind: IssueKind,
    /// Short identifier (e.g. the unresolved coordinate)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub multiline_message: Vec<String>,
}

impl SyncIssue {
    pub fn unresolved_dependency(
        data: Option<String>,
        message: impl Into<String>,
        multiline_message: Vec<String>,
    ) -> Self {
        Self {
            severity: Severity::Error,
            kind: IssueKind::UnresolvedDependency,
            data,
            message: message.into(),
            multiline_message,
        }
    }

    pub fn warning(message: impl Into<String>, multiline_message: Vec<String>) -> Self {
        Self {
            severity: Severity::Warning,
            kind: IssueKind::Generic,
            data: None,
            message: message.into(),
            multiline_message,
        }
    }
}

impl fmt::Display for SyncIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        };
        write!(f, "{}: {}", severity, self.message)
    }
}
