//! Dependency resolution failures
//!
//! Resolution failures never abort graph assembly. They are converted once,
//! at the port boundary, into typed [`DependencyError`]s and handed to the
//! IDE as sync issues.

use crate::features::cache::GraphBuildMetrics;
use crate::shared::models::SyncIssue;
use crate::shared::ports::ResolutionFailure;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use regex::Regex;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

static UNRESOLVED_COORDINATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Could not (?:find|resolve) ([^\s:'()]+:[^\s:'()]+(?::[^\s'()]+)?)")
        .expect("coordinate pattern is valid")
});

/// Typed resolution failure of one configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DependencyError {
    /// A specific module coordinate could not be found or resolved
    #[error("Failed to resolve: {coordinate}")]
    Unresolved {
        configuration: String,
        coordinate: String,
        details: Vec<String>,
    },

    /// Any other failure, kept verbatim
    #[error("{message}")]
    Other {
        configuration: String,
        message: String,
        details: Vec<String>,
    },
}

impl DependencyError {
    pub fn from_failure(configuration: &str, failure: &ResolutionFailure) -> Self {
        let details: Vec<String> = failure.messages().map(str::to_string).collect();

        match failure.messages().find_map(extract_coordinate) {
            Some(coordinate) => DependencyError::Unresolved {
                configuration: configuration.to_string(),
                coordinate,
                details,
            },
            None => DependencyError::Other {
                configuration: configuration.to_string(),
                message: failure.message.clone(),
                details: failure.causes.clone(),
            },
        }
    }

    pub fn configuration(&self) -> &str {
        match self {
            DependencyError::Unresolved { configuration, .. }
            | DependencyError::Other { configuration, .. } => configuration,
        }
    }

    /// Unresolved coordinate, if the failure names one
    pub fn coordinate(&self) -> Option<&str> {
        match self {
            DependencyError::Unresolved { coordinate, .. } => Some(coordinate),
            DependencyError::Other { .. } => None,
        }
    }

    pub fn to_sync_issue(&self) -> SyncIssue {
        match self {
            DependencyError::Unresolved {
                coordinate,
                details,
                ..
            } => SyncIssue::unresolved_dependency(
                Some(coordinate.clone()),
                self.to_string(),
                details.clone(),
            ),
            DependencyError::Other {
                message, details, ..
            } => SyncIssue::unresolved_dependency(None, message.clone(), details.clone()),
        }
    }
}

/// `group:module[:version]` named by a "Could not find/resolve" message
pub fn extract_coordinate(message: &str) -> Option<String> {
    UNRESOLVED_COORDINATE
        .captures(message)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim_end_matches('.').to_string())
}

/// Collects resolution failures across the queries of an assembly pass
#[derive(Default)]
pub struct DependencyFailureHandler {
    errors: Mutex<Vec<DependencyError>>,
    metrics: Option<Arc<GraphBuildMetrics>>,
}

impl DependencyFailureHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metrics(metrics: Option<Arc<GraphBuildMetrics>>) -> Self {
        Self {
            errors: Mutex::new(Vec::new()),
            metrics,
        }
    }

    /// Record the failures of one configuration (`<project>@<variant>/<config>`)
    pub fn add_errors(&self, configuration: &str, failures: &[ResolutionFailure]) {
        if failures.is_empty() {
            return;
        }

        let converted: Vec<DependencyError> = failures
            .iter()
            .map(|failure| DependencyError::from_failure(configuration, failure))
            .collect();

        for error in &converted {
            warn!(configuration, error = %error, "Dependency resolution failure");
        }
        if let Some(metrics) = &self.metrics {
            metrics.dependency_failures.inc_by(converted.len() as u64);
        }

        self.errors.lock().extend(converted);
    }

    pub fn len(&self) -> usize {
        self.errors.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.lock().is_empty()
    }

    /// Drain the collected failures
    pub fn collect_failures(&self) -> Vec<DependencyError> {
        std::mem::take(&mut *self.errors.lock())
    }

    /// Drain the collected failures as sync issues
    pub fn collect_issues(&self) -> Vec<SyncIssue> {
        self.collect_failures()
            .iter()
            .map(DependencyError::to_sync_issue)
            .collect()
    }
}
