//! Deployment strategy selection and result types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// How a configset is pushed to the remote core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentStrategy {
    /// All files base64-encoded in one JSON POST.
    DirectMultiFile,
    /// All files zipped and PUT to the configset API.
    ZipArchive,
    /// One upload request per file. Never selected from environment signals.
    PerFileSequential,
}

impl DeploymentStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DirectMultiFile => "direct",
            Self::ZipArchive => "zip",
            Self::PerFileSequential => "sequential",
        }
    }
}

impl fmt::Display for DeploymentStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a strategy name is not recognised.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown deployment strategy: {0} (expected direct, zip or sequential)")]
pub struct ParseStrategyError(pub String);

impl FromStr for DeploymentStrategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" | "direct_multi_file" => Ok(Self::DirectMultiFile),
            "zip" | "zip_archive" => Ok(Self::ZipArchive),
            "sequential" | "per_file_sequential" => Ok(Self::PerFileSequential),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}

/// Execution-environment signals used to pick a deployment strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnvironmentSignals {
    /// Running on the managed Solr platform.
    pub managed_platform: bool,
    /// Running in a local development container.
    pub local_development: bool,
    /// Explicit strategy, takes precedence over both signals.
    pub strategy_override: Option<DeploymentStrategy>,
}

impl EnvironmentSignals {
    /// Resolve the signals to exactly one strategy.
    ///
    /// Precedence: explicit override, then managed platform, then local
    /// development. Returns `None` when nothing applies.
    pub fn resolve(&self) -> Option<DeploymentStrategy> {
        if let Some(strategy) = self.strategy_override {
            return Some(strategy);
        }
        if self.managed_platform {
            Some(DeploymentStrategy::DirectMultiFile)
        } else if self.local_development {
            Some(DeploymentStrategy::ZipArchive)
        } else {
            None
        }
    }
}

/// Outcome of a single upload request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadAttempt {
    /// Filename for per-file uploads, batch label otherwise.
    pub label: String,
    /// HTTP status, `None` when no response was received.
    pub status: Option<u16>,
    /// Reason phrase, or the transport error when there was no response.
    pub reason: String,
    pub success: bool,
}

impl UploadAttempt {
    pub fn new(
        label: impl Into<String>,
        status: Option<u16>,
        reason: impl Into<String>,
        success: bool,
    ) -> Self {
        Self {
            label: label.into(),
            status,
            reason: reason.into(),
            success,
        }
    }

    /// Attempt for which no HTTP response was obtained.
    pub fn no_response(label: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(label, None, reason, false)
    }

    /// `UPLOADED` or `NOT UPLOADED`.
    pub fn outcome(&self) -> &'static str {
        outcome_label(self.success)
    }

    /// Status line, e.g. `Result: UPLOADED Status code: 200 - OK`.
    pub fn message(&self) -> String {
        let code = self
            .status
            .map(|s| s.to_string())
            .unwrap_or_else(|| "none".to_string());
        format!(
            "Result: {} Status code: {} - {}",
            self.outcome(),
            code,
            self.reason
        )
    }
}

/// Result of one deploy call. Produced fresh per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentResult {
    pub deployment_id: Uuid,
    pub server_id: String,
    pub strategy: DeploymentStrategy,
    /// Attempts in the order the requests were issued.
    pub attempts: Vec<UploadAttempt>,
    pub completed_at: DateTime<Utc>,
}

impl DeploymentResult {
    pub fn new(
        deployment_id: Uuid,
        server_id: impl Into<String>,
        strategy: DeploymentStrategy,
        attempts: Vec<UploadAttempt>,
    ) -> Self {
        Self {
            deployment_id,
            server_id: server_id.into(),
            strategy,
            attempts,
            completed_at: Utc::now(),
        }
    }

    /// True when at least one request was made and every one succeeded.
    pub fn is_success(&self) -> bool {
        !self.attempts.is_empty() && self.attempts.iter().all(|a| a.success)
    }

    pub fn succeeded(&self) -> usize {
        self.attempts.iter().filter(|a| a.success).count()
    }

    pub fn failed(&self) -> usize {
        self.attempts.len() - self.succeeded()
    }

    /// One-line summary of the whole call.
    pub fn summary(&self) -> String {
        match self.attempts.as_slice() {
            [] => format!(
                "Result: {} Status code: none - no upload attempted",
                outcome_label(false)
            ),
            [single] => single.message(),
            attempts => format!(
                "Result: {} Files: {}/{} uploaded",
                outcome_label(self.is_success()),
                self.succeeded(),
                attempts.len()
            ),
        }
    }
}

fn outcome_label(success: bool) -> &'static str {
    if success {
        "UPLOADED"
    } else {
        "NOT UPLOADED"
    }
}
