//! JSON output formatting

use serde::{Deserialize, Serialize};
use sweep_core::{CommandFailure, DuplicateMatch, RemoteDeletion, SweepError};

const SCHEMA_VERSION: &str = "1";

/// JSON response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse<T> {
    /// Schema version for forward compatibility
    pub schema_version: String,
    /// Command that generated this response
    pub command: String,
    /// Status: "ok" or "error"
    pub status: String,
    /// Command-specific payload
    pub data: T,
    /// Warnings and errors
    pub issues: Vec<JsonIssue>,
}

impl<T> JsonResponse<T> {
    /// Create a successful response with issues
    pub fn ok_with_issues(command: &str, data: T, issues: Vec<JsonIssue>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            command: command.to_string(),
            status: "ok".to_string(),
            data,
            issues,
        }
    }

    /// Create an error response
    pub fn error(command: &str, data: T, issues: Vec<JsonIssue>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            command: command.to_string(),
            status: "error".to_string(),
            data,
            issues,
        }
    }
}

/// Issue object structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonIssue {
    /// Error/warning code (e.g., "E001", "W001")
    pub code: String,
    /// "error" or "warning"
    pub severity: String,
    /// Human-readable message
    pub message: String,
    /// Line of the ref listing, for parse errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl JsonIssue {
    pub fn warning(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            severity: "warning".to_string(),
            message: message.into(),
            line: None,
        }
    }

    pub fn error(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            severity: "error".to_string(),
            message: message.into(),
            line: None,
        }
    }
}

impl From<&SweepError> for JsonIssue {
    fn from(err: &SweepError) -> Self {
        Self {
            line: err.line(),
            ..JsonIssue::error(err.code(), err.to_string())
        }
    }
}

/// One local/remote duplicate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchEntry {
    pub name: String,
    pub commit: String,
    pub remote: String,
    pub local_ref: String,
    pub remote_ref: String,
}

impl From<&DuplicateMatch> for MatchEntry {
    fn from(m: &DuplicateMatch) -> Self {
        Self {
            name: m.local.name.clone(),
            commit: m.local.commit.clone(),
            remote: m.remote_name().to_string(),
            local_ref: m.local.ref_name.clone(),
            remote_ref: m.remote.ref_name.clone(),
        }
    }
}

/// Data payload for a sweep run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SweepData {
    /// Checked-out branch, absent on a detached HEAD
    pub current_branch: Option<String>,
    /// Remotes configured in the repository
    pub remotes: Vec<String>,
    /// Remotes selected for cleaning
    pub selected_remotes: Vec<String>,
    pub dry_run: bool,
    /// Dry-run was imposed because no remote was selected
    pub forced_dry_run: bool,
    pub matches: Vec<MatchEntry>,
    /// Every remote copy found, selected or not
    pub remote_candidates: Vec<RemoteDeletion>,
    /// Every local branch found with a remote copy
    pub local_candidates: Vec<String>,
    /// Local branches deleted (or that would be, under dry-run)
    pub locals_to_delete: Vec<String>,
    /// Local branches kept because an unselected remote has a copy
    pub withheld_locals: Vec<String>,
    /// Commands issued, or reported under dry-run
    pub commands: Vec<String>,
    pub failures: Vec<CommandFailure>,
}

/// Print a response as pretty JSON on stdout
pub fn print_json<T: Serialize>(response: &JsonResponse<T>) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(response)?);
    Ok(())
}
