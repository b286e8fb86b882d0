//! sweep-core: Branch reconciliation and safe deletion
//!
//! Finds branches that are merged into the current branch and present both
//! locally and on a remote, and deletes them without orphaning remote copies.

/// Core error types for sweep operations
pub mod error;

/// Configuration handling
pub mod config;

/// Core data types (Branch, Snapshot, DuplicateMatch, etc.)
pub mod types;

/// Ref listing parsing
pub mod parser;

/// Local/remote duplicate detection
pub mod matcher;

/// Deletion planning with orphan avoidance
pub mod planner;

/// Plan execution and dry-run reporting
pub mod executor;

/// Git collaborator traits and the git CLI implementation
pub mod git;

/// The parse → match → plan pipeline
pub mod sweep;

// Re-exports for convenience
pub use config::{Config, SweepConfig};
pub use error::SweepError;
pub use executor::{CommandFailure, ExecutionReport, Executor, RunMode};
pub use git::{CommandRunner, CurrentBranchProvider, GitCli, RefLister};
pub use matcher::{ALWAYS_PROTECTED, ProtectedBranches, find_duplicates};
pub use parser::{parse_refs, parse_remotes, parse_snapshot};
pub use planner::{DeletionPlan, ResolvedPlan};
pub use sweep::{Analysis, analyze, analyze_listings};
pub use types::{
    AmbiguousRemoteMatch, Branch, DuplicateMatch, RemoteDeletion, Snapshot, SweepCommand,
};
