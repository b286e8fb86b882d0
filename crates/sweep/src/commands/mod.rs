//! CLI command implementations

pub mod sweep;

pub use sweep::{SweepArgs, exit_code_for, run_sweep};
