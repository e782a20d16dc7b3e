use crate::cli::args::OutputFormat;
use crate::core::VerificationReport;

#[derive(Debug)]
pub enum CommandSummary {
    Check(CheckSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct CheckSummary {
    pub reports: Vec<VerificationReport>,
    pub format: OutputFormat,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running bundlecheck commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Number of issues across all reports, fatal ones included.
    pub error_count: usize,
    /// Number of parse and discovery failures.
    pub fatal_count: usize,
    /// If true, exit code 1 should be returned when error_count > 0.
    pub exit_on_errors: bool,
}
