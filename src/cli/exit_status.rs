use std::process::ExitCode;

/// Process exit status of `bundlecheck`.
///
/// - `Success` (0): every requested check passed
/// - `Failure` (1): at least one check reported an issue
/// - `Error` (2): the run could not start (bad config, missing roots, ...)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
