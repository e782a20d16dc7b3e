use super::{CommandResult, CommandSummary};
use crate::issues::Report;

pub fn finish(summary: CommandSummary, exit_on_errors: bool) -> CommandResult {
    let (error_count, fatal_count) = match &summary {
        CommandSummary::Check(check) => {
            let issues = check.reports.iter().flat_map(|r| r.issues.iter());
            issues.fold((0, 0), |(errors, fatal), issue| {
                (errors + 1, fatal + usize::from(issue.rule().is_fatal()))
            })
        }
        CommandSummary::Init(init) => (usize::from(!init.created), 0),
    };

    CommandResult {
        summary,
        error_count,
        fatal_count,
        exit_on_errors,
    }
}
