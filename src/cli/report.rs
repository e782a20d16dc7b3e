//! Report formatting and printing utilities.
//!
//! Issues are printed cargo-style, followed by one status line per check and
//! a summary. `--format json` prints a single JSON document instead.

use std::io::{self, Write};

use colored::Colorize;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use super::{
    args::OutputFormat,
    commands::{CheckSummary, CommandResult, CommandSummary, InitSummary},
};
use crate::config::CONFIG_FILE_NAME;
use crate::core::{CheckKind, VerificationReport};
use crate::issues::{Issue, IssueRecord, Report};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print all reports in cargo-style format to stdout.
pub fn report(reports: &[VerificationReport]) {
    report_to(reports, &mut io::stdout().lock());
}

/// Print reports to a custom writer.
pub fn report_to<W: Write>(reports: &[VerificationReport], writer: &mut W) {
    for report in reports {
        for issue in &report.issues {
            print_issue(issue, writer);
        }
    }

    if reports.is_empty() {
        return;
    }

    let name_width = reports
        .iter()
        .map(|r| UnicodeWidthStr::width(r.interface.as_str()))
        .max()
        .unwrap_or(0);
    for report in reports {
        print_check_line(report, writer, name_width);
    }

    print_summary(reports, writer);
}

/// Machine-readable form of a whole run.
#[derive(Debug, Serialize)]
pub struct JsonOutput<'a> {
    pub passed: bool,
    pub reports: Vec<JsonReport<'a>>,
}

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub interface: &'a str,
    pub check: CheckKind,
    pub passed: bool,
    pub issues: Vec<IssueRecord>,
}

impl<'a> JsonOutput<'a> {
    pub fn new(reports: &'a [VerificationReport]) -> Self {
        let reports: Vec<JsonReport<'a>> = reports
            .iter()
            .map(|r| JsonReport {
                interface: &r.interface,
                check: r.check,
                passed: r.passed(),
                issues: r.issues.iter().map(IssueRecord::from).collect(),
            })
            .collect();
        Self {
            passed: reports.iter().all(|r| r.passed),
            reports,
        }
    }
}

/// Print reports as one pretty-printed JSON document.
pub fn report_json_to<W: Write>(reports: &[VerificationReport], writer: &mut W) {
    match serde_json::to_string_pretty(&JsonOutput::new(reports)) {
        Ok(json) => {
            let _ = writeln!(writer, "{}", json);
        }
        Err(err) => {
            eprintln!("Error: failed to serialize report: {}", err);
        }
    }
}

/// Warn that some checks stopped before their rules ran.
pub fn print_fatal_warning_to<W: Write>(count: usize, writer: &mut W) {
    if count == 0 {
        return;
    }
    let (files, rules) = if count == 1 {
        ("file", "its rules were")
    } else {
        ("files", "their rules were")
    };
    let _ = writeln!(
        writer,
        "{} {} {} could not be located or parsed; {} not evaluated",
        "warning:".bold().yellow(),
        count,
        files,
        rules
    );
}

pub fn print(result: &CommandResult) {
    match &result.summary {
        CommandSummary::Check(summary) => print_check(summary),
        CommandSummary::Init(summary) => print_init(summary),
    }

    if let CommandSummary::Check(CheckSummary {
        format: OutputFormat::Text,
        ..
    }) = &result.summary
    {
        print_fatal_warning_to(result.fatal_count, &mut io::stderr().lock());
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_check(summary: &CheckSummary) {
    match summary.format {
        OutputFormat::Text => report(&summary.reports),
        OutputFormat::Json => report_json_to(&summary.reports, &mut io::stdout().lock()),
    }
}

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}

fn print_issue<W: Write>(issue: &Issue, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{}: {}  {}",
        "error".bold().red(),
        issue.message(),
        issue.rule().to_string().dimmed().cyan()
    );

    match issue.location() {
        Some((path, 0)) => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), path);
        }
        Some((path, line)) => {
            let _ = writeln!(writer, "  {} {}:{}", "-->".blue(), path, line);
        }
        None => {}
    }

    let _ = writeln!(writer, "   {} {} {}", "=".blue(), "unit:".bold(), issue.unit());
    let _ = writeln!(writer);
}

fn print_check_line<W: Write>(report: &VerificationReport, writer: &mut W, name_width: usize) {
    let padding = name_width.saturating_sub(UnicodeWidthStr::width(report.interface.as_str()));
    if report.passed() {
        let _ = writeln!(
            writer,
            "{} {}{:padding$}  {}",
            SUCCESS_MARK.green(),
            report.interface,
            "",
            report.check.to_string().dimmed(),
            padding = padding
        );
    } else {
        let count = report.issues.len();
        let _ = writeln!(
            writer,
            "{} {}{:padding$}  {}  {}",
            FAILURE_MARK.red(),
            report.interface,
            "",
            report.check.to_string().dimmed(),
            format!("{} {}", count, if count == 1 { "issue" } else { "issues" }).red(),
            padding = padding
        );
    }
}

fn print_summary<W: Write>(reports: &[VerificationReport], writer: &mut W) {
    let total_checks = reports.len();
    let failed_checks = reports.iter().filter(|r| !r.passed()).count();
    let total_issues: usize = reports.iter().map(|r| r.issues.len()).sum();

    if failed_checks == 0 {
        let _ = writeln!(
            writer,
            "\n{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Verified {} {} - no issues found",
                total_checks,
                if total_checks == 1 { "check" } else { "checks" }
            )
            .green()
        );
    } else {
        let _ = writeln!(
            writer,
            "\n{} {} {} in {} of {} {}",
            FAILURE_MARK.red(),
            total_issues,
            if total_issues == 1 { "problem" } else { "problems" }.red(),
            failed_checks,
            total_checks,
            if total_checks == 1 { "check" } else { "checks" }
        );
    }
}

// ============================================================
// Tests
// ============================================================
