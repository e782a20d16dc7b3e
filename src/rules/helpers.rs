//! Shared helpers for rule implementations.

use crate::{
    core::SourceUnit,
    issues::{Rule, ViolationIssue},
};

/// Build a violation against `unit`, pointing at its file.
pub fn violation(unit: &SourceUnit, rule: Rule, message: impl Into<String>) -> ViolationIssue {
    ViolationIssue::new(&unit.name, rule, message).in_file(&unit.path)
}

/// Render names as `[a, b, c]` for messages.
pub fn format_names<S: AsRef<str>>(names: &[S]) -> String {
    let joined: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
    format!("[{}]", joined.join(", "))
}

/// Parse a Java snippet for rule tests.
#[cfg(test)]
pub fn unit(path: &str, source: &str) -> SourceUnit {
    crate::core::parse_source(path, source).expect("test source parses")
}
