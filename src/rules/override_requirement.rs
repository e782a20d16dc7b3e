//! Every method of a locale variant overrides the primary implementation.
//!
//! Two separate conditions per method: the `@Override` marker is present,
//! and the primary implementation declares a method of the same name.

use std::collections::HashSet;

use super::helpers::violation;
use crate::{
    core::SourceUnit,
    issues::{Rule, ViolationIssue},
};

pub fn check_override_requirement(
    default_implementation: &SourceUnit,
    variant: &SourceUnit,
) -> Vec<ViolationIssue> {
    let super_methods: HashSet<&str> = default_implementation
        .methods
        .iter()
        .filter(|m| !m.is_constructor)
        .map(|m| m.name.as_str())
        .collect();

    let mut issues = Vec::new();
    for method in variant.methods.iter().filter(|m| !m.is_constructor) {
        if !method.has_override_marker {
            issues.push(
                violation(
                    variant,
                    Rule::OverrideRequirement,
                    format!("expected method {} to be marked @Override", method.name),
                )
                .at_line(method.line),
            );
        }
        if !super_methods.contains(method.name.as_str()) {
            issues.push(
                violation(
                    variant,
                    Rule::OverrideRequirement,
                    format!(
                        "expected method {} to override a method of {}",
                        method.name, default_implementation.name
                    ),
                )
                .at_line(method.line),
            );
        }
    }
    issues
}
