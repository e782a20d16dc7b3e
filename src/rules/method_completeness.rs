//! Every interface method must be implemented.
//!
//! Default, static and constructor declarations are ignored on both sides;
//! matching is by name only, so one implementation covers all overloads.

use std::collections::HashSet;

use super::helpers::{format_names, violation};
use crate::{
    core::SourceUnit,
    issues::{Rule, ViolationIssue},
};

/// Check that `implementation` declares every abstract method of `interface`.
///
/// # Returns
/// At most one violation, listing all missing names in interface order.
pub fn check_method_completeness(
    interface: &SourceUnit,
    implementation: &SourceUnit,
) -> Vec<ViolationIssue> {
    let implemented: HashSet<&str> = implementation.abstract_method_names().into_iter().collect();

    let mut seen = HashSet::new();
    let missing: Vec<&str> = interface
        .abstract_method_names()
        .into_iter()
        .filter(|name| !implemented.contains(name))
        .filter(|name| seen.insert(*name))
        .collect();

    if missing.is_empty() {
        return Vec::new();
    }

    vec![violation(
        implementation,
        Rule::MethodCompleteness,
        format!(
            "implementation is missing methods from interface {}: {}",
            interface.name,
            format_names(&missing)
        ),
    )]
}
