//! Locale variants must not redeclare interface methods.
//!
//! A variant only overrides the `*$str` message accessors of the primary
//! implementation; the interface methods themselves stay in the primary.

use std::collections::HashSet;

use super::helpers::violation;
use crate::{
    core::SourceUnit,
    issues::{Rule, ViolationIssue},
};

/// Report every variant method whose name matches an interface method.
///
/// All interface methods count here, default and static ones included.
pub fn check_translation_isolation(interface: &SourceUnit, variant: &SourceUnit) -> Vec<ViolationIssue> {
    let interface_methods: HashSet<&str> =
        interface.methods.iter().map(|m| m.name.as_str()).collect();

    variant
        .methods
        .iter()
        .filter(|m| interface_methods.contains(m.name.as_str()))
        .map(|m| {
            violation(
                variant,
                Rule::TranslationIsolation,
                format!(
                    "method {} is declared in interface {} and must not appear in a translation",
                    m.name, interface.name
                ),
            )
            .at_line(m.line)
        })
        .collect()
}
