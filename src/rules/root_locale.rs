//! The root implementation's `LOCALE` constant.
//!
//! The expected expression is compared as text: `Locale.ROOT` and
//! `new Locale("")` are different even though they evaluate alike.

use super::helpers::violation;
use crate::{
    core::SourceUnit,
    issues::{Rule, ViolationIssue},
};

pub const LOCALE_FIELD: &str = "LOCALE";

/// Sentinel used when a target does not name another root expression.
pub const DEFAULT_ROOT_LOCALE: &str = "Locale.ROOT";

pub fn check_root_locale(implementation: &SourceUnit, expected: &str) -> Vec<ViolationIssue> {
    let Some(field) = implementation.field(LOCALE_FIELD) else {
        return vec![violation(
            implementation,
            Rule::RootLocale,
            format!("expected a {} field", LOCALE_FIELD),
        )];
    };

    match field.literal_initializer.as_deref() {
        Some(found) if found == expected => Vec::new(),
        found => vec![
            violation(
                implementation,
                Rule::RootLocale,
                format!(
                    "expected {} to be set to {}, found {}",
                    LOCALE_FIELD,
                    expected,
                    found.unwrap_or("no initializer")
                ),
            )
            .at_line(field.line),
        ],
    }
}
