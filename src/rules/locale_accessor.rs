//! The `getLoggingLocale()` accessor.
//!
//! Primary implementations must declare it `protected`; locale variants must
//! declare their own copy so the variant's `LOCALE` is the one returned.

use super::helpers::violation;
use crate::{
    core::SourceUnit,
    issues::{Rule, ViolationIssue},
};

pub const LOCALE_ACCESSOR: &str = "getLoggingLocale";

pub fn check_locale_accessor(implementation: &SourceUnit) -> Vec<ViolationIssue> {
    match implementation.method(LOCALE_ACCESSOR) {
        None => vec![violation(
            implementation,
            Rule::LocaleAccessor,
            format!("expected a {}() method", LOCALE_ACCESSOR),
        )],
        Some(method) if !method.is_protected() => vec![
            violation(
                implementation,
                Rule::LocaleAccessor,
                format!(
                    "expected {}() to be protected, found {}",
                    LOCALE_ACCESSOR,
                    method.visibility()
                ),
            )
            .at_line(method.line),
        ],
        Some(_) => Vec::new(),
    }
}

pub fn check_variant_locale_accessor(variant: &SourceUnit) -> Vec<ViolationIssue> {
    if variant.method(LOCALE_ACCESSOR).is_some() {
        return Vec::new();
    }
    vec![violation(
        variant,
        Rule::VariantLocaleAccessor,
        format!("missing overridden {}() method", LOCALE_ACCESSOR),
    )]
}
