//! Shape of a generated message bundle.
//!
//! A bundle is a singleton: `public static final INSTANCE` plus exactly one
//! protected, parameterless constructor.

use super::helpers::violation;
use crate::{
    core::SourceUnit,
    issues::{Rule, ViolationIssue},
};

pub const INSTANCE_FIELD: &str = "INSTANCE";

pub fn check_bundle_shape(implementation: &SourceUnit) -> Vec<ViolationIssue> {
    let mut issues = Vec::new();

    match implementation.field(INSTANCE_FIELD) {
        None => issues.push(violation(
            implementation,
            Rule::BundleShape,
            format!("expected an {} field", INSTANCE_FIELD),
        )),
        Some(field) if !(field.is_public() && field.is_static() && field.is_final()) => {
            issues.push(
                violation(
                    implementation,
                    Rule::BundleShape,
                    format!("expected the {} field to be public, static and final", INSTANCE_FIELD),
                )
                .at_line(field.line),
            );
        }
        Some(_) => {}
    }

    let constructors: Vec<_> = implementation.constructors().collect();
    match constructors.as_slice() {
        [] => issues.push(violation(
            implementation,
            Rule::BundleShape,
            "no constructor found",
        )),
        [constructor] => {
            if !constructor.parameter_types.is_empty() {
                issues.push(
                    violation(
                        implementation,
                        Rule::BundleShape,
                        format!(
                            "expected the constructor parameters to be empty, found ({})",
                            constructor.parameter_types.join(", ")
                        ),
                    )
                    .at_line(constructor.line),
                );
            }
            if !constructor.is_protected() {
                issues.push(
                    violation(
                        implementation,
                        Rule::BundleShape,
                        format!(
                            "expected the constructor to be protected, found {}",
                            constructor.visibility()
                        ),
                    )
                    .at_line(constructor.line),
                );
            }
        }
        many => issues.push(
            violation(
                implementation,
                Rule::BundleShape,
                format!("found more than one constructor ({})", many.len()),
            )
            .at_line(many[1].line),
        ),
    }

    issues
}
