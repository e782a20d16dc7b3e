//! Shape of a generated message logger.
//!
//! A logger takes the logging facade as its only constructor argument. When
//! it does not extend the delegating base class it has to keep the facade in
//! a `protected final log` field itself.

use super::helpers::violation;
use crate::{
    core::SourceUnit,
    issues::{Rule, ViolationIssue},
};

pub const LOG_FIELD: &str = "log";

/// Qualified type names a logger implementation is checked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerTypes {
    /// Type of the single constructor parameter.
    pub facade: String,
    /// Base class that already holds the facade.
    pub delegating_base: String,
}

impl Default for LoggerTypes {
    fn default() -> Self {
        Self {
            facade: "org.jboss.logging.Logger".to_string(),
            delegating_base: "org.jboss.logging.DelegatingBasicLogger".to_string(),
        }
    }
}

pub fn check_logger_shape(implementation: &SourceUnit, types: &LoggerTypes) -> Vec<ViolationIssue> {
    let mut issues = Vec::new();

    let constructors: Vec<_> = implementation.constructors().collect();
    match constructors.as_slice() {
        [] => issues.push(violation(
            implementation,
            Rule::LoggerShape,
            "no constructor found",
        )),
        [constructor] => match constructor.parameter_types.as_slice() {
            [parameter] => {
                if !implementation.refers_to(parameter, &types.facade) {
                    let resolved = implementation.resolve_type(parameter);
                    issues.push(
                        violation(
                            implementation,
                            Rule::LoggerShape,
                            format!(
                                "expected the constructor parameter to be {}, found {}",
                                types.facade, resolved
                            ),
                        )
                        .at_line(constructor.line),
                    );
                }
            }
            parameters => issues.push(
                violation(
                    implementation,
                    Rule::LoggerShape,
                    format!(
                        "expected exactly one constructor parameter, found {} ({})",
                        parameters.len(),
                        parameters.join(", ")
                    ),
                )
                .at_line(constructor.line),
            ),
        },
        many => issues.push(
            violation(
                implementation,
                Rule::LoggerShape,
                format!("found more than one constructor ({})", many.len()),
            )
            .at_line(many[1].line),
        ),
    }

    if !implementation.extends(&types.delegating_base) {
        match implementation.field(LOG_FIELD) {
            None => issues.push(violation(
                implementation,
                Rule::LoggerShape,
                format!(
                    "expected a {} field when not extending {}",
                    LOG_FIELD, types.delegating_base
                ),
            )),
            Some(field) if !(field.is_protected() && field.is_final()) => issues.push(
                violation(
                    implementation,
                    Rule::LoggerShape,
                    format!("expected the {} field to be protected and final", LOG_FIELD),
                )
                .at_line(field.line),
            ),
            Some(_) => {}
        }
    }

    issues
}
