//! Generated implementations carry `serialVersionUID = 1L`.

use super::helpers::violation;
use crate::{
    core::SourceUnit,
    issues::{Rule, ViolationIssue},
};

pub const SERIAL_VERSION_FIELD: &str = "serialVersionUID";
pub const SERIAL_VERSION_VALUE: &str = "1L";

pub fn check_serialization_marker(implementation: &SourceUnit) -> Vec<ViolationIssue> {
    let Some(field) = implementation.field(SERIAL_VERSION_FIELD) else {
        return vec![violation(
            implementation,
            Rule::SerializationMarker,
            format!("expected a {} field", SERIAL_VERSION_FIELD),
        )];
    };

    match field.literal_initializer.as_deref() {
        Some(SERIAL_VERSION_VALUE) => Vec::new(),
        found => vec![
            violation(
                implementation,
                Rule::SerializationMarker,
                format!(
                    "expected {} to be set to {}, found {}",
                    SERIAL_VERSION_FIELD,
                    SERIAL_VERSION_VALUE,
                    found.unwrap_or("no initializer")
                ),
            )
            .at_line(field.line),
        ],
    }
}
