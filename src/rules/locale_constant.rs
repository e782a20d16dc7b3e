//! A locale variant's `LOCALE` constant matches its name suffix.

use super::{helpers::violation, root_locale::LOCALE_FIELD};
use crate::{
    core::{LocaleRegistry, SourceUnit},
    issues::{Rule, ViolationIssue},
};

/// Check `LOCALE` against every registry entry whose suffix ends the unit name.
///
/// Names without a known suffix are not checked.
pub fn check_locale_constant(variant: &SourceUnit, registry: &LocaleRegistry) -> Vec<ViolationIssue> {
    let mut issues = Vec::new();
    for entry in registry.matching(&variant.name) {
        let Some(field) = variant.field(LOCALE_FIELD) else {
            issues.push(violation(
                variant,
                Rule::LocaleConstantNaming,
                format!(
                    "expected a {} field for locale suffix {}",
                    LOCALE_FIELD, entry.suffix
                ),
            ));
            continue;
        };

        let found = field.literal_initializer.as_deref();
        if found != Some(entry.expected_initializer.as_str()) {
            issues.push(
                violation(
                    variant,
                    Rule::LocaleConstantNaming,
                    format!(
                        "expected {} to be set to {}, found {}",
                        LOCALE_FIELD,
                        entry.expected_initializer,
                        found.unwrap_or("no initializer")
                    ),
                )
                .at_line(field.line),
            );
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::core::LocaleEntry;
    use crate::rules::helpers::unit;
    use crate::rules::locale_constant::*;

    fn variant(name: &str, initializer: &str) -> SourceUnit {
        unit(
            &format!("{}.java", name),
            &format!(
                "class {} extends Log_$logger {{ private static final Locale LOCALE = {}; }}",
                name, initializer
            ),
        )
    }

    #[test]
    fn test_matching_constant() {
        let registry = LocaleRegistry::default();
        assert!(check_locale_constant(&variant("Log_$logger_en_US", "Locale.US"), &registry).is_empty());
    }

    #[test]
    fn test_mismatched_constant() {
        let registry = LocaleRegistry::default();
        let issues = check_locale_constant(&variant("Log_$logger_en_US", "Locale.UK"), &registry);
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].message,
            "expected LOCALE to be set to Locale.US, found Locale.UK"
        );
    }

    #[test]
    fn test_unknown_suffix_not_checked() {
        let registry = LocaleRegistry::default();
        let unit = variant("Log_$logger_es_MX", r#"new Locale("es", "MX")"#);
        assert!(check_locale_constant(&unit, &registry).is_empty());
    }

    #[test]
    fn test_missing_locale_field() {
        let registry = LocaleRegistry::default();
        let unit = unit(
            "Log_$logger_fr.java",
            "class Log_$logger_fr extends Log_$logger { }",
        );
        let issues = check_locale_constant(&unit, &registry);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "expected a LOCALE field for locale suffix fr");
    }

    #[test]
    fn test_substituted_registry() {
        let registry = LocaleRegistry::new(vec![LocaleEntry::new("US", "Locale.US")]).unwrap();
        assert!(check_locale_constant(&variant("LogUS", "Locale.US"), &registry).is_empty());
        assert_eq!(
            check_locale_constant(&variant("LogUS", "Locale.UK"), &registry).len(),
            1
        );
    }
}
