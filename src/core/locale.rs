//! Registry of well-known locale suffixes and their expected `LOCALE` initializers.
//!
//! Translation variants are named `<base><suffix>`, so lookups against a unit
//! name are tail matches. The table is validated on construction so that no
//! name can ever match two entries.

use serde::{Deserialize, Serialize};

use super::error::RegistryError;

/// Default `(suffix, initializer)` table: the JDK locale constants keyed by
/// their `Locale.toString()` form.
pub const DEFAULT_LOCALE_CONSTANTS: &[(&str, &str)] = &[
    ("en_CA", "Locale.CANADA"),
    ("fr_CA", "Locale.CANADA_FRENCH"),
    ("zh", "Locale.CHINESE"),
    ("en", "Locale.ENGLISH"),
    ("fr_FR", "Locale.FRANCE"),
    ("fr", "Locale.FRENCH"),
    ("de", "Locale.GERMAN"),
    ("de_DE", "Locale.GERMANY"),
    ("it", "Locale.ITALIAN"),
    ("it_IT", "Locale.ITALY"),
    ("ja_JP", "Locale.JAPAN"),
    ("ja", "Locale.JAPANESE"),
    ("ko_KR", "Locale.KOREA"),
    ("ko", "Locale.KOREAN"),
    ("zh_CN", "Locale.SIMPLIFIED_CHINESE"),
    ("zh_TW", "Locale.TRADITIONAL_CHINESE"),
    ("en_GB", "Locale.UK"),
    ("en_US", "Locale.US"),
];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LocaleEntry {
    pub suffix: String,
    #[serde(rename = "initializer")]
    pub expected_initializer: String,
}

impl LocaleEntry {
    pub fn new(suffix: impl Into<String>, expected_initializer: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            expected_initializer: expected_initializer.into(),
        }
    }
}

/// Immutable, ordered suffix table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleRegistry {
    entries: Vec<LocaleEntry>,
}

impl LocaleRegistry {
    /// Build a registry, rejecting empty, duplicate or overlapping suffixes.
    pub fn new(entries: Vec<LocaleEntry>) -> Result<Self, RegistryError> {
        for (index, entry) in entries.iter().enumerate() {
            if entry.suffix.is_empty() {
                return Err(RegistryError::EmptySuffix { index });
            }
            if entry.expected_initializer.trim().is_empty() {
                return Err(RegistryError::EmptyInitializer {
                    suffix: entry.suffix.clone(),
                });
            }
        }

        for (i, a) in entries.iter().enumerate() {
            for b in &entries[i + 1..] {
                if a.suffix == b.suffix {
                    return Err(RegistryError::Duplicate {
                        suffix: a.suffix.clone(),
                    });
                }
                let (longer, shorter) = if a.suffix.len() >= b.suffix.len() {
                    (a, b)
                } else {
                    (b, a)
                };
                if longer.suffix.ends_with(&shorter.suffix) {
                    return Err(RegistryError::Overlap {
                        longer: longer.suffix.clone(),
                        shorter: shorter.suffix.clone(),
                    });
                }
            }
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[LocaleEntry] {
        &self.entries
    }

    /// Expected initializer for an exact suffix.
    pub fn lookup(&self, suffix: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.suffix == suffix)
            .map(|e| e.expected_initializer.as_str())
    }

    /// Every entry whose suffix is a tail of `unit_name`, in table order.
    pub fn matching<'a>(&'a self, unit_name: &'a str) -> impl Iterator<Item = &'a LocaleEntry> {
        self.entries
            .iter()
            .filter(move |e| unit_name.ends_with(&e.suffix))
    }
}

impl Default for LocaleRegistry {
    fn default() -> Self {
        Self {
            entries: default_locale_entries(),
        }
    }
}

pub fn default_locale_entries() -> Vec<LocaleEntry> {
    DEFAULT_LOCALE_CONSTANTS
        .iter()
        .map(|(suffix, init)| LocaleEntry::new(*suffix, *init))
        .collect()
}
