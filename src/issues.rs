//! Issue types produced by a verification run.
//!
//! Every entry of a report is an [`Issue`]: either a rule violation or a
//! fatal failure (parse or discovery) that kept the rules from running.
//! There is no warning tier; any issue fails the run.

use enum_dispatch::enum_dispatch;
use serde::Serialize;

use crate::core::{DiscoveryError, ParseError};

// ============================================================
// Rule
// ============================================================

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Rule {
    MethodCompleteness,
    SerializationMarker,
    LocaleAccessor,
    BundleShape,
    LoggerShape,
    RootLocale,
    TranslationIsolation,
    OverrideRequirement,
    LocaleConstantNaming,
    VariantLocaleAccessor,
    ParseError,
    DiscoveryError,
}

impl Rule {
    pub fn is_fatal(&self) -> bool {
        matches!(self, Rule::ParseError | Rule::DiscoveryError)
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::MethodCompleteness => write!(f, "method-completeness"),
            Rule::SerializationMarker => write!(f, "serialization-marker"),
            Rule::LocaleAccessor => write!(f, "locale-accessor"),
            Rule::BundleShape => write!(f, "bundle-shape"),
            Rule::LoggerShape => write!(f, "logger-shape"),
            Rule::RootLocale => write!(f, "root-locale"),
            Rule::TranslationIsolation => write!(f, "translation-isolation"),
            Rule::OverrideRequirement => write!(f, "override-requirement"),
            Rule::LocaleConstantNaming => write!(f, "locale-constant-naming"),
            Rule::VariantLocaleAccessor => write!(f, "variant-locale-accessor"),
            Rule::ParseError => write!(f, "parse-error"),
            Rule::DiscoveryError => write!(f, "discovery-error"),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// A structural rule did not hold for a unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViolationIssue {
    /// Name of the unit the rule was evaluated against.
    pub unit: String,
    pub rule: Rule,
    pub message: String,
    /// Source file of the unit, when known.
    pub file_path: Option<String>,
    /// Line of the offending declaration, when there is one.
    pub line: Option<usize>,
}

impl ViolationIssue {
    pub fn new(unit: impl Into<String>, rule: Rule, message: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            rule,
            message: message.into(),
            file_path: None,
            line: None,
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn in_file(mut self, file_path: impl Into<String>) -> Self {
        self.file_path = Some(file_path.into());
        self
    }
}

/// A source file could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    /// Unit the file was expected to declare.
    pub unit: String,
    pub error: ParseError,
}

/// Generated files could not be located unambiguously.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryErrorIssue {
    /// Qualified name of the interface.
    pub unit: String,
    pub error: DiscoveryError,
}

// ============================================================
// Issue Enum
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    Violation(ViolationIssue),
    ParseError(ParseErrorIssue),
    DiscoveryError(DiscoveryErrorIssue),
}

// ============================================================
// Report Trait
// ============================================================

/// Uniform view over issues for reporters.
#[enum_dispatch]
pub trait Report {
    fn unit(&self) -> &str;

    fn rule(&self) -> Rule;

    fn message(&self) -> String;

    /// `(file, line)` to point at; line 0 means the whole file.
    fn location(&self) -> Option<(&str, usize)> {
        None
    }
}

impl Report for ViolationIssue {
    fn unit(&self) -> &str {
        &self.unit
    }

    fn rule(&self) -> Rule {
        self.rule
    }

    fn message(&self) -> String {
        self.message.clone()
    }

    fn location(&self) -> Option<(&str, usize)> {
        self.file_path
            .as_deref()
            .map(|path| (path, self.line.unwrap_or(0)))
    }
}

impl Report for ParseErrorIssue {
    fn unit(&self) -> &str {
        &self.unit
    }

    fn rule(&self) -> Rule {
        Rule::ParseError
    }

    fn message(&self) -> String {
        self.error.reason.clone()
    }

    fn location(&self) -> Option<(&str, usize)> {
        Some((&self.error.path, self.error.line))
    }
}

impl Report for DiscoveryErrorIssue {
    fn unit(&self) -> &str {
        &self.unit
    }

    fn rule(&self) -> Rule {
        Rule::DiscoveryError
    }

    fn message(&self) -> String {
        self.error.to_string()
    }
}

// ============================================================
// Serializable record
// ============================================================

/// Flat `{unit, rule, message}` record used for machine-readable output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueRecord {
    pub unit: String,
    pub rule: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl From<&Issue> for IssueRecord {
    fn from(issue: &Issue) -> Self {
        let location = issue.location();
        Self {
            unit: issue.unit().to_string(),
            rule: issue.rule().to_string(),
            message: issue.message(),
            file: location.map(|(path, _)| path.to_string()),
            line: location.map(|(_, line)| line).filter(|line| *line > 0),
        }
    }
}
