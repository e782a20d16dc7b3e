//! Typed failures of the verification core.
//!
//! These abort verification of a single unit or interface. They never abort
//! sibling verifications; the verifier turns them into one report entry each.

use thiserror::Error;

/// A source file could not be read or its declarations could not be extracted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}:{line}: {reason}")]
pub struct ParseError {
    pub path: String,
    /// 1-based line, 0 when the file could not be read at all.
    pub line: usize,
    pub reason: String,
}

impl ParseError {
    pub fn new(path: impl Into<String>, line: usize, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }
}

/// Generated artifacts for an interface could not be located unambiguously.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryError {
    #[error("no {what} found for {interface} in {directory}")]
    NotFound {
        interface: String,
        what: String,
        directory: String,
    },
    #[error("found more than one {what} for {interface}: {}", candidates.join(", "))]
    Ambiguous {
        interface: String,
        what: String,
        candidates: Vec<String>,
    },
}

/// The locale registry table is inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("locale entry #{index} has an empty suffix")]
    EmptySuffix { index: usize },
    #[error("locale suffix \"{suffix}\" has an empty initializer")]
    EmptyInitializer { suffix: String },
    #[error("locale suffix \"{suffix}\" is declared more than once")]
    Duplicate { suffix: String },
    #[error("locale suffixes \"{longer}\" and \"{shorter}\" overlap: a name ending in the first also ends in the second")]
    Overlap { longer: String, shorter: String },
}
