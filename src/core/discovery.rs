//! Locating generated implementations by naming convention.
//!
//! Generated sources live next to each other in the namespace directory of
//! the interface:
//!
//! - primary implementation: `<Name>_$<kind>.<ext>`
//! - locale variants: `<Name>_$<kind>_<suffix>.<ext>`
//!
//! Matching runs over a plain list of file names so it can be tested without
//! touching the disk.

use std::{
    path::{Path, PathBuf},
    sync::LazyLock,
};

use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::DiscoveryError;

/// Which generator produced the implementation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Deserialize, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Logger,
    Bundle,
}

impl ArtifactKind {
    /// Name marker used in generated type names, e.g. `$logger`.
    pub fn marker(&self) -> &'static str {
        match self {
            ArtifactKind::Logger => "$logger",
            ArtifactKind::Bundle => "$bundle",
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactKind::Logger => write!(f, "logger"),
            ArtifactKind::Bundle => write!(f, "bundle"),
        }
    }
}

/// Namespace plus simple name of an interface, e.g. `org.acme` + `DefaultLogger`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InterfaceId {
    pub namespace: Vec<String>,
    pub simple_name: String,
}

impl InterfaceId {
    /// Parse a dotted qualified name. Every segment must be a valid identifier.
    pub fn parse(qualified: &str) -> Option<Self> {
        let mut segments: Vec<String> = qualified.split('.').map(str::to_string).collect();
        if segments.iter().any(|s| !is_identifier(s)) {
            return None;
        }
        let simple_name = segments.pop()?;
        Some(Self {
            namespace: segments,
            simple_name,
        })
    }

    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.simple_name.clone()
        } else {
            format!("{}.{}", self.namespace.join("."), self.simple_name)
        }
    }

    /// Directory of the namespace below `root`.
    pub fn namespace_dir(&self, root: &Path) -> PathBuf {
        self.namespace
            .iter()
            .fold(root.to_path_buf(), |dir, segment| dir.join(segment))
    }

    /// Path of the interface source below `root`.
    pub fn source_path(&self, root: &Path, extension: &str) -> PathBuf {
        self.namespace_dir(root)
            .join(format!("{}.{}", self.simple_name, extension))
    }
}

impl std::fmt::Display for InterfaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.qualified_name())
    }
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c == '_' || c == '$' || c.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c == '$' || c.is_alphanumeric())
}

/// A locale variant file and the suffix taken from its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub file_name: String,
    pub suffix: String,
}

/// Generated type name without extension: `<Name>_$<kind>[_<suffix>]`.
static GENERATED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?<name>.+?)_\$(?<kind>logger|bundle)(?:_(?<suffix>.+))?$")
        .expect("generated name pattern is valid")
});

/// A file name split along the generated naming convention.
struct GeneratedName<'a> {
    name: &'a str,
    kind: ArtifactKind,
    suffix: Option<&'a str>,
}

fn parse_generated<'a>(file_name: &'a str, extension: &str) -> Option<GeneratedName<'a>> {
    let stem = file_name.strip_suffix(extension)?.strip_suffix('.')?;
    let captures = GENERATED_NAME.captures(stem)?;
    let kind = match captures.name("kind")?.as_str() {
        "logger" => ArtifactKind::Logger,
        _ => ArtifactKind::Bundle,
    };
    Some(GeneratedName {
        name: captures.name("name")?.as_str(),
        kind,
        suffix: captures.name("suffix").map(|m| m.as_str()),
    })
}

/// Find the single primary implementation among `listing`.
///
/// Either marker is accepted; `kind` only names what was looked for. A
/// directory holding both `Name_$logger` and `Name_$bundle` is ambiguous.
pub fn find_primary(
    interface: &InterfaceId,
    kind: ArtifactKind,
    extension: &str,
    listing: &[String],
    directory: &Path,
) -> Result<String, DiscoveryError> {
    let mut matches: Vec<&String> = listing
        .iter()
        .filter(|n| {
            parse_generated(n, extension)
                .is_some_and(|g| g.name == interface.simple_name && g.suffix.is_none())
        })
        .collect();
    matches.sort();

    match matches.as_slice() {
        [] => Err(DiscoveryError::NotFound {
            interface: interface.qualified_name(),
            what: format!("{} implementation", kind),
            directory: directory.display().to_string(),
        }),
        [single] => Ok((*single).clone()),
        many => Err(DiscoveryError::Ambiguous {
            interface: interface.qualified_name(),
            what: format!("{} implementation", kind),
            candidates: many.iter().map(|s| s.to_string()).collect(),
        }),
    }
}

/// Find every locale variant among `listing`, sorted by file name.
///
/// An empty result is an error only when `required` is set.
pub fn find_variants(
    interface: &InterfaceId,
    kind: ArtifactKind,
    extension: &str,
    listing: &[String],
    directory: &Path,
    required: bool,
) -> Result<Vec<Variant>, DiscoveryError> {
    let mut variants: Vec<Variant> = listing
        .iter()
        .filter_map(|file_name| {
            let generated = parse_generated(file_name, extension)?;
            if generated.name != interface.simple_name || generated.kind != kind {
                return None;
            }
            Some(Variant {
                file_name: file_name.clone(),
                suffix: generated.suffix?.to_string(),
            })
        })
        .collect();
    variants.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    if variants.is_empty() && required {
        return Err(DiscoveryError::NotFound {
            interface: interface.qualified_name(),
            what: format!("{} translation", kind),
            directory: directory.display().to_string(),
        });
    }
    Ok(variants)
}
