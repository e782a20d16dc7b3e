//! Source parsers.
//!
//! - `lexer`: tokenizer with comment stripping and byte spans
//! - `java`: declaration-level parser producing a `SourceUnit`

pub mod java;
pub mod lexer;

use std::path::Path;

use super::{error::ParseError, model::SourceUnit, source::SourceProvider};

/// Read and parse one file through `provider`.
pub fn load_unit(provider: &dyn SourceProvider, path: &Path) -> Result<SourceUnit, ParseError> {
    let path_text = path.to_string_lossy().to_string();
    let content = provider
        .read(path)
        .map_err(|e| ParseError::new(&path_text, 0, format!("failed to read file: {}", e)))?;
    let unit = java::parse_source(&path_text, &content)?;
    tracing::debug!(
        path = %path_text,
        unit = %unit.name,
        kind = %unit.kind,
        fields = unit.fields.len(),
        methods = unit.methods.len(),
        "loaded source unit"
    );
    Ok(unit)
}
