//! bundlecheck - structural conformance checker for generated i18n sources
//!
//! Annotation processors generate message logger (`<Name>_$logger`) and
//! message bundle (`<Name>_$bundle`) implementations of annotated Java
//! interfaces, plus one subclass per translation locale. bundlecheck loads
//! those sources into a structural model and verifies their shape: every
//! interface method implemented, serialization marker, locale accessor,
//! constructor and field conventions, and locale constants matching the
//! translation's name suffix.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Source model, parser, discovery and the verifier
//! - `issues`: Issue type definitions and reporting
//! - `rules`: Conformance rules evaluated by the verifier

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod rules;
