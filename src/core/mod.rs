//! Core verification engine.
//!
//! ## Module Structure
//!
//! - `model`: structural model of a source unit (fields, methods, supertypes)
//! - `parsers`: tokenizer and declaration-level parser building the model
//! - `source`: file access behind the `SourceProvider` seam
//! - `locale`: locale suffix registry
//! - `discovery`: locating generated implementations and their translations
//! - `verifier`: stage sequencing and report assembly
//! - `error`: typed errors of the above

pub mod discovery;
pub mod error;
pub mod locale;
pub mod model;
pub mod parsers;
pub mod source;
pub mod verifier;

pub use discovery::{ArtifactKind, InterfaceId, Variant, find_primary, find_variants};
pub use error::{DiscoveryError, ParseError, RegistryError};
pub use locale::{DEFAULT_LOCALE_CONSTANTS, LocaleEntry, LocaleRegistry, default_locale_entries};
pub use model::{FieldDecl, MethodDecl, Modifier, Modifiers, SourceUnit, UnitKind, resolve_type_name};
pub use parsers::{java::parse_source, load_unit};
pub use source::{DiskSource, MemorySource, SourceProvider};
pub use verifier::{CheckKind, Target, VerificationReport, Verifier, VerifierSettings};
