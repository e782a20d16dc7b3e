//! Conformance rules for generated sources.
//!
//! Each rule is a pure function over already loaded units (plus the locale
//! registry where needed) returning the violations it found. Rules never
//! fail and never depend on each other's outcome.
//!
//! ## Module Structure
//!
//! - `helpers`: violation builder and message formatting
//! - `method_completeness`: interface methods present in the implementation
//! - `serialization_marker`: `serialVersionUID = 1L`
//! - `locale_accessor`: protected `getLoggingLocale()`, also required in variants
//! - `bundle_shape`: bundle singleton field and constructor
//! - `logger_shape`: logger constructor and `log` field
//! - `root_locale`: root implementation `LOCALE` sentinel
//! - `translation_isolation`: variants do not redeclare interface methods
//! - `override_requirement`: variant methods override the primary implementation
//! - `locale_constant`: variant `LOCALE` matches its name suffix

pub mod bundle_shape;
pub mod helpers;
pub mod locale_accessor;
pub mod locale_constant;
pub mod logger_shape;
pub mod method_completeness;
pub mod override_requirement;
pub mod root_locale;
pub mod serialization_marker;
pub mod translation_isolation;

pub use bundle_shape::check_bundle_shape;
pub use locale_accessor::{check_locale_accessor, check_variant_locale_accessor};
pub use locale_constant::check_locale_constant;
pub use logger_shape::{LoggerTypes, check_logger_shape};
pub use method_completeness::check_method_completeness;
pub use override_requirement::check_override_requirement;
pub use root_locale::{DEFAULT_ROOT_LOCALE, check_root_locale};
pub use serialization_marker::check_serialization_marker;
pub use translation_isolation::check_translation_isolation;
