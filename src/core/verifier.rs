//! Orchestration of discovery, loading and rule evaluation.
//!
//! A verification walks a fixed sequence of stages. Failing to discover or
//! load a required unit ends the walk with a single fatal entry; rule
//! violations are always accumulated in full. For translations each variant
//! is evaluated on its own, so one broken variant never hides the others.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Serialize;

use super::{
    discovery::{ArtifactKind, InterfaceId, find_primary, find_variants},
    error::DiscoveryError,
    locale::LocaleRegistry,
    model::SourceUnit,
    parsers::load_unit,
    source::SourceProvider,
};
use crate::{
    issues::{DiscoveryErrorIssue, Issue, ParseErrorIssue},
    rules::{
        LoggerTypes, check_bundle_shape, check_locale_accessor, check_locale_constant,
        check_logger_shape, check_method_completeness, check_override_requirement,
        check_root_locale, check_serialization_marker, check_translation_isolation,
        check_variant_locale_accessor,
    },
};

/// Kind of verification to run for an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckKind {
    /// Primary message bundle implementation.
    Bundle,
    /// Primary message logger implementation.
    Logger,
    /// Locale variants against the primary implementation.
    Translations,
    /// `LOCALE` sentinel of the primary implementation.
    RootLocale,
}

impl std::fmt::Display for CheckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckKind::Bundle => write!(f, "bundle"),
            CheckKind::Logger => write!(f, "logger"),
            CheckKind::Translations => write!(f, "translations"),
            CheckKind::RootLocale => write!(f, "root-locale"),
        }
    }
}

/// Progress of a single verification, logged at debug level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Start,
    InterfaceLoaded,
    ImplementationDiscovered,
    ImplementationLoaded,
    DefaultImplementationLoaded,
    VariantsDiscovered,
    VariantLoaded,
    RulesEvaluated,
    Reported,
}

/// An interface together with the checks configured for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub interface: InterfaceId,
    pub kind: ArtifactKind,
    pub translations: bool,
    /// Expected root `LOCALE` expression; `None` skips the root-locale check.
    pub root_locale: Option<String>,
}

impl Target {
    pub fn new(interface: InterfaceId, kind: ArtifactKind) -> Self {
        Self {
            interface,
            kind,
            translations: false,
            root_locale: None,
        }
    }

    /// Checks this target declares, in evaluation order.
    pub fn checks(&self) -> Vec<CheckKind> {
        let mut checks = vec![match self.kind {
            ArtifactKind::Bundle => CheckKind::Bundle,
            ArtifactKind::Logger => CheckKind::Logger,
        }];
        if self.translations {
            checks.push(CheckKind::Translations);
        }
        if self.root_locale.is_some() {
            checks.push(CheckKind::RootLocale);
        }
        checks
    }

    /// Declared checks that survive the `only` selection.
    pub fn selected_checks(&self, only: Option<&[CheckKind]>) -> Vec<CheckKind> {
        self.checks()
            .into_iter()
            .filter(|check| only.is_none_or(|selected| selected.contains(check)))
            .collect()
    }
}

/// Where to find sources and which types a logger is checked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifierSettings {
    pub interface_root: PathBuf,
    pub generated_root: PathBuf,
    pub extension: String,
    pub logger_types: LoggerTypes,
}

/// Outcome of one check for one interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReport {
    pub interface: String,
    pub check: CheckKind,
    pub issues: Vec<Issue>,
}

impl VerificationReport {
    pub fn passed(&self) -> bool {
        self.issues.is_empty()
    }
}

pub struct Verifier<'a> {
    provider: &'a dyn SourceProvider,
    registry: &'a LocaleRegistry,
    settings: &'a VerifierSettings,
}

impl<'a> Verifier<'a> {
    pub fn new(
        provider: &'a dyn SourceProvider,
        registry: &'a LocaleRegistry,
        settings: &'a VerifierSettings,
    ) -> Self {
        Self {
            provider,
            registry,
            settings,
        }
    }

    /// Run the declared checks of `target`, restricted to `only` when given.
    pub fn verify_target(
        &self,
        target: &Target,
        only: Option<&[CheckKind]>,
    ) -> Vec<VerificationReport> {
        target
            .selected_checks(only)
            .into_iter()
            .map(|check| match check {
                CheckKind::Bundle => self.verify_bundle(&target.interface),
                CheckKind::Logger => self.verify_logger(&target.interface),
                CheckKind::Translations => self.verify_translations(&target.interface, target.kind),
                CheckKind::RootLocale => self.verify_root_locale(
                    &target.interface,
                    target.kind,
                    target.root_locale.as_deref().unwrap_or_default(),
                ),
            })
            .collect()
    }

    pub fn verify_bundle(&self, interface: &InterfaceId) -> VerificationReport {
        self.run(interface, CheckKind::Bundle, || {
            let (intf, implementation) =
                self.load_pair(interface, ArtifactKind::Bundle, CheckKind::Bundle)?;
            let mut issues = common_issues(&intf, &implementation);
            issues.extend(check_bundle_shape(&implementation).into_iter().map(Issue::from));
            self.stage(interface, CheckKind::Bundle, Stage::RulesEvaluated);
            Ok(issues)
        })
    }

    pub fn verify_logger(&self, interface: &InterfaceId) -> VerificationReport {
        self.run(interface, CheckKind::Logger, || {
            let (intf, implementation) =
                self.load_pair(interface, ArtifactKind::Logger, CheckKind::Logger)?;
            let mut issues = common_issues(&intf, &implementation);
            issues.extend(
                check_logger_shape(&implementation, &self.settings.logger_types)
                    .into_iter()
                    .map(Issue::from),
            );
            self.stage(interface, CheckKind::Logger, Stage::RulesEvaluated);
            Ok(issues)
        })
    }

    pub fn verify_translations(&self, interface: &InterfaceId, kind: ArtifactKind) -> VerificationReport {
        let check = CheckKind::Translations;
        self.run(interface, check, || {
            let intf = self.load_interface(interface)?;
            self.stage(interface, check, Stage::InterfaceLoaded);

            let directory = interface.namespace_dir(&self.settings.generated_root);
            let listing = self.listing(interface, kind, &directory)?;
            let primary = find_primary(interface, kind, &self.settings.extension, &listing, &directory)
                .map_err(|e| discovery_issue(interface, e))?;
            self.stage(interface, check, Stage::ImplementationDiscovered);
            let default_implementation = self.load(&directory.join(primary))?;
            self.stage(interface, check, Stage::DefaultImplementationLoaded);

            let variants = find_variants(
                interface,
                kind,
                &self.settings.extension,
                &listing,
                &directory,
                true,
            )
            .map_err(|e| discovery_issue(interface, e))?;
            tracing::debug!(
                interface = %interface,
                count = variants.len(),
                "translations discovered"
            );
            self.stage(interface, check, Stage::VariantsDiscovered);

            let mut issues = Vec::new();
            for variant in &variants {
                let variant_unit = match self.load(&directory.join(&variant.file_name)) {
                    Ok(unit) => unit,
                    Err(fatal) => {
                        issues.push(fatal);
                        continue;
                    }
                };
                self.stage(interface, check, Stage::VariantLoaded);

                issues.extend(
                    check_translation_isolation(&intf, &variant_unit)
                        .into_iter()
                        .chain(check_variant_locale_accessor(&variant_unit))
                        .chain(check_locale_constant(&variant_unit, self.registry))
                        .chain(check_override_requirement(&default_implementation, &variant_unit))
                        .map(Issue::from),
                );
                self.stage(interface, check, Stage::RulesEvaluated);
            }
            Ok(issues)
        })
    }

    pub fn verify_root_locale(
        &self,
        interface: &InterfaceId,
        kind: ArtifactKind,
        expected: &str,
    ) -> VerificationReport {
        let check = CheckKind::RootLocale;
        self.run(interface, check, || {
            let implementation = self.load_primary(interface, kind, check)?;
            let issues = check_root_locale(&implementation, expected)
                .into_iter()
                .map(Issue::from)
                .collect();
            self.stage(interface, check, Stage::RulesEvaluated);
            Ok(issues)
        })
    }

    // ============================================================
    // Stages
    // ============================================================

    fn run(
        &self,
        interface: &InterfaceId,
        check: CheckKind,
        body: impl FnOnce() -> Result<Vec<Issue>, Issue>,
    ) -> VerificationReport {
        self.stage(interface, check, Stage::Start);
        let issues = body().unwrap_or_else(|fatal| vec![fatal]);
        self.stage(interface, check, Stage::Reported);
        tracing::debug!(
            interface = %interface,
            check = %check,
            issues = issues.len(),
            "verification finished"
        );
        VerificationReport {
            interface: interface.qualified_name(),
            check,
            issues,
        }
    }

    fn stage(&self, interface: &InterfaceId, check: CheckKind, stage: Stage) {
        tracing::debug!(interface = %interface, check = %check, stage = ?stage, "stage");
    }

    fn load_pair(
        &self,
        interface: &InterfaceId,
        kind: ArtifactKind,
        check: CheckKind,
    ) -> Result<(SourceUnit, SourceUnit), Issue> {
        let intf = self.load_interface(interface)?;
        self.stage(interface, check, Stage::InterfaceLoaded);
        let implementation = self.load_primary(interface, kind, check)?;
        Ok((intf, implementation))
    }

    fn load_interface(&self, interface: &InterfaceId) -> Result<SourceUnit, Issue> {
        let path = interface.source_path(&self.settings.interface_root, &self.settings.extension);
        self.load(&path)
    }

    fn load_primary(
        &self,
        interface: &InterfaceId,
        kind: ArtifactKind,
        check: CheckKind,
    ) -> Result<SourceUnit, Issue> {
        let directory = interface.namespace_dir(&self.settings.generated_root);
        let listing = self.listing(interface, kind, &directory)?;
        let file_name = find_primary(interface, kind, &self.settings.extension, &listing, &directory)
            .map_err(|e| discovery_issue(interface, e))?;
        tracing::debug!(interface = %interface, file = %file_name, "implementation discovered");

        self.stage(interface, check, Stage::ImplementationDiscovered);
        let unit = self.load(&directory.join(file_name))?;
        self.stage(interface, check, Stage::ImplementationLoaded);
        Ok(unit)
    }

    fn listing(
        &self,
        interface: &InterfaceId,
        kind: ArtifactKind,
        directory: &Path,
    ) -> Result<Vec<String>, Issue> {
        self.provider.list(directory).map_err(|e| {
            tracing::debug!(directory = %directory.display(), error = %e, "cannot list directory");
            discovery_issue(
                interface,
                DiscoveryError::NotFound {
                    interface: interface.qualified_name(),
                    what: format!("{} implementation", kind),
                    directory: directory.display().to_string(),
                },
            )
        })
    }

    fn load(&self, path: &Path) -> Result<SourceUnit, Issue> {
        load_unit(self.provider, path).map_err(|error| {
            let unit = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| error.path.clone());
            Issue::ParseError(ParseErrorIssue { unit, error })
        })
    }
}

/// Rules shared by bundles and loggers.
fn common_issues(interface: &SourceUnit, implementation: &SourceUnit) -> Vec<Issue> {
    check_method_completeness(interface, implementation)
        .into_iter()
        .chain(check_serialization_marker(implementation))
        .chain(check_locale_accessor(implementation))
        .map(Issue::from)
        .collect()
}

fn discovery_issue(interface: &InterfaceId, error: DiscoveryError) -> Issue {
    Issue::DiscoveryError(DiscoveryErrorIssue {
        unit: interface.qualified_name(),
        error,
    })
}
