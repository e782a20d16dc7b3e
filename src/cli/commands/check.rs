use std::path::Path;

use anyhow::{Context, Result, bail};
use rayon::prelude::*;

use super::super::args::CheckCommand;
use super::{CheckSummary, CommandResult, CommandSummary, helper::finish};
use crate::{
    config::{CONFIG_FILE_NAME, Config, ConfigLoadResult, load_config, parse_interface},
    core::{ArtifactKind, CheckKind, DiskSource, Target, VerificationReport, Verifier},
};

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let cwd = std::env::current_dir().context("Failed to read the working directory")?;
    let ConfigLoadResult {
        mut config,
        from_file,
    } = load_config(&cwd)?;

    if let Some(root) = &cmd.common.interface_root {
        config.interface_root = root.to_string_lossy().to_string();
    }
    if let Some(root) = &cmd.common.generated_root {
        config.generated_root = root.to_string_lossy().to_string();
    }

    let registry = config.registry()?;
    let settings = config.settings();
    ensure_dir("Interface root", &settings.interface_root)?;
    ensure_dir("Generated root", &settings.generated_root)?;

    let targets = select_targets(&cmd, &config)?;
    if targets.is_empty() {
        bail!(
            "No interfaces to verify. Add \"targets\" to {} or pass --interface.",
            CONFIG_FILE_NAME
        );
    }

    let only = (!cmd.checks.is_empty()).then_some(cmd.checks.as_slice());
    let planned: usize = targets.iter().map(|t| t.selected_checks(only).len()).sum();
    if planned == 0 {
        bail!(
            "None of the selected checks ({}) apply to the selected interfaces.",
            format_checks(&cmd.checks)
        );
    }
    tracing::debug!(
        targets = targets.len(),
        config_file = from_file,
        checks = ?only,
        "starting verification"
    );

    let provider = DiskSource;
    let verifier = Verifier::new(&provider, &registry, &settings);
    let reports: Vec<VerificationReport> = targets
        .par_iter()
        .flat_map_iter(|target| verifier.verify_target(target, only))
        .collect();

    Ok(finish(
        CommandSummary::Check(CheckSummary {
            reports,
            format: cmd.format,
        }),
        true,
    ))
}

/// Targets named on the command line replace the configured ones.
fn select_targets(cmd: &CheckCommand, config: &Config) -> Result<Vec<Target>> {
    if cmd.interfaces.is_empty() {
        return config.targets();
    }

    let kind = interface_kind(cmd)?;
    cmd.interfaces
        .iter()
        .map(|name| {
            Ok(Target {
                interface: parse_interface(name)?,
                kind,
                translations: cmd.checks.contains(&CheckKind::Translations),
                root_locale: cmd
                    .checks
                    .contains(&CheckKind::RootLocale)
                    .then(|| config.root_locale.clone()),
            })
        })
        .collect()
}

/// Kind of the `--interface` targets: `--kind`, else the shape check named
/// positionally, else logger.
fn interface_kind(cmd: &CheckCommand) -> Result<ArtifactKind> {
    let named: Vec<ArtifactKind> = cmd
        .checks
        .iter()
        .filter_map(|check| match check {
            CheckKind::Bundle => Some(ArtifactKind::Bundle),
            CheckKind::Logger => Some(ArtifactKind::Logger),
            CheckKind::Translations | CheckKind::RootLocale => None,
        })
        .collect();
    if named.contains(&ArtifactKind::Bundle) && named.contains(&ArtifactKind::Logger) {
        bail!("Interfaces given with --interface are either bundles or loggers, not both.");
    }
    match (cmd.kind, named.first()) {
        (Some(kind), Some(check)) if kind != *check => {
            bail!("--kind {} conflicts with the `{}` check.", kind, check)
        }
        (Some(kind), _) => Ok(kind),
        (None, Some(check)) => Ok(*check),
        (None, None) => Ok(ArtifactKind::Logger),
    }
}

fn format_checks(checks: &[CheckKind]) -> String {
    checks
        .iter()
        .map(CheckKind::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn ensure_dir(what: &str, path: &Path) -> Result<()> {
    if !path.is_dir() {
        bail!("{} is not a directory: {}", what, path.display());
    }
    Ok(())
}
