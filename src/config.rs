use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::{
    core::{
        ArtifactKind, InterfaceId, LocaleEntry, LocaleRegistry, Target, VerifierSettings,
        default_locale_entries,
    },
    rules::{DEFAULT_ROOT_LOCALE, LoggerTypes},
};

pub const CONFIG_FILE_NAME: &str = ".bundlecheckrc.json";

/// One interface to verify and the checks it opts into.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetConfig {
    pub interface: String,
    #[serde(default = "default_kind")]
    pub kind: ArtifactKind,
    #[serde(default)]
    pub translations: bool,
    /// Expected `LOCALE` of the primary implementation; absent skips the check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_locale: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_interface_root")]
    pub interface_root: String,
    #[serde(default = "default_generated_root")]
    pub generated_root: String,
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default = "default_logger_type")]
    pub logger_type: String,
    #[serde(default = "default_delegating_base_type")]
    pub delegating_base_type: String,
    /// Root locale expression used when `root-locale` is requested from the command line.
    #[serde(default = "default_root_locale")]
    pub root_locale: String,
    #[serde(default = "default_locale_entries")]
    pub locale_constants: Vec<LocaleEntry>,
    #[serde(default)]
    pub targets: Vec<TargetConfig>,
}

fn default_kind() -> ArtifactKind {
    ArtifactKind::Logger
}

fn default_interface_root() -> String {
    "./src/main/java".to_string()
}

fn default_generated_root() -> String {
    "./target/generated-sources/annotations".to_string()
}

fn default_extension() -> String {
    "java".to_string()
}

fn default_logger_type() -> String {
    LoggerTypes::default().facade
}

fn default_delegating_base_type() -> String {
    LoggerTypes::default().delegating_base
}

fn default_root_locale() -> String {
    DEFAULT_ROOT_LOCALE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interface_root: default_interface_root(),
            generated_root: default_generated_root(),
            extension: default_extension(),
            logger_type: default_logger_type(),
            delegating_base_type: default_delegating_base_type(),
            root_locale: default_root_locale(),
            locale_constants: default_locale_entries(),
            targets: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for empty roots or types, malformed interface names,
    /// or a locale table the registry rejects.
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("interfaceRoot", &self.interface_root),
            ("generatedRoot", &self.generated_root),
            ("extension", &self.extension),
            ("loggerType", &self.logger_type),
            ("delegatingBaseType", &self.delegating_base_type),
            ("rootLocale", &self.root_locale),
        ] {
            if value.trim().is_empty() {
                bail!("'{}' must not be empty", key);
            }
        }

        for target in &self.targets {
            parse_interface(&target.interface).context("Invalid entry in 'targets'")?;
            if target.root_locale.as_deref().is_some_and(|r| r.trim().is_empty()) {
                bail!("'rootLocale' of target \"{}\" must not be empty", target.interface);
            }
        }

        self.registry()?;
        Ok(())
    }

    pub fn registry(&self) -> Result<LocaleRegistry> {
        LocaleRegistry::new(self.locale_constants.clone())
            .context("Invalid locale table in 'localeConstants'")
    }

    pub fn settings(&self) -> VerifierSettings {
        VerifierSettings {
            interface_root: PathBuf::from(&self.interface_root),
            generated_root: PathBuf::from(&self.generated_root),
            extension: self.extension.clone(),
            logger_types: LoggerTypes {
                facade: self.logger_type.clone(),
                delegating_base: self.delegating_base_type.clone(),
            },
        }
    }

    pub fn targets(&self) -> Result<Vec<Target>> {
        self.targets
            .iter()
            .map(|t| {
                Ok(Target {
                    interface: parse_interface(&t.interface)?,
                    kind: t.kind,
                    translations: t.translations,
                    root_locale: t.root_locale.clone(),
                })
            })
            .collect()
    }
}

/// Parse a qualified interface name such as `org.acme.DefaultLogger`.
pub fn parse_interface(name: &str) -> Result<InterfaceId> {
    match InterfaceId::parse(name) {
        Some(id) => Ok(id),
        None => bail!("Invalid interface name: \"{}\"", name),
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            tracing::debug!(path = %path.display(), targets = config.targets.len(), "loaded config");
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
