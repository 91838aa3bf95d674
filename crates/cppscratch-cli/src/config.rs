//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate only ever sees the
//! [`ScratchpadSettings`] built from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (`--root`, `--template`; applied by [`AppConfig::apply_overrides`])
//! 2. Environment variables: `CPPSCRATCH_<SECTION>__<KEY>`, e.g.
//!    `CPPSCRATCH_SCRATCHPAD__MARKER=@`
//! 3. Config file (`--config FILE` or [`AppConfig::config_path`])
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use cppscratch_core::domain::{
    BuildToolDescriptor, BuildToolRegistry, DEFAULT_ENTRY_FILE, DEFAULT_MARKER,
    ScratchpadSettings,
};

use crate::cli::GlobalArgs;
use crate::error::{CliError, CliResult};

const ENV_PREFIX: &str = "CPPSCRATCH";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub scratchpad: ScratchpadConfig,
    #[serde(default)]
    pub hooks: HooksConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Build tools in priority order. Kept last so TOML writes the
    /// `[[build_tools]]` tables after the plain sections.
    pub build_tools: Vec<BuildToolDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScratchpadConfig {
    /// Scratchpads are created directly under this directory.
    pub root: PathBuf,
    pub template_dir: PathBuf,
    /// Entry file, relative to the template root.
    pub entry_file: PathBuf,
    /// Cursor marker; exactly one character.
    pub marker: String,
}

/// Shell command lines run in the scratchpad directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HooksConfig {
    #[serde(default)]
    pub pre_compile: Vec<String>,
    #[serde(default)]
    pub pre_destroy: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub no_color: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Also write logs to this file (no ANSI, always DEBUG or finer).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scratchpad: ScratchpadConfig {
                root: std::env::temp_dir().join("cppscratch"),
                template_dir: Self::default_template_dir(),
                entry_file: PathBuf::from(DEFAULT_ENTRY_FILE),
                marker: DEFAULT_MARKER.to_string(),
            },
            hooks: HooksConfig::default(),
            output: OutputConfig::default(),
            logging: LoggingConfig::default(),
            build_tools: BuildToolRegistry::default().iter().cloned().collect(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, the config file, and the environment.
    ///
    /// An explicit `config_file` must exist unless `may_be_missing`; the
    /// default location is always optional.
    pub fn load(config_file: Option<&PathBuf>, may_be_missing: bool) -> CliResult<Self> {
        let (path, required) = match config_file {
            Some(p) => (p.clone(), !may_be_missing),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_from(path: &Path, required: bool, env: Environment) -> CliResult<Self> {
        let defaults = Config::try_from(&Self::default()).map_err(|e| config_error(&e))?;

        Config::builder()
            .add_source(defaults)
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            .add_source(env.prefix_separator("_").separator("__").try_parsing(true))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| config_error(&e))
    }

    /// Apply CLI flag overrides.
    pub fn apply_overrides(&mut self, args: &GlobalArgs) {
        if let Some(root) = &args.root {
            self.scratchpad.root = root.clone();
        }
        if let Some(template) = &args.template {
            self.scratchpad.template_dir = template.clone();
        }
    }

    /// Build the immutable core settings.
    ///
    /// Relative paths are resolved against the current directory. An
    /// existing scratch root is canonicalised so paths handed to `compile`
    /// and `destroy` compare equal after their own canonicalisation.
    pub fn to_settings(&self) -> CliResult<ScratchpadSettings> {
        let marker = single_char(&self.scratchpad.marker)?;
        let root = absolute(&self.scratchpad.root)?;
        let root = std::fs::canonicalize(&root).unwrap_or(root);
        let template = absolute(&self.scratchpad.template_dir)?;

        let settings = ScratchpadSettings::new(root, template)
            .with_entry_file(&self.scratchpad.entry_file)
            .with_marker(marker)
            .with_build_tools(BuildToolRegistry::new(self.build_tools.clone()));

        settings.validate().map_err(|e| CliError::ConfigError {
            message: e.to_string(),
            source: Some(Box::new(e)),
        })?;
        Ok(settings)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs`, falling back to `.cppscratch.toml`
    /// in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "cppscratch", "cppscratch")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".cppscratch.toml"))
    }

    fn default_template_dir() -> PathBuf {
        directories::ProjectDirs::from("com", "cppscratch", "cppscratch")
            .map(|d| d.data_dir().join("template"))
            .unwrap_or_else(|| PathBuf::from("template"))
    }

    /// Value at a dotted key, e.g. `scratchpad.marker` or `build_tools.0.name`.
    pub fn get(&self, key: &str) -> CliResult<serde_json::Value> {
        let root = serde_json::to_value(self).map_err(|e| CliError::ConfigError {
            message: format!("Failed to serialise config: {e}"),
            source: Some(Box::new(e)),
        })?;

        key.split('.')
            .try_fold(&root, |value, segment| match value {
                serde_json::Value::Array(items) => {
                    segment.parse::<usize>().ok().and_then(|i| items.get(i))
                }
                other => other.get(segment),
            })
            .cloned()
            .ok_or_else(|| CliError::ConfigError {
                message: format!("Unknown config key: '{key}'"),
                source: None,
            })
    }
}

fn single_char(marker: &str) -> CliResult<char> {
    let mut chars = marker.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(CliError::ConfigError {
            message: format!("marker must be exactly one character, got {marker:?}"),
            source: None,
        }),
    }
}

fn absolute(path: &Path) -> CliResult<PathBuf> {
    std::path::absolute(path).map_err(|e| CliError::IoError {
        message: format!("Failed to resolve '{}'", path.display()),
        source: e,
    })
}

fn config_error(e: &config::ConfigError) -> CliError {
    CliError::ConfigError {
        message: e.to_string(),
        source: None,
    }
}
