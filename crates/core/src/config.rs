//! Layered run configuration: defaults, TOML file, environment, flags.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File, FileFormat, Map};
use serde::{Deserialize, Serialize};

/// Tag used when none is configured.
pub const DEFAULT_TAG: &str = "base_game";
/// Prefix of environment overrides, e.g. `SCSDEFS_TAG`.
pub const ENV_PREFIX: &str = "SCSDEFS";

/// Settings for a single extraction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the unpacked definition tree.
    pub base_dir: PathBuf,
    /// Tag embedded in every output file name.
    pub tag: String,
    /// Directory the JSON documents are written to.
    pub output_dir: PathBuf,
    /// Also write `report_<tag>.json`.
    pub write_report: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            tag: DEFAULT_TAG.to_string(),
            output_dir: PathBuf::from("."),
            write_report: false,
        }
    }
}

/// Values supplied on the command line. `None` keeps the layered value.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_dir: Option<PathBuf>,
    pub tag: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub write_report: Option<bool>,
}

impl AppConfig {
    /// `<config dir>/scsdefs/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("scsdefs").join("config.toml"))
    }

    /// Resolve defaults, then the config file, then `SCSDEFS_*` variables.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_layers(path, None)
    }

    /// Like [`AppConfig::load`], reading `SCSDEFS_*` values from `env` instead
    /// of the process environment when it is `Some`.
    fn load_layers(path: Option<&Path>, env: Option<Map<String, String>>) -> Result<Self> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("base_dir", defaults.base_dir.to_string_lossy().to_string())?
            .set_default("tag", defaults.tag)?
            .set_default("output_dir", defaults.output_dir.to_string_lossy().to_string())?
            .set_default("write_report", defaults.write_report)?;

        match path {
            Some(path) => {
                builder =
                    builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
            }
            None => {
                if let Some(default) = Self::default_path() {
                    builder = builder
                        .add_source(File::from(default).format(FileFormat::Toml).required(false));
                }
            }
        }

        let config: Self = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .context("failed to assemble configuration")?
            .try_deserialize()
            .context("failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line values on top of the layered configuration.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Result<Self> {
        if let Some(base_dir) = overrides.base_dir {
            self.base_dir = base_dir;
        }
        if let Some(tag) = overrides.tag {
            self.tag = tag;
        }
        if let Some(output_dir) = overrides.output_dir {
            self.output_dir = output_dir;
        }
        if let Some(write_report) = overrides.write_report {
            self.write_report = write_report;
        }
        self.validate()?;
        Ok(self)
    }

    /// The tag becomes part of file names, so it must be a single path component.
    pub fn validate(&self) -> Result<()> {
        if self.tag.trim().is_empty() {
            bail!("run tag must not be empty");
        }
        if self
            .tag
            .chars()
            .any(|ch| matches!(ch, '/' | '\\') || ch.is_control())
        {
            bail!("run tag {:?} must not contain path separators", self.tag);
        }
        Ok(())
    }
}
