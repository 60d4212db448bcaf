//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/md2doc/md2doc.toml`
//! 3. Explicit config file passed on the command line
//! 4. Environment variables: `MD2DOC_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::ApplicationError;

/// Heading detection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HeadingSettings {
    /// Marker character repeated once per level (default: '#')
    pub marker: char,
    /// Strip marker runs longer than six even though they get no heading style
    pub strip_overflow: bool,
}

impl Default for HeadingSettings {
    fn default() -> Self {
        Self {
            marker: '#',
            strip_overflow: true,
        }
    }
}

/// Bold span settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BoldSettings {
    /// Marker character, doubled on each side of a span (default: '*')
    pub marker: char,
}

impl Default for BoldSettings {
    fn default() -> Self {
        Self { marker: '*' }
    }
}

/// List structuring settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ListSettings {
    /// Leading spaces per nesting level (default: 2)
    pub indent_width: usize,
}

impl Default for ListSettings {
    fn default() -> Self {
        Self { indent_width: 2 }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub heading: RawHeadingSettings,
    pub bold: RawBoldSettings,
    pub list: RawListSettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawHeadingSettings {
    pub marker: Option<char>,
    pub strip_overflow: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawBoldSettings {
    pub marker: Option<char>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawListSettings {
    pub indent_width: Option<usize>,
}

/// Unified configuration for md2doc.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub heading: HeadingSettings,
    pub bold: BoldSettings,
    pub list: ListSettings,
}

/// Get the XDG config directory for md2doc.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "md2doc").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("md2doc.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn single_char(key: &str, value: &str) -> Result<char, ApplicationError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ApplicationError::Config {
            message: format!("{key} must be a single character, got {value:?}"),
        }),
    }
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            heading: HeadingSettings {
                marker: overlay.heading.marker.unwrap_or(self.heading.marker),
                strip_overflow: overlay
                    .heading
                    .strip_overflow
                    .unwrap_or(self.heading.strip_overflow),
            },
            bold: BoldSettings {
                marker: overlay.bold.marker.unwrap_or(self.bold.marker),
            },
            list: ListSettings {
                indent_width: overlay.list.indent_width.unwrap_or(self.list.indent_width),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file, must exist if given
    #[instrument(level = "debug")]
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        // 3. Explicit config file
        if let Some(path) = config_file {
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Environment variables
        current = Self::apply_env_overrides(current)?;

        current.validate()?;
        Ok(current)
    }

    /// Apply MD2DOC_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("MD2DOC")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Some(val) = present(config.get_string("heading.marker"))? {
            settings.heading.marker = single_char("heading.marker", &val)?;
        }
        if let Some(val) = present(config.get_bool("heading.strip_overflow"))? {
            settings.heading.strip_overflow = val;
        }
        if let Some(val) = present(config.get_string("bold.marker"))? {
            settings.bold.marker = single_char("bold.marker", &val)?;
        }
        if let Some(val) = present(config.get_int("list.indent_width"))? {
            settings.list.indent_width =
                usize::try_from(val).map_err(|_| ApplicationError::Config {
                    message: format!("list.indent_width must not be negative, got {val}"),
                })?;
        }
        Ok(settings)
    }

    /// Reject settings the transforms cannot work with.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.list.indent_width == 0 {
            return Err(ApplicationError::Config {
                message: "list.indent_width must be at least 1".to_string(),
            });
        }
        let markers = [
            ("heading.marker", self.heading.marker),
            ("bold.marker", self.bold.marker),
        ];
        for (key, marker) in markers {
            if marker.is_alphanumeric() || marker.is_whitespace() {
                return Err(ApplicationError::Config {
                    message: format!(
                        "{key} must not be alphanumeric or whitespace, got {marker:?}"
                    ),
                });
            }
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r##"# md2doc configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/md2doc/md2doc.toml
#   Local:  --config <file>
#   Env:    MD2DOC_* environment variables, e.g. MD2DOC_BOLD__MARKER="_"

[heading]
# Character repeated once per heading level
# marker = "#"

# Remove marker runs longer than six (they never get a heading style)
# strip_overflow = true

[bold]
# Character doubled on each side of a bold span
# marker = "*"

[list]
# Leading spaces per list nesting level
# indent_width = 2
"##
        .to_string()
    }
}

/// Unset keys are `None`; set but malformed keys are errors.
fn present<T>(lookup: Result<T, ConfigError>) -> Result<Option<T>, ApplicationError> {
    match lookup {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
