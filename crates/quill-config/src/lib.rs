//! Configuration management for quill.
//!
//! Parses `quill.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [render]
//! date_format = "%b %-d, %Y"
//!
//! [highlight]
//! line_class = "hl-line"
//! ```

use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the publish date format.
    pub date_format: Option<String>,
    /// Override the class of highlighted code lines.
    pub line_class: Option<String>,
}

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "quill.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Document rendering configuration.
    pub render: RenderConfig,
    /// Code block highlighting configuration.
    pub highlight: HighlightConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Document rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// chrono strftime format for the publish date next to the title.
    pub date_format: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            date_format: "%b %-d, %Y".to_owned(),
        }
    }
}

/// Code block highlighting configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Class added to lines selected by a code block's `highlight` attribute.
    pub line_class: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            line_class: "hl-line".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `quill.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading and validated with the rest of
    /// the configuration.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// a value is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(date_format) = &settings.date_format {
            self.render.date_format.clone_from(date_format);
        }
        if let Some(line_class) = &settings.line_class {
            self.highlight.line_class.clone_from(line_class);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_config_from(&current)
    }

    /// Search for config file in `start` and its parents.
    fn discover_config_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_render()?;
        self.validate_highlight()?;
        Ok(())
    }

    /// Validate render configuration.
    fn validate_render(&self) -> Result<(), ConfigError> {
        let format = &self.render.date_format;
        require_non_empty(format, "render.date_format")?;

        if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::Validation(format!(
                "render.date_format `{format}` is not a valid strftime format"
            )));
        }

        Ok(())
    }

    /// Validate highlight configuration.
    fn validate_highlight(&self) -> Result<(), ConfigError> {
        let class = &self.highlight.line_class;
        require_non_empty(class, "highlight.line_class")?;

        if !class
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ConfigError::Validation(
                "highlight.line_class must be a single class name".to_owned(),
            ));
        }

        Ok(())
    }
}
