//! Shared configuration loader for the markword tools.
//!
//! `defaults/markword.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files on
//! top of those defaults via [`Loader`] before deserializing into
//! [`MarkwordConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use markword_babel::formats::{HtmlTheme, WhatsappOptions};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/markword.default.toml");

/// Top-level configuration consumed by markword applications.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkwordConfig {
    pub convert: ConvertConfig,
}

/// Format-specific conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub whatsapp: WhatsappConfig,
    pub html: HtmlConfig,
    #[serde(default)]
    pub word: WordConfig,
}

/// Mirrors the knobs exposed by the WhatsApp transcoder.
#[derive(Debug, Clone, Deserialize)]
pub struct WhatsappConfig {
    pub bullet: String,
    pub rule_width: usize,
}

impl From<&WhatsappConfig> for WhatsappOptions {
    fn from(config: &WhatsappConfig) -> Self {
        WhatsappOptions {
            bullet: config.bullet.clone(),
            rule_width: config.rule_width,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HtmlConfig {
    pub theme: String,
}

impl HtmlConfig {
    /// The configured theme, if its name is known.
    pub fn theme(&self) -> Option<HtmlTheme> {
        HtmlTheme::from_name(&self.theme)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WordConfig {
    #[serde(default)]
    pub title: Option<String>,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<MarkwordConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MarkwordConfig, ConfigError> {
    Loader::new().build()
}
