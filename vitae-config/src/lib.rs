//! Shared configuration loader for the vitae toolchain.
//!
//! `defaults/vitae.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files
//! on top of those defaults via [`Loader`] before deserializing into
//! [`VitaeConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use vitae_babel::fetch::FetchOptions;
use vitae_babel::{ExportOptions, InlineMode, PageSize, PdfOptions};

const DEFAULT_TOML: &str = include_str!("../defaults/vitae.default.toml");

/// File picked up from the working directory when present.
pub const LOCAL_CONFIG_FILE: &str = "vitae.toml";

/// Top-level configuration consumed by vitae applications.
#[derive(Debug, Clone, Deserialize)]
pub struct VitaeConfig {
    pub fetch: FetchConfig,
    pub convert: ConvertConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

/// Conversion knobs shared by all formats.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub inline_mode: InlineModeConfig,
    pub title: String,
    pub pdf: PdfConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InlineModeConfig {
    Flatten,
    Cascade,
}

impl From<InlineModeConfig> for InlineMode {
    fn from(mode: InlineModeConfig) -> Self {
        match mode {
            InlineModeConfig::Flatten => InlineMode::Flatten,
            InlineModeConfig::Cascade => InlineMode::Cascade,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PdfConfig {
    pub page_size: PdfPageSize,
    pub margin_pt: f32,
    pub body_font_size: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PdfPageSize {
    #[serde(rename = "a4")]
    A4,
    #[serde(rename = "letter")]
    Letter,
}

impl From<PdfPageSize> for PageSize {
    fn from(size: PdfPageSize) -> Self {
        match size {
            PdfPageSize::A4 => PageSize::A4,
            PdfPageSize::Letter => PageSize::Letter,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub file_stem: String,
}

impl VitaeConfig {
    /// Library export options described by the `[convert]` section.
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            title: self.convert.title.clone(),
            inline_mode: self.convert.inline_mode.into(),
            pdf: PdfOptions {
                page_size: self.convert.pdf.page_size.into(),
                margin: self.convert.pdf.margin_pt,
                body_font_size: self.convert.pdf.body_font_size,
            },
        }
    }

    /// Reject values the converters and the client cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fetch.timeout_secs == 0 {
            return Err(ConfigError::Message(
                "fetch.timeout_secs must be at least 1".to_string(),
            ));
        }

        let pdf = &self.convert.pdf;
        let (width, height) = PageSize::from(pdf.page_size).dimensions();
        let max_margin = width.min(height) / 2.0;
        if !pdf.margin_pt.is_finite() || pdf.margin_pt < 0.0 || pdf.margin_pt >= max_margin {
            return Err(ConfigError::Message(format!(
                "convert.pdf.margin_pt must be between 0 and {max_margin}, got {}",
                pdf.margin_pt
            )));
        }
        if !pdf.body_font_size.is_finite() || pdf.body_font_size <= 0.0 {
            return Err(ConfigError::Message(format!(
                "convert.pdf.body_font_size must be positive, got {}",
                pdf.body_font_size
            )));
        }
        Ok(())
    }

    /// Client options described by the `[fetch]` section.
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            base_url: self.fetch.base_url.clone(),
            user_agent: self.fetch.user_agent.clone(),
            timeout: Duration::from_secs(self.fetch.timeout_secs),
        }
    }
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

    /// Finalize the builder, deserialize and validate the resulting configuration.
    pub fn build(self) -> Result<VitaeConfig, ConfigError> {
        let config: VitaeConfig = self.builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<VitaeConfig, ConfigError> {
    Loader::new().build()
}
