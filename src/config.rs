//! Wrapper configuration.
//!
//! Every [`ImageWiz`](crate::ImageWiz) carries a compositing style and export
//! settings. The defaults are right for most callers; an app that wants a
//! different look can ship a `imgkit.toml`:
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [compositing]
//! filter = "triangle"       # nearest | triangle | catmull_rom | gaussian | lanczos3
//! antialias = true          # soften circle-crop edges over one pixel
//!
//! [export]
//! png_compression = "best"  # fast | default | best (always lossless)
//! jpeg_quality = 90         # 0-100, used by the *_default_quality helpers
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{CompositingStyle, ExportSettings, Filter, PngCompression, Quality};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from TOML. All fields have defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WizConfig {
    /// How buffers are drawn into each other.
    pub compositing: CompositingConfig,
    /// Encoder settings.
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompositingConfig {
    /// Resampling filter for scale operations.
    pub filter: Filter,
    /// Antialias circle-crop edges.
    pub antialias: bool,
}

impl Default for CompositingConfig {
    fn default() -> Self {
        let style = CompositingStyle::default();
        Self {
            filter: style.filter,
            antialias: style.antialias,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    pub png_compression: PngCompression,
    /// Quality for JPEG exports that don't pass one explicitly.
    pub jpeg_quality: u8,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            png_compression: PngCompression::default(),
            jpeg_quality: Quality::default().value(),
        }
    }
}

impl WizConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: WizConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if Quality::checked(self.export.jpeg_quality).is_none() {
            return Err(ConfigError::Validation(
                "export.jpeg_quality must be 0-100".into(),
            ));
        }
        Ok(())
    }

    pub fn compositing_style(&self) -> CompositingStyle {
        CompositingStyle {
            filter: self.compositing.filter,
            antialias: self.compositing.antialias,
        }
    }

    /// Export settings; an out-of-range quality falls back to the default.
    pub fn export_settings(&self) -> ExportSettings {
        ExportSettings {
            png_compression: self.export.png_compression,
            jpeg_quality: Quality::checked(self.export.jpeg_quality).unwrap_or_default(),
        }
    }
}

/// A documented config file with every option at its default.
pub fn stock_config_toml() -> &'static str {
    r#"# imgkit configuration
# All options are optional - defaults shown below

[compositing]
# Resampling filter: nearest | triangle | catmull_rom | gaussian | lanczos3
filter = "triangle"
# Soften circle-crop edges over one pixel
antialias = true

[export]
# PNG zlib effort: fast | default | best (always lossless)
png_compression = "best"
# JPEG quality (0-100) for exports that don't pass one explicitly
jpeg_quality = 90
"#
}
