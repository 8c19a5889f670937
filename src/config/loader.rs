//! Scene file loading and CLI overrides
//!
//! Provides functions to read, parse, validate and override scene files.

use super::schema::SceneConfig;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read scene: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse scene: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Scene validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override scene values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override output path
    pub output: Option<PathBuf>,
    /// Override scale factor
    pub scale: Option<u8>,
    /// Override the largest overlay subset size
    pub max_k: Option<usize>,
    /// Skip the overlay pass
    pub no_overlay: bool,
    /// Force gamma correction of overlay colors
    pub gamma: bool,
}

/// Load and validate a scene file.
///
/// # Example
/// ```ignore
/// let scene = load_config(Path::new("scenes/venn.toml"))?;
/// ```
pub fn load_config(path: &Path) -> Result<SceneConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parse and validate a scene from TOML text.
pub fn parse_config(contents: &str) -> Result<SceneConfig, ConfigError> {
    let config: SceneConfig = toml::from_str(contents)?;
    check(config)
}

/// Validate a scene, turning its problems into a single error.
pub fn check(config: SceneConfig) -> Result<SceneConfig, ConfigError> {
    ensure_valid(&config)?;
    Ok(config)
}

/// Fail with [`ConfigError::Validation`] if the scene has any problem.
pub fn ensure_valid(config: &SceneConfig) -> Result<(), ConfigError> {
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }
    Ok(())
}

/// Merge CLI overrides into a loaded scene.
///
/// CLI values take precedence over file values. The result should be
/// checked again, since overrides can make a valid scene invalid.
pub fn merge_cli_overrides(config: &mut SceneConfig, overrides: &CliOverrides) {
    if let Some(ref output) = overrides.output {
        config.output.path = Some(output.clone());
    }
    if let Some(scale) = overrides.scale {
        config.output.scale = scale;
    }
    if let Some(max_k) = overrides.max_k {
        config.overlay.max_k = Some(max_k);
    }
    if overrides.no_overlay {
        config.overlay.enabled = false;
    }
    if overrides.gamma {
        config.overlay.gamma = true;
    }
}
