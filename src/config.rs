//! Configuration for the termtell binary.
//!
//! This module provides:
//! - TOML configuration file loading from `~/.termtell/config.toml`
//! - Conversion into a ready-to-use [`Console`]
//!
//! # Configuration File
//!
//! ```toml
//! # Label printed in front of every line (optional)
//! prefix = "build"
//!
//! # Use the current time as label instead
//! timestamp = false
//!
//! # Pause before starting $EDITOR, in milliseconds
//! editor_delay_ms = 1700
//!
//! # How long a relay read waits for data, in milliseconds
//! poll_interval_ms = 10
//!
//! [color]
//! color = "yellow"
//! bright = true
//! ```

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::color::ColorSpec;
use crate::core::console::{Console, ConsoleBuilder, DEFAULT_EDITOR_DELAY};
use crate::core::prefix::OutputPrefix;
use crate::core::source::DEFAULT_POLL_INTERVAL;

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fixed line label
    pub prefix: Option<String>,
    /// Label lines with the current time (wins over `prefix`)
    pub timestamp: bool,
    /// Editor start delay in milliseconds
    pub editor_delay_ms: u64,
    /// Relay poll interval in milliseconds
    pub poll_interval_ms: u64,
    /// Color of relayed output
    pub color: ColorSpec,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefix: None,
            timestamp: false,
            editor_delay_ms: DEFAULT_EDITOR_DELAY.as_millis() as u64,
            poll_interval_ms: DEFAULT_POLL_INTERVAL.as_millis() as u64,
            color: ColorSpec::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults
    pub fn load() -> Self {
        if let Some(path) = Self::get_config_path() {
            if path.exists() {
                match fs::read_to_string(&path) {
                    Ok(content) => match Self::parse(&content) {
                        Ok(config) => return config,
                        Err(e) => warn!("Ignoring invalid config {}: {}", path.display(), e),
                    },
                    Err(e) => warn!("Failed to read config {}: {}", path.display(), e),
                }
            }
        }
        Self::default()
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Get config file path
    pub fn get_config_path() -> Option<PathBuf> {
        config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Line label as configured
    pub fn output_prefix(&self) -> Option<OutputPrefix> {
        if self.timestamp {
            Some(OutputPrefix::timestamp())
        } else {
            self.prefix.clone().map(OutputPrefix::Fixed)
        }
    }

    pub fn editor_delay(&self) -> Duration {
        Duration::from_millis(self.editor_delay_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Console builder with prefix and delays applied
    pub fn console_builder(&self) -> ConsoleBuilder {
        Console::builder()
            .output_prefix(self.output_prefix())
            .editor_delay(self.editor_delay())
    }
}

/// `~/.termtell`, created on demand
pub fn config_dir() -> Option<PathBuf> {
    let dir = home_dir()?.join(".termtell");
    if !dir.exists() {
        let _ = fs::create_dir_all(&dir);
    }
    Some(dir)
}

// Get home directory
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("USERPROFILE")
        .or_else(|| std::env::var_os("HOME"))
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn test_empty_config_uses_defaults() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
        assert_eq!(Config::default().editor_delay(), Duration::from_millis(1700));
        assert!(Config::default().output_prefix().is_none());
    }

    #[test]
    fn test_full_config() {
        let config = Config::parse(
            r#"
            prefix = "build"
            editor_delay_ms = 0
            poll_interval_ms = 25

            [color]
            color = "yellow"
            bright = true
            "#,
        )
        .unwrap();
        assert_eq!(config.prefix.as_deref(), Some("build"));
        assert_eq!(config.editor_delay(), Duration::ZERO);
        assert_eq!(config.poll_interval(), Duration::from_millis(25));
        assert_eq!(config.color, ColorSpec::new().color(Color::Yellow).bright(true));
        assert_eq!(config.output_prefix().unwrap().render(), "[build] ");
    }

    #[test]
    fn test_timestamp_wins_over_prefix() {
        let config = Config::parse("prefix = \"x\"\ntimestamp = true\n").unwrap();
        let rendered = config.output_prefix().unwrap().render();
        assert_ne!(rendered, "[x] ");
        assert_eq!(rendered.len(), "[00:00:00.000] ".len());
    }

    #[test]
    fn test_invalid_color_is_rejected() {
        assert!(Config::parse("[color]\ncolor = \"orange\"\n").is_err());
    }
}
