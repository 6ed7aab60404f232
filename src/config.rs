use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{Level, warn};

pub const APP_DIR: &str = "promptboard";
pub const FILENAME: &str = "promptboard.toml";

pub const ENV_MONGODB_URL: &str = "MONGODB_URL";
pub const ENV_LOG_LEVEL: &str = "PROMPTBOARD_LOG_LEVEL";

const MIN_WINDOW_DIMENSION: f32 = 320.0;
const MAX_WINDOW_DIMENSION: f32 = 4096.0;

/// Settings loaded from the TOML file, with env var overrides applied on top
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Connection string handed to the database bootstrap
    #[serde(default = "default_mongodb_url")]
    pub mongodb_url: String,

    /// One of error, warn, info, debug, trace
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_window_width")]
    pub window_width: f32,

    #[serde(default = "default_window_height")]
    pub window_height: f32,
}

fn default_mongodb_url() -> String {
    "mongodb://127.0.0.1:27017/promptboard".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_window_width() -> f32 {
    480.0
}

fn default_window_height() -> f32 {
    420.0
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mongodb_url: default_mongodb_url(),
            log_level: default_log_level(),
            window_width: default_window_width(),
            window_height: default_window_height(),
        }
    }
}

/// A config value that was out of range and got replaced
#[derive(Debug, Clone, PartialEq)]
pub struct Correction {
    pub field: &'static str,
    pub found: String,
    pub using: String,
    pub reason: &'static str,
}

impl Correction {
    pub fn log(&self) {
        warn!(field = self.field, found = %self.found, using = %self.using, "{}", self.reason);
    }
}

impl AppConfig {
    pub fn config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(APP_DIR);
        path.push(FILENAME);
        path
    }

    pub fn load() -> Result<(Self, Vec<Correction>)> {
        Self::load_from(&Self::config_path())
    }

    /// Load from `path`, writing a default file first if none exists.
    /// Env overrides and clamping are applied to the result. Corrections are
    /// returned rather than logged, since this usually runs before tracing is up.
    pub fn load_from(path: &Path) -> Result<(Self, Vec<Correction>)> {
        let mut config = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            toml::from_str::<AppConfig>(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?
        } else {
            let config = Self::default();
            // Logging isn't up yet, so report on stdout like a first-run notice
            match config.save_to(path) {
                Ok(()) => {
                    println!("Generated config file: {}", path.display());
                    println!("Edit it to customize settings (env vars still override)");
                }
                Err(e) => eprintln!("Failed to write default config: {e:#}"),
            }
            config
        };

        config.apply_overrides(|key| env::var(key).ok());
        let corrections = config.validate_and_clamp();
        Ok((config, corrections))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Apply overrides from a key lookup (the process environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_MONGODB_URL).filter(|v| !v.trim().is_empty()) {
            self.mongodb_url = url.trim().to_string();
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|v| !v.trim().is_empty()) {
            self.log_level = level.trim().to_string();
        }
    }

    /// Clamp values to safe ranges, returning one entry per corrected field
    pub fn validate_and_clamp(&mut self) -> Vec<Correction> {
        let mut corrections = Vec::new();

        self.log_level = self.log_level.trim().to_ascii_lowercase();
        if self.log_level.parse::<Level>().is_err() {
            corrections.push(Correction {
                field: "log_level",
                found: self.log_level.clone(),
                using: default_log_level(),
                reason: "unknown log_level, using info",
            });
            self.log_level = default_log_level();
        }

        corrections.extend(clamp_dimension("window_width", &mut self.window_width, default_window_width()));
        corrections.extend(clamp_dimension("window_height", &mut self.window_height, default_window_height()));
        corrections
    }

    pub fn tracing_level(&self) -> Level {
        self.log_level.parse().unwrap_or(Level::INFO)
    }
}

fn clamp_dimension(field: &'static str, value: &mut f32, default: f32) -> Option<Correction> {
    let (using, reason) = if !value.is_finite() {
        (default, "window dimension is not a number, using default")
    } else if *value < MIN_WINDOW_DIMENSION {
        (MIN_WINDOW_DIMENSION, "window dimension below minimum, clamping")
    } else if *value > MAX_WINDOW_DIMENSION {
        (MAX_WINDOW_DIMENSION, "window dimension exceeds maximum, clamping")
    } else {
        return None;
    };

    let found = value.to_string();
    *value = using;
    Some(Correction {
        field,
        found,
        using: using.to_string(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::capture_logs;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_file_generates_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(APP_DIR).join(FILENAME);

        let (config, _) = AppConfig::load_from(&path).unwrap();
        assert!(path.exists());

        let written: AppConfig = toml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, AppConfig::default());
        assert_eq!(config.window_width, default_window_width());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILENAME);
        fs::write(&path, "log_level = \"debug\"\n").unwrap();

        let mut config: AppConfig = toml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        config.validate_and_clamp();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.tracing_level(), Level::DEBUG);
        assert_eq!(config.mongodb_url, default_mongodb_url());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILENAME);
        fs::write(&path, "mongodb_url = [not toml").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config file"));
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let mut config = AppConfig::default();
        config.apply_overrides(lookup(&[
            (ENV_MONGODB_URL, " mongodb://db.internal:27017/posts "),
            (ENV_LOG_LEVEL, "WARN"),
        ]));
        config.validate_and_clamp();

        assert_eq!(config.mongodb_url, "mongodb://db.internal:27017/posts");
        assert_eq!(config.tracing_level(), Level::WARN);
    }

    #[test]
    fn test_blank_overrides_are_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(lookup(&[(ENV_MONGODB_URL, "   ")]));
        assert_eq!(config.mongodb_url, default_mongodb_url());
    }

    #[test]
    fn test_unknown_log_level_falls_back_to_info() {
        let mut config = AppConfig {
            log_level: "chatty".to_string(),
            ..AppConfig::default()
        };
        let corrections = config.validate_and_clamp();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.tracing_level(), Level::INFO);
        assert_eq!(
            corrections,
            vec![Correction {
                field: "log_level",
                found: "chatty".to_string(),
                using: "info".to_string(),
                reason: "unknown log_level, using info",
            }]
        );
    }

    #[test]
    fn test_window_dimensions_clamped() {
        let mut config = AppConfig {
            window_width: 10.0,
            window_height: 100_000.0,
            ..AppConfig::default()
        };
        let corrections = config.validate_and_clamp();
        assert_eq!(config.window_width, MIN_WINDOW_DIMENSION);
        assert_eq!(config.window_height, MAX_WINDOW_DIMENSION);
        let fields: Vec<_> = corrections.iter().map(|c| c.field).collect();
        assert_eq!(fields, vec!["window_width", "window_height"]);

        config.window_width = f32::NAN;
        let corrections = config.validate_and_clamp();
        assert_eq!(config.window_width, default_window_width());
        assert_eq!(corrections.len(), 1);
        assert_eq!(corrections[0].found, "NaN");
    }

    #[test]
    fn test_valid_config_has_no_corrections() {
        let mut config = AppConfig::default();
        assert!(config.validate_and_clamp().is_empty());
    }

    #[test]
    fn test_corrections_from_file_reach_the_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILENAME);
        fs::write(&path, "log_level = \"chatty\"\nwindow_width = 1.0\n").unwrap();

        // Loading happens before any subscriber exists; nothing may be lost
        let (config, corrections) = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.window_width, MIN_WINDOW_DIMENSION);

        let (logs, _guard) = capture_logs();
        for correction in &corrections {
            correction.log();
        }

        let output = logs.contents();
        assert!(output.contains("window dimension below minimum, clamping"), "logs: {output}");
        assert!(output.contains("field=\"window_width\""), "logs: {output}");
        assert!(output.contains("found=1"), "logs: {output}");
        assert!(output.matches("WARN").count() >= 1, "logs: {output}");
    }

    #[test]
    fn test_save_then_load_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILENAME);
        let config = AppConfig {
            mongodb_url: "mongodb://example:27017/other".to_string(),
            log_level: "trace".to_string(),
            window_width: 800.0,
            window_height: 600.0,
        };
        config.save_to(&path).unwrap();

        let loaded: AppConfig = toml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded, config);
    }
}
