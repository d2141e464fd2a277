use anyhow::{Context, Result};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ui::theme::{serde_color, Theme};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub appearance: AppearanceConfig,
    pub behavior: BehaviorConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the trivia API, without trailing slash
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Theme preset: "ink" (dark) or "paper" (light)
    pub theme: String,
    /// Accent color override (hex, e.g. "#89b4fa")
    #[serde(
        deserialize_with = "serde_color::deserialize_option",
        skip_serializing
    )]
    pub accent: Option<Color>,
    pub selected_prefix: String,
    pub unselected_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Ask before deleting a question
    pub confirm_delete: bool,
    /// Show answers without toggling them
    pub reveal_answers: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory for log files (defaults to the data dir)
    pub dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
        }
    }
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            theme: "ink".to_string(),
            accent: None,
            selected_prefix: "● ".to_string(),
            unselected_prefix: "  ".to_string(),
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            confirm_delete: true,
            reveal_answers: false,
        }
    }
}

/// Where a loaded config came from. Loading runs before logging is up, so
/// the caller logs this once the subscriber exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// Nothing at this path; built-in defaults are in use
    Defaults(PathBuf),
}

impl Config {
    pub fn load(path: &str) -> Result<(Self, ConfigSource)> {
        let expanded = shellexpand::tilde(path);
        let path = Path::new(expanded.as_ref());

        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            let config = Self::parse(&content)
                .with_context(|| format!("Failed to parse config from {}", path.display()))?;
            Ok((config, ConfigSource::File(path.to_path_buf())))
        } else {
            Ok((Self::default(), ConfigSource::Defaults(path.to_path_buf())))
        }
    }

    fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Resolve the configured theme, applying the accent override
    pub fn resolve_theme(&self) -> Theme {
        let mut theme = Theme::from_preset(&self.appearance.theme).unwrap_or_else(|| {
            tracing::warn!("Unknown theme '{}', using default", self.appearance.theme);
            Theme::default()
        });
        if let Some(accent) = self.appearance.accent {
            theme.accent = accent;
            theme.input = accent;
        }
        theme
    }

    /// Where log files go
    pub fn log_dir(&self) -> PathBuf {
        self.logging.dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("trivia-browser")
                .join("logs")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.base_url, "http://127.0.0.1:5000");
        assert!(config.behavior.confirm_delete);
        assert!(config.appearance.accent.is_none());
    }

    #[test]
    fn test_partial_file() {
        let config = Config::parse(
            r##"
            [server]
            base_url = "http://trivia.local:8080"

            [appearance]
            theme = "paper"
            accent = "#ff0000"
            "##,
        )
        .unwrap();
        assert_eq!(config.server.base_url, "http://trivia.local:8080");
        assert_eq!(config.appearance.accent, Some(Color::Rgb(255, 0, 0)));
        // Untouched sections keep defaults
        assert!(config.behavior.confirm_delete);
        assert_eq!(config.appearance.selected_prefix, "● ");

        let theme = config.resolve_theme();
        assert_eq!(theme.accent, Color::Rgb(255, 0, 0));
    }

    #[test]
    fn test_bad_accent() {
        assert!(Config::parse("[appearance]\naccent = \"#zz\"").is_err());
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let mut config = Config::default();
        config.appearance.theme = "solarized-neon".to_string();
        assert_eq!(config.resolve_theme().background, Theme::default().background);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = "/nonexistent/trivia-browser/config.toml";
        let (config, source) = Config::load(path).unwrap();
        assert_eq!(config.appearance.theme, "ink");
        assert_eq!(source, ConfigSource::Defaults(PathBuf::from(path)));
    }

    #[test]
    fn test_load_reports_file_source() {
        let path = std::env::temp_dir().join(format!("trivia-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[behavior]\nreveal_answers = true\n").unwrap();

        let (config, source) = Config::load(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(config.behavior.reveal_answers);
        assert_eq!(source, ConfigSource::File(path));
    }

    #[test]
    fn test_log_dir_override() {
        let mut config = Config::default();
        config.logging.dir = Some(PathBuf::from("/tmp/trivia-logs"));
        assert_eq!(config.log_dir(), PathBuf::from("/tmp/trivia-logs"));
    }
}
