use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub formatter: FormatterConfig,
    pub render: RenderConfig,
    pub page: PageConfig,
}

/// Length thresholds used while classifying lines.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    /// A line ending in `:` is a heading only if it is shorter than this.
    pub heading_max_chars: usize,
    /// Lines longer than this are paragraphs, the rest are short lines.
    pub paragraph_min_chars: usize,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            heading_max_chars: 100,
            paragraph_min_chars: 10,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Shown instead of an empty document when there is nothing to format
    pub empty_message: String,
    pub step_badge_class: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            empty_message: "No solution available.".to_string(),
            step_badge_class: "step-number".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub numbers: bool,
    pub paper: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            numbers: false,
            paper: "a4".to_string(),
        }
    }
}

impl Config {
    /// The configuration bundled with the crate.
    pub fn compiled_default() -> Self {
        // Validated by build.rs, so this only falls back if the two drift apart.
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file, or return defaults if not found.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config");
                Self::compiled_default()
            }),
            Err(_) => Self::compiled_default(),
        }
    }

    /// Load config from a TOML file, failing if it is missing or invalid.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiled_default_matches_code_defaults() {
        let config = Config::compiled_default();
        assert_eq!(config.formatter.heading_max_chars, 100);
        assert_eq!(config.formatter.paragraph_min_chars, 10);
        assert_eq!(config.render.empty_message, "No solution available.");
        assert_eq!(config.render.step_badge_class, "step-number");
        assert!(!config.page.numbers);
        assert_eq!(config.page.paper, "a4");
    }

    #[test]
    fn partial_tables_keep_defaults() {
        let config: Config = toml::from_str("[formatter]\nparagraph_min_chars = 20\n").unwrap();
        assert_eq!(config.formatter.paragraph_min_chars, 20);
        assert_eq!(config.formatter.heading_max_chars, 100);
        assert_eq!(config.page.paper, "a4");
    }

    #[test]
    fn load_missing_file_falls_back() {
        let config = Config::load(Path::new("/nonexistent/solution-fmt.toml"));
        assert_eq!(config.formatter.heading_max_chars, 100);
    }

    #[test]
    fn from_file_reports_missing_file() {
        let err = Config::from_file(Path::new("/nonexistent/solution-fmt.toml")).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }
}
