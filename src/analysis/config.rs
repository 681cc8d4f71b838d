//! Analyzer configuration loaded from coverage_config.json.
//!
//! If the config file doesn't exist, default values are used. A file that
//! fails to parse is reported in the log and replaced by the defaults.
//! The UI layout is not configurable here; see `detection::regions`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::detection::DEFAULT_BLACK_THRESHOLD;

/// What to do when a screenshot cannot be decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadFailurePolicy {
    /// Stop the run at the first unreadable screenshot
    Abort,
    /// Record the screenshot as skipped and keep going
    Skip,
}

/// A file-name pattern that attributes a tag to matching issues.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatternRule {
    /// Tag attached to matching issues
    pub tag: String,
    /// Regular expression matched case-insensitively against the file name
    pub pattern: String,
    /// Summary line text, e.g. "issues at map edges"
    pub label: String,
}

impl PatternRule {
    pub fn new(tag: &str, pattern: &str, label: &str) -> Self {
        Self {
            tag: tag.to_string(),
            pattern: pattern.to_string(),
            label: label.to_string(),
        }
    }
}

/// Complete analyzer configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Pixels with R, G and B all below this value count as black
    pub black_threshold: u8,
    /// File extensions treated as screenshots (without the dot)
    pub extensions: Vec<String>,
    /// Number of issues listed in the summary
    pub top_issues: usize,
    /// Behaviour for screenshots that fail to decode
    pub on_load_failure: LoadFailurePolicy,
    /// File-name patterns reported as separate issue counts
    pub patterns: Vec<PatternRule>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            black_threshold: DEFAULT_BLACK_THRESHOLD,
            extensions: vec!["png".to_string()],
            top_issues: 5,
            on_load_failure: LoadFailurePolicy::Abort,
            patterns: default_patterns(),
        }
    }
}

fn default_patterns() -> Vec<PatternRule> {
    vec![
        PatternRule::new("edge", "edge", "issues at map edges"),
        PatternRule::new("zoom", "zoom", "issues when zoomed out"),
    ]
}

impl AnalyzerConfig {
    /// Load config from file, or return defaults if file doesn't exist.
    pub fn load(config_path: &Path) -> Self {
        if config_path.exists() {
            match fs::read_to_string(config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => {
                        crate::log(&format!("Loaded config from {}", config_path.display()));
                        return config;
                    }
                    Err(e) => {
                        crate::log(&format!("Failed to parse config: {}. Using defaults.", e));
                    }
                },
                Err(e) => {
                    crate::log(&format!("Failed to read config: {}. Using defaults.", e));
                }
            }
        } else {
            crate::log(&format!(
                "{} not found. Using default config.",
                config_path.display()
            ));
        }
        Self::default()
    }

    /// Load config from a path the user named; a missing or malformed file is an error.
    pub fn load_explicit(config_path: &Path) -> Result<Self> {
        let content = fs::read_to_string(config_path)
            .context(format!("Failed to read config file: {}", config_path.display()))?;
        let config = serde_json::from_str(&content)
            .context(format!("Failed to parse config file: {}", config_path.display()))?;
        crate::log(&format!("Loaded config from {}", config_path.display()));
        Ok(config)
    }

    /// Save default config to file (for reference).
    pub fn save_default(config_path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&Self::default())
            .context("Failed to serialize default config")?;
        fs::write(config_path, json)
            .context(format!("Failed to write config file: {}", config_path.display()))
    }

    /// Returns true if the path has one of the configured screenshot extensions.
    pub fn is_screenshot(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }
}
