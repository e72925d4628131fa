//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.parksurvey.toml` files.

use crate::cli::OutputFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the current directory.
pub const CONFIG_FILE: &str = ".parksurvey.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Input data settings.
    #[serde(default)]
    pub data: DataConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Output format.
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            format: OutputFormat::default(),
        }
    }
}

fn default_output() -> PathBuf {
    PathBuf::from("park_survey_report.html")
}

/// Survey data settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path of the survey CSV.
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data.csv")
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Report title.
    #[serde(default = "default_title")]
    pub title: String,

    /// Include the full table of survey responses.
    #[serde(default = "default_true")]
    pub show_raw_data: bool,

    /// Decimal places for statistics.
    #[serde(default = "default_decimals")]
    pub decimals: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            show_raw_data: true,
            decimals: default_decimals(),
        }
    }
}

fn default_title() -> String {
    "Exploring Satisfaction with the Municipal Parks of Matão".to_string()
}

fn default_true() -> bool {
    true
}

fn default_decimals() -> usize {
    2
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.parksurvey.toml` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref data) = args.data {
            self.data.path = data.clone();
        }
        if let Some(ref output) = args.output {
            self.general.output = output.clone();
        }
        if let Some(format) = args.format {
            self.general.format = format;
        }
        if let Some(ref title) = args.title {
            self.report.title = title.clone();
        }

        // Flags only ever switch the raw table off
        if args.no_raw_data {
            self.report.show_raw_data = false;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use clap::Parser;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.data.path, PathBuf::from("data.csv"));
        assert_eq!(config.general.format, OutputFormat::Html);
        assert!(config.report.show_raw_data);
        assert_eq!(config.report.decimals, 2);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
output = "custom_report.md"
format = "markdown"

[data]
path = "responses.csv"

[report]
title = "Downtown Parks"
show_raw_data = false
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.output, PathBuf::from("custom_report.md"));
        assert_eq!(config.general.format, OutputFormat::Markdown);
        assert_eq!(config.data.path, PathBuf::from("responses.csv"));
        assert_eq!(config.report.title, "Downtown Parks");
        assert!(!config.report.show_raw_data);
        assert_eq!(config.report.decimals, 2);
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from_dir(dir.path()).unwrap().is_none());

        std::fs::write(dir.path().join(CONFIG_FILE), "[report]\ndecimals = 3\n").unwrap();
        let config = Config::load_from_dir(dir.path()).unwrap().unwrap();
        assert_eq!(config.report.decimals, 3);
        assert_eq!(config.data.path, PathBuf::from("data.csv"));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[report]\ndecimals = \"two\"\n").unwrap();
        assert!(Config::load_from_dir(dir.path()).is_err());
    }

    #[test]
    fn test_merge_with_args() {
        let mut config = Config::default();
        config.report.title = "From file".to_string();

        let args = Args::try_parse_from([
            "parksurvey",
            "--data",
            "survey.csv",
            "--output",
            "out.md",
            "--format",
            "markdown",
            "--no-raw-data",
        ])
        .unwrap();
        config.merge_with_args(&args);

        assert_eq!(config.data.path, PathBuf::from("survey.csv"));
        assert_eq!(config.general.output, PathBuf::from("out.md"));
        assert_eq!(config.general.format, OutputFormat::Markdown);
        assert_eq!(config.report.title, "From file");
        assert!(!config.report.show_raw_data);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[data]"));
        assert!(toml_str.contains("[report]"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.data.path, PathBuf::from("data.csv"));
    }
}
