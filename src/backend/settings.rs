use anyhow::{Context, Result};
use clap::ValueEnum;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(PartialEq, Eq, Clone, Copy, Serialize, Deserialize, Debug, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "CSV",
            OutputFormat::Json => "JSON",
        }
    }
}

/// Where to read reviews from and where to write them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("reviews.txt"),
            output_path: PathBuf::from("reviews.csv"),
            format: OutputFormat::Csv,
        }
    }
}

impl Settings {
    /// Loads settings from `explicit` if given, otherwise from the user config
    /// directory. Only an explicit file is required to exist and parse.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let Some(config_path) = Self::default_config_path() else {
            return Ok(Self::default());
        };
        if !config_path.exists() {
            return Ok(Self::default());
        }

        match Self::from_file(&config_path) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                warn!("ignoring config at {:?}: {:#}", config_path, e);
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let settings = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        debug!("loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Swaps the stock `reviews.csv` destination for `reviews.json` when JSON
    /// output is selected. A destination chosen anywhere else is left alone.
    pub fn apply_format_default_output(&mut self) {
        if self.format == OutputFormat::Json && self.output_path == Settings::default().output_path {
            self.output_path = PathBuf::from("reviews.json");
        }
    }

    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "reviewcsv").map(|dirs| dirs.config_dir().join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.input_path, PathBuf::from("reviews.txt"));
        assert_eq!(settings.output_path, PathBuf::from("reviews.csv"));
        assert_eq!(settings.format, OutputFormat::Csv);
    }

    #[test]
    fn test_partial_file_keeps_defaults() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(file, r#"{{"output_path": "out/reviews.json", "format": "json"}}"#)?;

        let settings = Settings::load(Some(file.path()))?;
        assert_eq!(settings.input_path, PathBuf::from("reviews.txt"));
        assert_eq!(settings.output_path, PathBuf::from("out/reviews.json"));
        assert_eq!(settings.format, OutputFormat::Json);
        Ok(())
    }

    #[test]
    fn test_json_format_default_output() {
        let mut settings = Settings {
            format: OutputFormat::Json,
            ..Settings::default()
        };
        settings.apply_format_default_output();
        assert_eq!(settings.output_path, PathBuf::from("reviews.json"));

        let mut custom = Settings {
            output_path: PathBuf::from("dump.csv"),
            format: OutputFormat::Json,
            ..Settings::default()
        };
        custom.apply_format_default_output();
        assert_eq!(custom.output_path, PathBuf::from("dump.csv"));

        let mut csv = Settings::default();
        csv.apply_format_default_output();
        assert_eq!(csv.output_path, PathBuf::from("reviews.csv"));
    }

    #[test]
    fn test_explicit_invalid_file_fails() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(file, "not json")?;
        assert!(Settings::load(Some(file.path())).is_err());
        Ok(())
    }

    #[test]
    fn test_explicit_missing_file_fails() {
        assert!(Settings::load(Some(Path::new("/definitely/not/here.json"))).is_err());
    }
}
