use crate::error::{ChecklistError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const SHEET_ID_ENV: &str = "CHECKLIST_SHEET_ID";
pub const SHEETS_TOKEN_ENV: &str = "GOOGLE_SHEETS_TOKEN";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub gbif: GbifConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Literal values stamped onto every published row
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    pub shortname: String,
    pub name: String,
    pub id: String,
    pub rights_holder: String,
    pub institution_code: String,
    #[serde(default = "default_license")]
    pub license: String,
    #[serde(default = "default_language")]
    pub language: String,
    pub location_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Local CSV export; takes precedence over `sheet_id`
    pub input_path: Option<PathBuf>,
    pub sheet_id: Option<String>,
    #[serde(default)]
    pub sheet_gid: Option<String>,
    #[serde(default = "default_write_back_range")]
    pub write_back_range: String,
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,
    #[serde(skip)]
    pub sheets_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GbifConfig {
    #[serde(default = "default_gbif_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

fn default_license() -> String {
    "http://creativecommons.org/publicdomain/zero/1.0/".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_write_back_range() -> String {
    "checklist_enriched".to_string()
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("data/raw/checklist_dump.csv")
}

fn default_gbif_base_url() -> String {
    "https://api.gbif.org/v1".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data/processed")
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            input_path: None,
            sheet_id: None,
            sheet_gid: None,
            write_back_range: default_write_back_range(),
            snapshot_path: default_snapshot_path(),
            sheets_token: None,
        }
    }
}

impl Default for GbifConfig {
    fn default() -> Self {
        Self {
            base_url: default_gbif_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

impl Config {
    /// Read `path` and apply environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ChecklistError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let mut config = Self::from_toml_str(&content)?;
        config.apply_env();
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(id) = std::env::var(SHEET_ID_ENV) {
            if !id.trim().is_empty() {
                self.source.sheet_id = Some(id.trim().to_string());
            }
        }
        self.source.sheets_token = std::env::var(SHEETS_TOKEN_ENV)
            .ok()
            .filter(|t| !t.trim().is_empty());
    }

    fn validate(&self) -> Result<()> {
        if self.dataset.shortname.trim().is_empty() {
            return Err(ChecklistError::Config(
                "dataset.shortname must not be empty".to_string(),
            ));
        }
        if self.dataset.shortname.contains(':') {
            return Err(ChecklistError::Config(format!(
                "dataset.shortname '{}' must not contain ':'",
                self.dataset.shortname
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [dataset]
        shortname = "alien-test-checklist"
        name = "Test checklist"
        id = "https://doi.org/10.0000/test"
        rights_holder = "Test Institute"
        institution_code = "TI"
        location_id = "ISO_3166-2:BE"
    "#;

    #[test]
    fn test_defaults_fill_optional_sections() {
        let config = Config::from_toml_str(MINIMAL).unwrap();

        assert_eq!(config.dataset.language, "en");
        assert_eq!(
            config.dataset.license,
            "http://creativecommons.org/publicdomain/zero/1.0/"
        );
        assert_eq!(config.gbif.base_url, "https://api.gbif.org/v1");
        assert_eq!(config.output.dir, PathBuf::from("data/processed"));
        assert!(config.source.input_path.is_none());
        assert!(config.source.sheets_token.is_none());
    }

    #[test]
    fn test_shortname_with_separator_is_rejected() {
        let bad = MINIMAL.replace("alien-test-checklist", "alien:test");
        let err = Config::from_toml_str(&bad).unwrap_err();
        assert!(matches!(err, ChecklistError::Config(_)));
    }

    #[test]
    fn test_missing_dataset_section_fails() {
        let err = Config::from_toml_str("[gbif]\ntimeout_seconds = 5\n").unwrap_err();
        assert!(matches!(err, ChecklistError::Toml(_)));
    }
}
