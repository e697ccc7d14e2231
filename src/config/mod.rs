use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    currency::format_amount,
    errors::{LedgerError, Result},
    storage::{DEFAULT_SHEET_NAME, DEFAULT_STORAGE_FILE},
    utils::persistence::write_atomic,
};

pub const DEFAULT_CURRENCY_LABEL: &str = "원";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage_path: PathBuf,
    pub sheet_name: String,
    pub currency_label: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(DEFAULT_STORAGE_FILE),
            sheet_name: DEFAULT_SHEET_NAME.into(),
            currency_label: DEFAULT_CURRENCY_LABEL.into(),
        }
    }
}

impl Config {
    /// Renders an amount with the configured unit label.
    pub fn format_amount(&self, value: i64) -> String {
        format_amount(value, &self.currency_label)
    }
}

/// Reads and writes the JSON settings file at an explicit path.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored settings, or defaults when no file exists.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data =
            fs::read_to_string(&self.path).map_err(|err| LedgerError::read(self.path.display(), err))?;
        serde_json::from_str(&data).map_err(|err| LedgerError::read(self.path.display(), err))
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| LedgerError::write(self.path.display(), err))?;
        write_atomic(&self.path, json.as_bytes())
            .map_err(|err| LedgerError::write(self.path.display(), err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_point_at_fixed_workbook() {
        let config = Config::default();
        assert_eq!(config.storage_path, PathBuf::from("wedding_budget.xlsx"));
        assert_eq!(config.sheet_name, "예산");
        assert_eq!(config.format_amount(9_000_000), "9,000,000 원");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("settings.json");
        fs::write(&path, r#"{ "currency_label": "KRW" }"#).unwrap();
        let config = ConfigManager::new(&path).load().unwrap();
        assert_eq!(config.currency_label, "KRW");
        assert_eq!(config.sheet_name, DEFAULT_SHEET_NAME);
    }
}
