use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    str::FromStr,
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    document::StampDutyPolicy,
    errors::{Result, StockError},
    utils::paths,
};

const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// Keys accepted by [`Config::set`].
pub const CONFIG_KEYS: [&str; 5] = ["currency", "cents", "marker", "stamp-rate", "stamp-cap"];

/// Presentation words and tax policy shared by the shell and the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_currency_unit")]
    pub currency_unit: String,
    #[serde(default = "default_cents_unit")]
    pub cents_unit: String,
    #[serde(default = "default_marker")]
    pub marker: String,
    #[serde(default)]
    pub stamp_duty: StampDutyPolicy,
}

fn default_currency_unit() -> String {
    "Da".into()
}

fn default_cents_unit() -> String {
    "centimes".into()
}

fn default_marker() -> String {
    "***".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_unit: default_currency_unit(),
            cents_unit: default_cents_unit(),
            marker: default_marker(),
            stamp_duty: StampDutyPolicy::default(),
        }
    }
}

impl Config {
    /// Updates a single setting by its shell name.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "currency" => self.currency_unit = non_empty(key, value)?,
            "cents" => self.cents_unit = non_empty(key, value)?,
            "marker" => self.marker = non_empty(key, value)?,
            "stamp-rate" => {
                let rate = parse_decimal(key, value)?;
                if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
                    return Err(StockError::InvalidInput(
                        "stamp-rate must be between 0 and 100".into(),
                    ));
                }
                self.stamp_duty.rate_percent = rate;
            }
            "stamp-cap" => {
                let cap = parse_decimal(key, value)?;
                if cap < Decimal::ZERO {
                    return Err(StockError::InvalidInput(
                        "stamp-cap cannot be negative".into(),
                    ));
                }
                self.stamp_duty.cap = cap;
            }
            other => {
                return Err(StockError::InvalidInput(format!(
                    "unknown setting `{}` (expected one of: {})",
                    other,
                    CONFIG_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    /// `(key, value)` pairs in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("currency", self.currency_unit.clone()),
            ("cents", self.cents_unit.clone()),
            ("marker", self.marker.clone()),
            ("stamp-rate", self.stamp_duty.rate_percent.to_string()),
            ("stamp-cap", self.stamp_duty.cap.to_string()),
        ]
    }
}

fn non_empty(key: &str, value: &str) -> Result<String> {
    if value.is_empty() {
        Err(StockError::InvalidInput(format!("{} cannot be empty", key)))
    } else {
        Ok(value.to_string())
    }
}

fn parse_decimal(key: &str, value: &str) -> Result<Decimal> {
    Decimal::from_str(&value.replace(',', "."))
        .map_err(|_| StockError::InvalidInput(format!("{} expects a number, got `{}`", key, value)))
}

/// Loads and saves [`Config`] as JSON inside the application data directory.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Uses `$GESTION_STOCK_HOME` or `~/.gestion_stock`.
    pub fn from_env() -> Result<Self> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        let config_dir = paths::config_dir_in(&base);
        fs::create_dir_all(&config_dir)?;
        Ok(Self::new(config_dir.join(CONFIG_FILE)))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> Result<Config> {
        if self.config_path.exists() {
            let data = fs::read_to_string(&self.config_path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.config_path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.config_path)?;
        tracing::info!(path = %self.config_path.display(), "configuration saved");
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_validates_values() {
        let mut config = Config::default();
        config.set("currency", "DZD").unwrap();
        config.set("stamp-rate", "0,5").unwrap();
        config.set("stamp-cap", "1000").unwrap();
        assert_eq!(config.currency_unit, "DZD");
        assert_eq!(config.stamp_duty.rate_percent, Decimal::new(5, 1));
        assert_eq!(config.stamp_duty.cap, Decimal::new(1000, 0));

        assert!(config.set("marker", "  ").is_err());
        assert!(config.set("stamp-rate", "150").is_err());
        assert!(config.set("stamp-cap", "-1").is_err());
        assert!(config.set("stamp-cap", "lots").is_err());
        assert!(config.set("colour", "blue").is_err());
    }

    #[test]
    fn tmp_path_appends_suffix() {
        let tmp = tmp_path(Path::new("/data/config.json"));
        assert_eq!(tmp, PathBuf::from("/data/config.json.tmp"));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: Config = serde_json::from_str(r#"{"currency_unit":"DA"}"#).unwrap();
        assert_eq!(config.currency_unit, "DA");
        assert_eq!(config.marker, "***");
        assert_eq!(config.stamp_duty, StampDutyPolicy::default());
    }
}
