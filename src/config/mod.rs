//! User preferences that tune projections, persisted as JSON.

use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::currency::{CurrencyCode, DateFormatStyle, DisplayFormat, LocaleConfig, NegativeStyle};
use crate::ledger::DEFAULT_CREDIT_CARD_CATEGORY;
use crate::utils::app_data_dir;

const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serde(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// BCP 47 tag selecting number separators, e.g. `en-US` or `de-DE`.
    pub locale: String,
    pub currency: String,
    #[serde(default)]
    pub date_format: DateFormatStyle,
    #[serde(default)]
    pub negative_style: NegativeStyle,
    /// Category whose bills count as credit-card payments.
    #[serde(default = "Config::default_credit_card_category")]
    pub credit_card_category: String,
    #[serde(default = "Config::default_projection_months")]
    pub projection_months: u32,
    #[serde(default = "Config::default_outlook_days")]
    pub outlook_days: i64,
    #[serde(default = "Config::default_include_savings")]
    pub include_savings: bool,
    #[serde(default = "Config::default_savings_payment_limit")]
    pub savings_payment_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            date_format: DateFormatStyle::default(),
            negative_style: NegativeStyle::default(),
            credit_card_category: Self::default_credit_card_category(),
            projection_months: Self::default_projection_months(),
            outlook_days: Self::default_outlook_days(),
            include_savings: Self::default_include_savings(),
            savings_payment_limit: Self::default_savings_payment_limit(),
        }
    }
}

impl Config {
    pub fn default_credit_card_category() -> String {
        DEFAULT_CREDIT_CARD_CATEGORY.into()
    }

    pub fn default_projection_months() -> u32 {
        6
    }

    pub fn default_outlook_days() -> i64 {
        30
    }

    pub fn default_include_savings() -> bool {
        true
    }

    pub fn default_savings_payment_limit() -> usize {
        100
    }

    pub fn currency_code(&self) -> CurrencyCode {
        CurrencyCode::new(&self.currency)
    }

    pub fn locale_config(&self) -> LocaleConfig {
        LocaleConfig::for_tag(&self.locale, self.date_format)
    }

    pub fn display_format(&self) -> DisplayFormat {
        DisplayFormat {
            currency: self.currency_code(),
            locale: self.locale_config(),
            negative_style: self.negative_style,
        }
    }
}

/// Handles persistence for [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        let config_dir = base.join(CONFIG_DIR);
        fs::create_dir_all(&config_dir)?;
        Ok(Self::new(config_dir.join(CONFIG_FILE)))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Returns the defaults when no configuration has been saved yet.
    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.config_path.exists() {
            let data = fs::read_to_string(&self.config_path)?;
            serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        let tmp = tmp_path(&self.config_path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.config_path)?;
        Ok(())
    }
}

/// Manager rooted at `CASHFLOW_CORE_HOME` or `~/.cashflow_core`.
pub fn default_manager() -> Result<ConfigManager, ConfigError> {
    ConfigManager::with_base_dir(app_data_dir())
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

fn write_atomic(path: &Path, data: &str) -> Result<(), ConfigError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: Config = serde_json::from_str(r#"{"locale":"en-GB","currency":"GBP"}"#).unwrap();
        assert_eq!(config.credit_card_category, "Credit Card");
        assert_eq!(config.projection_months, 6);
        assert_eq!(config.outlook_days, 30);
        assert!(config.include_savings);
        assert_eq!(config.currency_code().as_str(), "GBP");
        assert_eq!(config.date_format, DateFormatStyle::Iso);
        assert_eq!(config.negative_style, NegativeStyle::Sign);
        assert_eq!(config.savings_payment_limit, 100);
    }

    #[test]
    fn display_format_follows_locale_settings() {
        let config: Config = serde_json::from_str(
            r#"{"locale":"de-DE","currency":"EUR","date_format":"medium","negative_style":"parentheses"}"#,
        )
        .unwrap();
        let format = config.display_format();
        assert_eq!(format.money(Decimal::new(-123456, 2)), "€ (1.234,56)");
        assert_eq!(format.money(Decimal::new(75, 1)), "€7,50");
        assert_eq!(
            format.date(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()),
            "Mar 5, 2024"
        );
    }
}
