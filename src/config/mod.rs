//! User preferences persisted as `config.json`. Ledger entries never land here.

use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::services::SortOrder;
use crate::domain::PaymentMethodCatalog;
use crate::errors::{LedgerError, Result};

pub const HOME_ENV: &str = "LEDGER_CORE_HOME";
const APP_DIR: &str = "ledger_core";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    pub currency_precision: u8,
    pub ui_color_enabled: bool,
    /// Payment method codes offered in addition to the built-in ones.
    pub payment_methods: Vec<String>,
    pub default_sort: SortOrder,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            currency_precision: 2,
            ui_color_enabled: true,
            payment_methods: Vec::new(),
            default_sort: SortOrder::None,
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 6] = [
        "locale",
        "currency",
        "currency_precision",
        "ui_color_enabled",
        "payment_methods",
        "default_sort",
    ];

    pub fn catalog(&self) -> PaymentMethodCatalog {
        PaymentMethodCatalog::with_extra(self.payment_methods.iter().cloned())
    }

    /// Updates one preference from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "locale" => self.locale = non_empty(key, value)?,
            "currency" => self.currency = non_empty(key, value)?.to_ascii_uppercase(),
            "currency_precision" => {
                let precision = value.parse::<u8>().ok().filter(|p| *p <= 6).ok_or_else(|| {
                    LedgerError::InvalidInput(format!(
                        "currency_precision must be between 0 and 6, got `{value}`"
                    ))
                })?;
                self.currency_precision = precision;
            }
            "ui_color_enabled" => {
                self.ui_color_enabled = match value.to_ascii_lowercase().as_str() {
                    "true" | "on" | "yes" | "1" => true,
                    "false" | "off" | "no" | "0" => false,
                    other => {
                        return Err(LedgerError::InvalidInput(format!(
                            "ui_color_enabled expects true or false, got `{other}`"
                        )))
                    }
                };
            }
            "payment_methods" => {
                self.payment_methods = value
                    .split(',')
                    .map(str::trim)
                    .filter(|code| !code.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            "default_sort" => {
                self.default_sort = SortOrder::parse(value).ok_or_else(|| {
                    LedgerError::InvalidInput(format!(
                        "default_sort expects asc, desc, or none, got `{value}`"
                    ))
                })?;
            }
            other => {
                return Err(LedgerError::InvalidInput(format!(
                    "unknown config key `{other}`; expected one of: {}",
                    Self::KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    /// `(key, value)` pairs for display.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("locale", self.locale.clone()),
            ("currency", self.currency.clone()),
            ("currency_precision", self.currency_precision.to_string()),
            ("ui_color_enabled", self.ui_color_enabled.to_string()),
            ("payment_methods", self.payment_methods.join(", ")),
            ("default_sort", self.default_sort.to_string()),
        ]
    }
}

fn non_empty(key: &str, value: &str) -> Result<String> {
    if value.is_empty() {
        Err(LedgerError::InvalidInput(format!("{key} cannot be empty")))
    } else {
        Ok(value.to_string())
    }
}

/// Loads and atomically saves [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Resolves the base directory from `LEDGER_CORE_HOME`, falling back to
    /// the platform config directory.
    pub fn new() -> Result<Self> {
        Self::with_base_dir(base_dir()?)
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing file yields defaults.
    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            let config = serde_json::from_str(&data)?;
            debug!(path = %self.path.display(), "config loaded");
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_all(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), "config saved");
        Ok(())
    }
}

fn base_dir() -> Result<PathBuf> {
    if let Some(home) = env::var_os(HOME_ENV).filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .ok_or_else(|| LedgerError::Config("unable to resolve a configuration directory".into()))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_all(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PaymentMethod;

    #[test]
    fn set_parses_typed_values() {
        let mut config = Config::default();
        config.set("currency", "eur").unwrap();
        config.set("currency_precision", "0").unwrap();
        config.set("ui_color_enabled", "off").unwrap();
        config.set("default_sort", "desc").unwrap();
        config.set("payment_methods", "voucher, , crypto").unwrap();

        assert_eq!(config.currency, "EUR");
        assert_eq!(config.currency_precision, 0);
        assert!(!config.ui_color_enabled);
        assert_eq!(config.default_sort, SortOrder::Descending);
        assert_eq!(config.payment_methods, vec!["voucher", "crypto"]);
    }

    #[test]
    fn set_rejects_unknown_keys_and_bad_values() {
        let mut config = Config::default();
        assert!(config.set("theme", "dark").is_err());
        assert!(config.set("currency_precision", "12").is_err());
        assert!(config.set("default_sort", "sideways").is_err());
        assert!(config.set("locale", "  ").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn catalog_includes_configured_methods() {
        let mut config = Config::default();
        config.payment_methods = vec!["voucher".into()];
        let catalog = config.catalog();
        assert_eq!(
            catalog.resolve("voucher"),
            Some(PaymentMethod::Other("voucher".into()))
        );
        assert_eq!(catalog.resolve("cash"), Some(PaymentMethod::Cash));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: Config = serde_json::from_str(r#"{"currency":"GBP"}"#).unwrap();
        assert_eq!(config.currency, "GBP");
        assert_eq!(config.currency_precision, 2);
    }
}
