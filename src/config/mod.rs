use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use dirs::home_dir;
use serde::{Deserialize, Serialize};

use crate::{
    catalog::{builtin_vehicles, Catalog, Vehicle, DECOR_ADDON_FLAT},
    currency::{CurrencyCode, LocaleConfig, LocaleFormatter},
    errors::BookingError,
};

const DEFAULT_DIR_NAME: &str = ".carhire_booking";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";
pub const HOME_ENV: &str = "CARHIRE_HOME";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    /// Replaces the built-in fleet when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicles: Option<Vec<Vehicle>>,
    /// Reserved; not applied to any price.
    #[serde(default = "default_decor_addon")]
    pub decor_addon_flat: u32,
}

fn default_decor_addon() -> u32 {
    DECOR_ADDON_FLAT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-IN".into(),
            currency: "INR".into(),
            vehicles: None,
            decor_addon_flat: DECOR_ADDON_FLAT,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), BookingError> {
        if self.locale.trim().is_empty() {
            return Err(BookingError::Config("locale cannot be blank".into()));
        }
        let code = self.currency.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(BookingError::Config(format!(
                "currency must be an ISO 4217 code, got `{}`",
                self.currency
            )));
        }
        Ok(())
    }

    /// Builds and validates the catalog once; duplicate ids abort startup.
    pub fn catalog(&self) -> Result<Catalog, BookingError> {
        match &self.vehicles {
            Some(vehicles) => Catalog::new(vehicles.clone()),
            None => Catalog::new(builtin_vehicles()),
        }
    }

    pub fn formatter(&self) -> LocaleFormatter {
        LocaleFormatter::new(
            CurrencyCode::new(self.currency.as_str()),
            LocaleConfig::for_tag(&self.locale),
        )
    }
}

/// Returns the application data directory, defaulting to `~/.carhire_booking`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: impl AsRef<Path>) -> Self {
        Self {
            path: base.as_ref().join(CONFIG_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the config file, falling back to defaults when it is absent.
    pub fn load(&self) -> Result<Config, BookingError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            let config: Config = serde_json::from_str(&data)?;
            tracing::debug!(path = %self.path.display(), "configuration loaded");
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), BookingError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = self.path.with_extension(format!("json.{TMP_SUFFIX}"));
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

fn write_atomic(path: &Path, contents: &str) -> Result<(), BookingError> {
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()?;
    Ok(())
}
