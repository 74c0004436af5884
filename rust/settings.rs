//! Settings and configuration structures.

use chrono::format::{Item, StrftimeItems};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, Result};
use crate::json::JSON;
use crate::scheduling::DEFAULT_MAX_ITERATIONS;

/// Default name of the optional settings file, without extension.
pub const DEFAULT_CONFIG_FILE: &str = "fedcal";

/// Prefix of environment variables which override settings, e.g. `FEDCAL_BUSINESS_DAYS`.
pub const ENV_PREFIX: &str = "FEDCAL";

/// Settings for the business day calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// The number of business days to count, including the start date if it qualifies.
    #[serde(default = "default_business_days")]
    pub business_days: i32,
    /// Upper bound on the calendar days examined before giving up. The stepper otherwise
    /// allows twice `business_days` plus a year.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    /// The strftime format used to display result dates.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            business_days: default_business_days(),
            max_iterations: default_max_iterations(),
            date_format: default_date_format(),
        }
    }
}

fn default_business_days() -> i32 {
    30
}

fn default_max_iterations() -> u32 {
    DEFAULT_MAX_ITERATIONS
}

fn default_date_format() -> String {
    "%m/%d/%Y".to_string()
}

impl Settings {
    /// Load settings from configuration files and environment variables.
    ///
    /// Configuration is loaded in the following order (later sources override earlier):
    /// 1. `fedcal.toml` in the working directory, if present
    /// 2. Environment variables prefixed with `FEDCAL_`
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load settings from the file at `path`, if it exists, overridden by environment variables.
    pub fn load_from(path: &str) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check that the settings can be used for a calculation.
    pub fn validate(&self) -> Result<()> {
        if self.business_days < 1 {
            return Err(CalendarError::InvalidArgument(format!(
                "`business_days` must be at least 1, got {}.",
                self.business_days
            )));
        }
        if self.max_iterations == 0 {
            return Err(CalendarError::InvalidArgument(
                "`max_iterations` must be positive.".to_string(),
            ));
        }
        if self.date_format.is_empty()
            || StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error))
        {
            return Err(CalendarError::InvalidArgument(format!(
                "`date_format` '{}' is not a valid strftime format.",
                self.date_format
            )));
        }
        Ok(())
    }
}

impl JSON for Settings {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::{Mutex, MutexGuard, PoisonError};

    // Environment variables are process wide, so tests loading settings take turns.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.business_days, 30);
        assert_eq!(settings.max_iterations, DEFAULT_MAX_ITERATIONS);
        assert_eq!(settings.date_format, "%m/%d/%Y");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        let bad_days = Settings {
            business_days: -1,
            ..Settings::default()
        };
        assert!(bad_days.validate().is_err());

        let bad_cap = Settings {
            max_iterations: 0,
            ..Settings::default()
        };
        assert!(bad_cap.validate().is_err());

        let bad_format = Settings {
            date_format: "%Q".to_string(),
            ..Settings::default()
        };
        assert!(bad_format.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let _guard = env_lock();
        let path = std::env::temp_dir().join("fedcal_test_load_from_file.toml");
        fs::write(&path, "business_days = 10\ndate_format = \"%Y-%m-%d\"\n").unwrap();
        let settings = Settings::load_from(path.to_str().unwrap()).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(settings.business_days, 10);
        assert_eq!(settings.date_format, "%Y-%m-%d");
        assert_eq!(settings.max_iterations, DEFAULT_MAX_ITERATIONS);
    }

    #[test]
    fn test_load_from_invalid_file() {
        let _guard = env_lock();
        let path = std::env::temp_dir().join("fedcal_test_load_from_invalid_file.toml");
        fs::write(&path, "business_days = 0\n").unwrap();
        let result = Settings::load_from(path.to_str().unwrap());
        fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(CalendarError::InvalidArgument(_))));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let _guard = env_lock();
        let settings = Settings::load_from("does/not/exist/fedcal").unwrap();
        assert_eq!(settings.business_days, Settings::default().business_days);
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = env_lock();
        std::env::set_var("FEDCAL_BUSINESS_DAYS", "7");
        let result = Settings::load_from("does/not/exist/fedcal");
        std::env::remove_var("FEDCAL_BUSINESS_DAYS");
        let settings = result.unwrap();
        assert_eq!(settings.business_days, 7);
        assert_eq!(settings.date_format, "%m/%d/%Y");
    }

    #[test]
    fn test_environment_overrides_file() {
        let _guard = env_lock();
        let path = std::env::temp_dir().join("fedcal_test_environment_overrides_file.toml");
        fs::write(&path, "business_days = 10\nmax_iterations = 500\n").unwrap();
        std::env::set_var("FEDCAL_MAX_ITERATIONS", "900");
        let result = Settings::load_from(path.to_str().unwrap());
        std::env::remove_var("FEDCAL_MAX_ITERATIONS");
        fs::remove_file(&path).unwrap();
        let settings = result.unwrap();
        assert_eq!(settings.business_days, 10);
        assert_eq!(settings.max_iterations, 900);
    }

    #[test]
    fn test_settings_json() {
        let settings = Settings::default();
        let js = settings.to_json().unwrap();
        let settings2 = Settings::from_json(&js).unwrap();
        assert_eq!(settings, settings2);
        let partial = Settings::from_json(r#"{"business_days": 5}"#).unwrap();
        assert_eq!(partial.business_days, 5);
        assert_eq!(partial.date_format, "%m/%d/%Y");
    }
}
