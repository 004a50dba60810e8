//! Global bookings configuration.

use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{BookingsError, BookingsResult};
use crate::pagination::DEFAULT_PAGE_SIZE;
use crate::viewer::{TimeFormat, parse_timezone};

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn is_default_page_size(n: &usize) -> bool {
    *n == DEFAULT_PAGE_SIZE
}

/// Global configuration at ~/.config/bookings/config.toml
///
/// Used when the viewer's profile leaves a preference unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_timezone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_format: Option<TimeFormat>,

    #[serde(default = "default_page_size", skip_serializing_if = "is_default_page_size")]
    pub page_size: usize,
}

impl Default for BookingsConfig {
    fn default() -> Self {
        BookingsConfig {
            default_timezone: None,
            time_format: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Settings changed through `bookings config`.
#[derive(Debug, Clone, Default)]
pub struct ConfigUpdate {
    pub default_timezone: Option<String>,
    pub time_format: Option<u8>,
    pub page_size: Option<usize>,
}

impl ConfigUpdate {
    pub fn is_empty(&self) -> bool {
        self.default_timezone.is_none() && self.time_format.is_none() && self.page_size.is_none()
    }
}

impl BookingsConfig {
    /// Validate and apply `update`. Nothing changes when any value is rejected.
    pub fn apply(&mut self, update: ConfigUpdate) -> BookingsResult<()> {
        let default_timezone = match update.default_timezone {
            Some(name) => {
                let tz = parse_timezone(&name)
                    .ok_or_else(|| BookingsError::Config(format!("Unknown time zone '{name}'")))?;
                Some(tz.name().to_string())
            }
            None => self.default_timezone.clone(),
        };

        let time_format = match update.time_format {
            Some(hours) => Some(TimeFormat::try_from(hours).map_err(BookingsError::Config)?),
            None => self.time_format,
        };

        let page_size = update.page_size.unwrap_or(self.page_size);
        if page_size == 0 {
            return Err(BookingsError::Config("page_size must be at least 1".into()));
        }

        self.default_timezone = default_timezone;
        self.time_format = time_format;
        self.page_size = page_size;
        Ok(())
    }

    pub fn config_path() -> BookingsResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| BookingsError::Config("Could not determine config directory".into()))?
            .join("bookings");

        Ok(config_dir.join("config.toml"))
    }

    /// Load ~/.config/bookings/config.toml, writing the default file first if missing.
    pub fn load() -> BookingsResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> BookingsResult<Self> {
        let config: BookingsConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .build()
            .map_err(|e| BookingsError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| BookingsError::Config(e.to_string()))?;

        if config.page_size == 0 {
            return Err(BookingsError::Config("page_size must be at least 1".into()));
        }

        Ok(config)
    }

    /// Save the current config to ~/.config/bookings/config.toml
    pub fn save(&self) -> BookingsResult<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> BookingsResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| BookingsError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| BookingsError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> BookingsResult<()> {
        let contents = format!(
            "\
# bookings configuration

# Time zone used when a viewer has none set (defaults to the system zone):
# default_timezone = \"Europe/Berlin\"

# Clock used when a viewer has no preference, 12 or 24:
# time_format = 24

# Bookings fetched per page:
# page_size = {}
",
            DEFAULT_PAGE_SIZE
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                BookingsError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| BookingsError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
