use anyhow::{Context, Result, anyhow};
use chrono::TimeDelta;
use chrono_tz::Tz;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, net::SocketAddr, path::Path, path::PathBuf, time::Duration};

use crate::{
    error::DashboardError,
    model::{DashboardContext, Location},
};

/// Where the dashboard is for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            name: "Exeter, NH".to_string(),
            latitude: 42.9814,
            longitude: -70.9462,
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Every key is optional; missing ones take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Contact address sent in the User-Agent, as NWS requests.
    pub contact: String,

    /// IANA timezone used for every displayed time.
    pub timezone: String,

    /// How far ahead the look-ahead panel targets.
    pub forecast_offset_hours: i64,

    pub request_timeout_secs: u64,

    pub api_base_url: String,

    /// Address `serve` listens on.
    pub bind: SocketAddr,

    /// Example TOML:
    /// [location]
    /// name = "Exeter, NH"
    /// latitude = 42.9814
    /// longitude = -70.9462
    pub location: LocationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            contact: "weather-dashboard@example.com".to_string(),
            timezone: "America/New_York".to_string(),
            forecast_offset_hours: 6,
            request_timeout_secs: 10,
            api_base_url: "https://api.weather.gov".to_string(),
            bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
            location: LocationConfig::default(),
        }
    }
}

impl Config {
    /// Parse the configured timezone.
    pub fn tz(&self) -> Result<Tz, DashboardError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| DashboardError::UnknownTimezone(self.timezone.clone()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Build the per-request context, validating coordinates, timezone and offset.
    pub fn context(&self) -> Result<DashboardContext, DashboardError> {
        let LocationConfig { name, latitude, longitude } = &self.location;
        if !(-90.0..=90.0).contains(latitude) || !(-180.0..=180.0).contains(longitude) {
            return Err(DashboardError::InvalidCoordinates {
                latitude: *latitude,
                longitude: *longitude,
            });
        }

        Ok(DashboardContext {
            location: Location {
                name: name.clone(),
                latitude: *latitude,
                longitude: *longitude,
            },
            contact: self.contact.clone(),
            timezone: self.tz()?,
            forecast_offset: TimeDelta::try_hours(self.forecast_offset_hours)
                .ok_or(DashboardError::InvalidOffset(self.forecast_offset_hours))?,
        })
    }

    /// Load config from the platform location, or defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load config from `path`, or defaults if it doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, use defaults.
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to the platform location.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-dashboard", "weather-dashboard")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
