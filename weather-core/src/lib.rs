//! Core library for the weather dashboard.
//!
//! This crate defines:
//! - Configuration & per-request context
//! - Retrieval from the National Weather Service behind a provider trait
//! - Forecast windowing (look-ahead hour, daily high/low pairs)
//! - Sun times and moon phase
//!
//! It is used by the `weather-dashboard` binary, but can also be reused by other front-ends.

pub mod astronomy;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod moon;
pub mod provider;
pub mod window;

pub use config::{Config, LocationConfig};
pub use error::DashboardError;
pub use model::{
    AstronomyInfo, CurrentConditions, DailySummary, Dashboard, DashboardContext, ForecastPeriod,
    FutureConditions, Location, ProviderForecast, WeatherReport,
};
pub use moon::MoonPhase;
pub use provider::{WeatherProvider, provider_from_config};
