use async_trait::async_trait;
use std::fmt::Debug;

use crate::{Config, DashboardContext, ProviderForecast, error::Result, provider::nws::NwsProvider};

pub mod nws;

/// Source of the daily and hourly forecast sequences for a location.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn forecast(&self, ctx: &DashboardContext) -> Result<ProviderForecast>;
}

/// Construct the provider described by `config`.
pub fn provider_from_config(config: &Config) -> Result<Box<dyn WeatherProvider>> {
    let provider = NwsProvider::new(&config.api_base_url, config.request_timeout())?;
    Ok(Box::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_builds_provider() {
        let provider = provider_from_config(&Config::default()).unwrap();
        assert!(format!("{provider:?}").contains("api.weather.gov"));
    }
}
