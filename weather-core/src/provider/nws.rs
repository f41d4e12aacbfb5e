//! National Weather Service (api.weather.gov) client.
//!
//! A dashboard needs three sequential requests: the grid point lookup for the
//! coordinates, then the two forecast URLs it hands back.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::{Client, header};
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;

use crate::{
    error::{DashboardError, Result},
    model::{DashboardContext, ForecastPeriod, Location, ProviderForecast},
};

use super::WeatherProvider;

const GEO_JSON: &str = "application/geo+json";

#[derive(Debug, Clone)]
pub struct NwsProvider {
    base_url: String,
    http: Client,
}

impl NwsProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(DashboardError::Client)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn points_url(&self, location: &Location) -> String {
        format!("{}/points/{:.4},{:.4}", self.base_url, location.latitude, location.longitude)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, ctx: &DashboardContext) -> Result<T> {
        let network = |source| DashboardError::Network { url: url.to_string(), source };

        let res = self
            .http
            .get(url)
            .header(header::USER_AGENT, user_agent(&ctx.contact, &Utc::now().with_timezone(&ctx.timezone)))
            .header(header::ACCEPT, GEO_JSON)
            .header(header::CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(network)?;

        let status = res.status();
        let body = res.text().await.map_err(network)?;

        if !status.is_success() {
            tracing::warn!(%url, %status, "NWS request failed");
            return Err(DashboardError::Status {
                url: url.to_string(),
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| DashboardError::Shape {
            url: url.to_string(),
            source,
        })
    }
}

#[derive(Debug, Deserialize)]
struct PointsResponse {
    properties: PointsProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PointsProperties {
    forecast: Option<String>,
    forecast_hourly: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    properties: ForecastProperties,
}

#[derive(Debug, Deserialize)]
struct ForecastProperties {
    periods: Vec<ForecastPeriod>,
}

#[async_trait]
impl WeatherProvider for NwsProvider {
    async fn forecast(&self, ctx: &DashboardContext) -> Result<ProviderForecast> {
        let points_url = self.points_url(&ctx.location);
        tracing::info!(url = %points_url, "fetching NWS grid point");

        let points: PointsResponse = self.get_json(&points_url, ctx).await?;
        let forecast_url = points
            .properties
            .forecast
            .ok_or(DashboardError::MissingField("properties.forecast"))?;
        let hourly_url = points
            .properties
            .forecast_hourly
            .ok_or(DashboardError::MissingField("properties.forecastHourly"))?;

        let forecast: ForecastResponse = self.get_json(&forecast_url, ctx).await?;
        let hourly: ForecastResponse = self.get_json(&hourly_url, ctx).await?;

        tracing::debug!(
            forecast = forecast.properties.periods.len(),
            hourly = hourly.properties.periods.len(),
            "received NWS periods"
        );

        Ok(ProviderForecast {
            forecast: forecast.properties.periods,
            hourly: hourly.properties.periods,
        })
    }
}

/// NWS asks every client to identify itself with a contact address.
fn user_agent<Tz: TimeZone>(contact: &str, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "(Weather Dashboard, {contact}, timestamp={})",
        now.format("%Y%m%d%H%M%S")
    )
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
