use chrono::{DateTime, FixedOffset, TimeDelta};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize};

/// Format used for every clock time shown on the dashboard, e.g. `06:05 PM`.
pub const CLOCK_FORMAT: &str = "%I:%M %p";

/// One forecast entry as published by the provider (an hour, or a day/night block).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    pub name: String,
    pub short_forecast: String,
    pub temperature: i32,
    pub temperature_unit: String,
    pub wind_speed: String,
    pub wind_direction: String,
    pub start_time: DateTime<FixedOffset>,
    #[serde(default, deserialize_with = "quantitative_value")]
    pub relative_humidity: Option<f64>,
}

/// NWS wraps measurements as `{"unitCode": "...", "value": 42}`; only the value matters here.
fn quantitative_value<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Quantity {
        value: Option<f64>,
    }

    Ok(Option::<Quantity>::deserialize(deserializer)?.and_then(|q| q.value))
}

/// High/low summary for one future day, built from a day/night pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySummary {
    pub name: String,
    pub short_forecast: String,
    pub high_temp: i32,
    pub low_temp: i32,
    pub temperature_unit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AstronomyInfo {
    pub sunrise: String,
    pub sunset: String,
    pub moon_phase: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    pub temperature: i32,
    pub temperature_unit: String,
    pub short_forecast: String,
    pub wind_speed: String,
    pub wind_direction: String,
    pub humidity: f64,
}

impl CurrentConditions {
    pub fn from_period(period: &ForecastPeriod, humidity: f64) -> Self {
        Self {
            temperature: period.temperature,
            temperature_unit: period.temperature_unit.clone(),
            short_forecast: period.short_forecast.clone(),
            wind_speed: period.wind_speed.clone(),
            wind_direction: period.wind_direction.clone(),
            humidity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FutureConditions {
    pub temperature: i32,
    pub temperature_unit: String,
    pub short_forecast: String,
    pub wind_speed: String,
    pub wind_direction: String,
    /// Period start in the dashboard's local zone, formatted with [`CLOCK_FORMAT`].
    pub time: String,
}

impl FutureConditions {
    pub fn from_period(period: &ForecastPeriod, tz: Tz) -> Self {
        Self {
            temperature: period.temperature,
            temperature_unit: period.temperature_unit.clone(),
            short_forecast: period.short_forecast.clone(),
            wind_speed: period.wind_speed.clone(),
            wind_direction: period.wind_direction.clone(),
            time: period.start_time.with_timezone(&tz).format(CLOCK_FORMAT).to_string(),
        }
    }
}

/// Raw forecast sequences as returned by a [`crate::WeatherProvider`].
#[derive(Debug, Clone, Default)]
pub struct ProviderForecast {
    pub forecast: Vec<ForecastPeriod>,
    pub hourly: Vec<ForecastPeriod>,
}

/// Everything fetched for one dashboard render.
#[derive(Debug, Clone)]
pub struct WeatherReport {
    pub forecast: Vec<ForecastPeriod>,
    pub hourly: Vec<ForecastPeriod>,
    pub humidity: f64,
    pub astronomy: AstronomyInfo,
}

/// The view model handed to the renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub location: String,
    pub current: CurrentConditions,
    pub future: FutureConditions,
    pub daily: Vec<DailySummary>,
    pub astronomy: AstronomyInfo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Per-request settings, built from [`crate::Config::context`].
#[derive(Debug, Clone)]
pub struct DashboardContext {
    pub location: Location,
    pub contact: String,
    pub timezone: Tz,
    pub forecast_offset: TimeDelta,
}
