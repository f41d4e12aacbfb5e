//! Gathering provider data and shaping it into a [`Dashboard`].

use chrono::{DateTime, Utc};

use crate::{
    astronomy,
    error::{DashboardError, Result},
    model::{CurrentConditions, Dashboard, DashboardContext, FutureConditions, WeatherReport},
    provider::WeatherProvider,
    window,
};

/// Fetch forecasts from `provider` and compute astronomy for `now`.
pub async fn fetch_report(
    provider: &dyn WeatherProvider,
    ctx: &DashboardContext,
    now: DateTime<Utc>,
) -> Result<WeatherReport> {
    let raw = provider.forecast(ctx).await?;

    let first_hour = raw.hourly.first().ok_or(DashboardError::EmptySequence("hourly"))?;
    let humidity = first_hour
        .relative_humidity
        .ok_or(DashboardError::MissingField("relativeHumidity.value"))?;

    tracing::info!(
        temperature = first_hour.temperature,
        unit = %first_hour.temperature_unit,
        forecast = %first_hour.short_forecast,
        "current conditions"
    );

    let astronomy = astronomy::astronomy(&ctx.location, ctx.timezone, now)?;

    Ok(WeatherReport {
        forecast: raw.forecast,
        hourly: raw.hourly,
        humidity,
        astronomy,
    })
}

/// Select current, look-ahead and daily entries from a fetched report.
pub fn build(report: WeatherReport, ctx: &DashboardContext, now: DateTime<Utc>) -> Result<Dashboard> {
    let first_hour = report.hourly.first().ok_or(DashboardError::EmptySequence("hourly"))?;
    let current = CurrentConditions::from_period(first_hour, report.humidity);

    let target = now
        .with_timezone(&ctx.timezone)
        .checked_add_signed(ctx.forecast_offset)
        .ok_or(DashboardError::InvalidOffset(ctx.forecast_offset.num_hours()))?;
    let ahead = window::nearest_index(&report.hourly, &target)?;
    let future = FutureConditions::from_period(&report.hourly[ahead], ctx.timezone);

    Ok(Dashboard {
        location: ctx.location.name.clone(),
        current,
        future,
        daily: window::daily_summaries(&report.forecast),
        astronomy: report.astronomy,
    })
}

/// Fetch and build a dashboard for the current moment.
pub async fn load(provider: &dyn WeatherProvider, ctx: &DashboardContext) -> Result<Dashboard> {
    let now = Utc::now();
    let report = fetch_report(provider, ctx, now).await?;
    build(report, ctx, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Config, ProviderForecast, window::tests::period};
    use async_trait::async_trait;
    use chrono::{FixedOffset, TimeDelta, TimeZone};

    #[derive(Debug)]
    struct Canned(ProviderForecast);

    #[async_trait]
    impl WeatherProvider for Canned {
        async fn forecast(&self, _ctx: &DashboardContext) -> Result<ProviderForecast> {
            Ok(self.0.clone())
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 13, 0, 0).unwrap()
    }

    fn eastern(at: DateTime<Utc>) -> DateTime<FixedOffset> {
        at.with_timezone(&FixedOffset::west_opt(4 * 3600).unwrap())
    }

    fn hourly(count: i64) -> Vec<crate::ForecastPeriod> {
        (0..count)
            .map(|h| period(&format!("H{h}"), 50 + h as i32, eastern(now() + TimeDelta::hours(h))))
            .collect()
    }

    fn daily() -> Vec<crate::ForecastPeriod> {
        (0..10)
            .map(|i| period(&format!("D{i}"), 40 + i, eastern(now() + TimeDelta::hours(12 * i as i64))))
            .collect()
    }

    fn ctx() -> DashboardContext {
        Config::default().context().unwrap()
    }

    #[tokio::test]
    async fn fetch_report_extracts_humidity_and_astronomy() {
        let provider = Canned(ProviderForecast { forecast: daily(), hourly: hourly(12) });
        let report = fetch_report(&provider, &ctx(), now()).await.unwrap();

        assert_eq!(report.humidity, 60.0);
        assert_eq!(report.hourly.len(), 12);
        assert!(report.astronomy.sunrise.ends_with("AM"));
    }

    #[tokio::test]
    async fn fetch_report_requires_hourly_data() {
        let provider = Canned(ProviderForecast { forecast: daily(), hourly: vec![] });
        let err = fetch_report(&provider, &ctx(), now()).await.unwrap_err();

        assert!(matches!(err, DashboardError::EmptySequence("hourly")));
    }

    #[tokio::test]
    async fn fetch_report_requires_humidity() {
        let mut hours = hourly(3);
        hours[0].relative_humidity = None;
        let provider = Canned(ProviderForecast { forecast: daily(), hourly: hours });
        let err = fetch_report(&provider, &ctx(), now()).await.unwrap_err();

        assert!(matches!(err, DashboardError::MissingField(_)));
    }

    #[tokio::test]
    async fn build_picks_six_hours_ahead() {
        let provider = Canned(ProviderForecast { forecast: daily(), hourly: hourly(12) });
        let report = fetch_report(&provider, &ctx(), now()).await.unwrap();
        let dashboard = build(report, &ctx(), now()).unwrap();

        assert_eq!(dashboard.location, "Exeter, NH");
        assert_eq!(dashboard.current.temperature, 50);
        assert_eq!(dashboard.current.humidity, 60.0);
        // 13:00Z + 6h = 19:00Z = 03:00 PM EDT.
        assert_eq!(dashboard.future.temperature, 56);
        assert_eq!(dashboard.future.time, "03:00 PM");
        assert_eq!(dashboard.daily.len(), 4);
        assert_eq!(dashboard.daily[0].name, "D2");
    }

    #[tokio::test]
    async fn build_rejects_offset_past_the_calendar() {
        let provider = Canned(ProviderForecast { forecast: daily(), hourly: hourly(3) });
        let report = fetch_report(&provider, &ctx(), now()).await.unwrap();

        let mut far = ctx();
        far.forecast_offset = TimeDelta::MAX;
        let err = build(report, &far, now()).unwrap_err();

        assert!(matches!(err, DashboardError::InvalidOffset(_)));
    }

    #[tokio::test]
    async fn build_uses_latest_hour_when_horizon_is_short() {
        let provider = Canned(ProviderForecast { forecast: daily(), hourly: hourly(2) });
        let report = fetch_report(&provider, &ctx(), now()).await.unwrap();
        let dashboard = build(report, &ctx(), now()).unwrap();

        assert_eq!(dashboard.future.temperature, 51);
    }
}
