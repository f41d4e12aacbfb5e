//! Picking and grouping forecast periods.

use chrono::{DateTime, TimeZone, Utc};

use crate::error::{DashboardError, Result};
use crate::model::{DailySummary, ForecastPeriod};

/// Periods covering today and tonight, which the daily outlook leaves out.
pub const SKIPPED_PERIODS: usize = 2;

/// Number of days in the daily outlook.
pub const OUTLOOK_DAYS: usize = 4;

/// Index of the period starting closest to `target`. Ties go to the earlier entry.
pub fn nearest_index<Tz: TimeZone>(
    periods: &[ForecastPeriod],
    target: &DateTime<Tz>,
) -> Result<usize> {
    let target = target.with_timezone(&Utc);

    periods
        .iter()
        .enumerate()
        .min_by_key(|(_, p)| (p.start_time.with_timezone(&Utc) - target).num_milliseconds().abs())
        .map(|(i, _)| i)
        .ok_or(DashboardError::EmptySequence("hourly"))
}

/// Pair the day/night periods following today into at most [`OUTLOOK_DAYS`] summaries.
///
/// A trailing period without a partner is dropped.
pub fn daily_summaries(periods: &[ForecastPeriod]) -> Vec<DailySummary> {
    periods
        .get(SKIPPED_PERIODS..)
        .unwrap_or_default()
        .chunks_exact(2)
        .take(OUTLOOK_DAYS)
        .map(|pair| summarize(&pair[0], &pair[1]))
        .collect()
}

fn summarize(day: &ForecastPeriod, night: &ForecastPeriod) -> DailySummary {
    // Some nights are forecast warmer than the preceding day.
    DailySummary {
        name: day.name.clone(),
        short_forecast: day.short_forecast.clone(),
        high_temp: day.temperature.max(night.temperature),
        low_temp: day.temperature.min(night.temperature),
        temperature_unit: day.temperature_unit.clone(),
    }
}
