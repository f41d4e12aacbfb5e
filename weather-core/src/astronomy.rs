use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use chrono_tz::Tz;
use sunrise::{Coordinates, SolarDay, SolarEvent};

use crate::error::{DashboardError, Result};
use crate::model::{AstronomyInfo, CLOCK_FORMAT, Location};
use crate::moon::{self, MoonPhase};

/// Sunrise and sunset on `date` at `location`.
///
/// Fails with [`DashboardError::NoSunEvent`] when the sun stays up or down all day.
pub fn sun_times(location: &Location, date: NaiveDate) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let coords = Coordinates::new(location.latitude, location.longitude).ok_or(
        DashboardError::InvalidCoordinates {
            latitude: location.latitude,
            longitude: location.longitude,
        },
    )?;

    let day = SolarDay::new(coords, date);
    let sunrise = day.event_time(SolarEvent::Sunrise);
    let sunset = day.event_time(SolarEvent::Sunset);

    // Polar day and night collapse both events onto the same instant.
    if sunrise >= sunset || sunset - sunrise >= TimeDelta::days(1) {
        return Err(DashboardError::NoSunEvent(date));
    }

    Ok((sunrise, sunset))
}

/// Sun and moon details for the local calendar day containing `now`.
pub fn astronomy(location: &Location, tz: Tz, now: DateTime<Utc>) -> Result<AstronomyInfo> {
    let local_now = now.with_timezone(&tz);
    let (sunrise, sunset) = sun_times(location, local_now.date_naive())?;

    let index = moon::phase_index(&now);
    let phase = MoonPhase::classify(index);
    tracing::debug!(index, %phase, "computed moon phase");

    Ok(AstronomyInfo {
        sunrise: sunrise.with_timezone(&tz).format(CLOCK_FORMAT).to_string(),
        sunset: sunset.with_timezone(&tz).format(CLOCK_FORMAT).to_string(),
        moon_phase: Some(phase.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};
    use chrono_tz::America::New_York;

    fn exeter() -> Location {
        Location {
            name: "Exeter, NH".to_string(),
            latitude: 42.9814,
            longitude: -70.9462,
        }
    }

    #[test]
    fn sun_rises_before_it_sets() {
        let date = NaiveDate::from_ymd_opt(2026, 6, 21).unwrap();
        let (rise, set) = sun_times(&exeter(), date).unwrap();

        assert!(rise < set);
        // Around 05:05 and 20:25 EDT on the solstice.
        assert_eq!(rise.with_timezone(&New_York).hour(), 5);
        assert_eq!(set.with_timezone(&New_York).hour(), 20);
    }

    #[test]
    fn formats_times_on_local_clock() {
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 16, 0, 0).unwrap();
        let info = astronomy(&exeter(), New_York, now).unwrap();

        assert!(info.sunrise.starts_with("07:"), "sunrise {}", info.sunrise);
        assert!(info.sunrise.ends_with("AM"));
        assert!(info.sunset.starts_with("05:"), "sunset {}", info.sunset);
        assert!(info.sunset.ends_with("PM"));
        assert!(info.moon_phase.is_some());
    }

    #[test]
    fn polar_night_has_no_sun_times() {
        let longyearbyen = Location {
            name: "Longyearbyen".to_string(),
            latitude: 78.22,
            longitude: 15.65,
        };
        let now = Utc.with_ymd_and_hms(2026, 12, 21, 12, 0, 0).unwrap();

        let err = astronomy(&longyearbyen, chrono_tz::Europe::Oslo, now).unwrap_err();
        assert!(matches!(err, DashboardError::NoSunEvent(d) if d == NaiveDate::from_ymd_opt(2026, 12, 21).unwrap()));
    }

    #[test]
    fn rejects_impossible_coordinates() {
        let location = Location { latitude: 123.0, ..exeter() };
        let err = astronomy(&location, New_York, Utc::now()).unwrap_err();

        assert!(matches!(err, DashboardError::InvalidCoordinates { .. }));
    }
}
