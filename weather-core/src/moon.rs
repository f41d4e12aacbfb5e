//! Lunar phase index and its named classification.

use chrono::{DateTime, TimeZone, Utc};
use std::fmt;

/// Mean synodic month in days.
const SYNODIC_MONTH_DAYS: f64 = 29.530_588_853;

/// Width of the phase index domain; one lunation maps onto `[0, PHASE_SCALE)`.
pub const PHASE_SCALE: f64 = 28.0;

// New moon of 2000-01-06 18:14 UTC.
const REFERENCE_NEW_MOON_SECS: i64 = 947_182_440;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoonPhase {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoonPhase::NewMoon => "New Moon",
            MoonPhase::WaxingCrescent => "Waxing Crescent",
            MoonPhase::FirstQuarter => "First Quarter",
            MoonPhase::WaxingGibbous => "Waxing Gibbous",
            MoonPhase::FullMoon => "Full Moon",
            MoonPhase::WaningGibbous => "Waning Gibbous",
            MoonPhase::LastQuarter => "Last Quarter",
            MoonPhase::WaningCrescent => "Waning Crescent",
        }
    }

    /// Classify a phase index (lunar age scaled to `[0, 28)`).
    ///
    /// Buckets are 3.5 wide and closed-open, with New Moon straddling the wrap
    /// point. Anything outside the domain, NaN included, lands on New Moon.
    pub fn classify(index: f64) -> Self {
        match index {
            i if (1.75..5.25).contains(&i) => MoonPhase::WaxingCrescent,
            i if (5.25..8.75).contains(&i) => MoonPhase::FirstQuarter,
            i if (8.75..12.25).contains(&i) => MoonPhase::WaxingGibbous,
            i if (12.25..15.75).contains(&i) => MoonPhase::FullMoon,
            i if (15.75..19.25).contains(&i) => MoonPhase::WaningGibbous,
            i if (19.25..22.75).contains(&i) => MoonPhase::LastQuarter,
            i if (22.75..26.25).contains(&i) => MoonPhase::WaningCrescent,
            _ => MoonPhase::NewMoon,
        }
    }

    pub const fn all() -> &'static [MoonPhase] {
        &[
            MoonPhase::NewMoon,
            MoonPhase::WaxingCrescent,
            MoonPhase::FirstQuarter,
            MoonPhase::WaxingGibbous,
            MoonPhase::FullMoon,
            MoonPhase::WaningGibbous,
            MoonPhase::LastQuarter,
            MoonPhase::WaningCrescent,
        ]
    }
}

impl fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Phase index for an instant: how far the moon is through the mean lunation,
/// scaled to `[0, 28)`. Does not account for orbital perturbations, so it can
/// be several hours off the true phase.
pub fn phase_index<Tz: TimeZone>(at: &DateTime<Tz>) -> f64 {
    let elapsed_secs = at.with_timezone(&Utc).timestamp() - REFERENCE_NEW_MOON_SECS;
    let elapsed_days = elapsed_secs as f64 / 86_400.0;
    let fraction = (elapsed_days / SYNODIC_MONTH_DAYS).rem_euclid(1.0);

    // rem_euclid can round up to exactly 1.0 for tiny negative inputs.
    if fraction >= 1.0 { 0.0 } else { fraction * PHASE_SCALE }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_closed_open() {
        assert_eq!(MoonPhase::classify(0.0), MoonPhase::NewMoon);
        assert_eq!(MoonPhase::classify(1.749), MoonPhase::NewMoon);
        assert_eq!(MoonPhase::classify(1.75), MoonPhase::WaxingCrescent);
        assert_eq!(MoonPhase::classify(5.25), MoonPhase::FirstQuarter);
        assert_eq!(MoonPhase::classify(8.75), MoonPhase::WaxingGibbous);
        assert_eq!(MoonPhase::classify(12.25), MoonPhase::FullMoon);
        assert_eq!(MoonPhase::classify(15.75), MoonPhase::WaningGibbous);
        assert_eq!(MoonPhase::classify(19.25), MoonPhase::LastQuarter);
        assert_eq!(MoonPhase::classify(22.75), MoonPhase::WaningCrescent);
        assert_eq!(MoonPhase::classify(26.24), MoonPhase::WaningCrescent);
        assert_eq!(MoonPhase::classify(26.25), MoonPhase::NewMoon);
        assert_eq!(MoonPhase::classify(27.99), MoonPhase::NewMoon);
    }

    #[test]
    fn out_of_domain_folds_into_new_moon() {
        for v in [-0.5, 28.0, 100.0, f64::NAN, f64::INFINITY] {
            assert_eq!(MoonPhase::classify(v), MoonPhase::NewMoon, "value {v}");
        }
    }

    #[test]
    fn every_phase_is_reachable() {
        let mut seen: Vec<MoonPhase> = (0..280)
            .map(|tenth| MoonPhase::classify(tenth as f64 / 10.0))
            .collect();
        seen.dedup();
        for phase in MoonPhase::all() {
            assert!(seen.contains(phase), "{phase} never produced");
        }
    }

    #[test]
    fn classify_is_deterministic() {
        for v in [0.3, 7.0, 14.0, 21.0, 26.0] {
            assert_eq!(MoonPhase::classify(v), MoonPhase::classify(v));
        }
    }

    #[test]
    fn phase_index_tracks_known_lunations() {
        // Full moon 2024-01-25 17:54 UTC.
        let full = Utc.with_ymd_and_hms(2024, 1, 25, 17, 54, 0).unwrap();
        assert_eq!(MoonPhase::classify(phase_index(&full)), MoonPhase::FullMoon);

        // New moon 2024-04-08 18:21 UTC (the total eclipse).
        let new = Utc.with_ymd_and_hms(2024, 4, 8, 18, 21, 0).unwrap();
        assert_eq!(MoonPhase::classify(phase_index(&new)), MoonPhase::NewMoon);

        // First quarter 2024-03-17 04:11 UTC.
        let quarter = Utc.with_ymd_and_hms(2024, 3, 17, 4, 11, 0).unwrap();
        assert_eq!(MoonPhase::classify(phase_index(&quarter)), MoonPhase::FirstQuarter);
    }

    #[test]
    fn phase_index_stays_in_domain_before_reference() {
        let early = Utc.with_ymd_and_hms(1969, 7, 20, 20, 17, 0).unwrap();
        let index = phase_index(&early);
        assert!((0.0..PHASE_SCALE).contains(&index));
    }
}
