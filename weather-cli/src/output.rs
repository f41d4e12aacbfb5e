//! Plain-text rendering for `weather-dashboard show`.

use std::fmt::Write;
use weather_dashboard_core::Dashboard;

pub fn render(board: &Dashboard) -> String {
    let mut out = String::new();
    let current = &board.current;
    let future = &board.future;

    // Writing into a String cannot fail.
    let _ = writeln!(out, "Weather for {}\n", board.location);
    let _ = writeln!(
        out,
        "{:<12}{}°{}  {}",
        "Now", current.temperature, current.temperature_unit, current.short_forecast
    );
    let _ = writeln!(
        out,
        "{:<12}Wind {} {}, humidity {:.0}%",
        "", current.wind_speed, current.wind_direction, current.humidity
    );
    let _ = writeln!(
        out,
        "{:<12}{}°{}  {}",
        format!("At {}", future.time),
        future.temperature,
        future.temperature_unit,
        future.short_forecast
    );
    let _ = writeln!(out, "{:<12}Wind {} {}\n", "", future.wind_speed, future.wind_direction);

    for day in &board.daily {
        let _ = writeln!(
            out,
            "{:<16}{:>4}° / {:>3}°{}  {}",
            day.name, day.high_temp, day.low_temp, day.temperature_unit, day.short_forecast
        );
    }
    if !board.daily.is_empty() {
        out.push('\n');
    }

    let astronomy = &board.astronomy;
    let _ = write!(out, "Sunrise {}   Sunset {}", astronomy.sunrise, astronomy.sunset);
    if let Some(phase) = &astronomy.moon_phase {
        let _ = write!(out, "   Moon {phase}");
    }
    out.push('\n');

    out
}
