//! HTML for the dashboard page and its error view.

use maud::{DOCTYPE, Markup, PreEscaped, html};
use weather_dashboard_core::{Dashboard, DailySummary};

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:2rem auto;max-width:56rem;padding:0 1rem;color:#1d2733;background:#f4f7fa}\
h1{font-weight:600}\
section{background:#fff;border-radius:.5rem;padding:1rem 1.5rem;margin-bottom:1rem;box-shadow:0 1px 3px #0002}\
.temp{font-size:2.5rem;margin:.25rem 0}\
.days{display:grid;grid-template-columns:repeat(auto-fit,minmax(10rem,1fr));gap:1rem}\
.error{color:#a12020}";

fn layout(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                style { (PreEscaped(STYLE)) }
            }
            body { (body) }
        }
    }
}

fn day_card(day: &DailySummary) -> Markup {
    let unit = &day.temperature_unit;
    html! {
        div.day {
            h3 { (day.name) }
            p { (day.short_forecast) }
            p { "High " (day.high_temp) "°" (unit) " / Low " (day.low_temp) "°" (unit) }
        }
    }
}

/// Full dashboard page.
pub fn dashboard(board: &Dashboard) -> Markup {
    let current = &board.current;
    let future = &board.future;
    let astronomy = &board.astronomy;

    let body = html! {
        h1 { "Weather for " (board.location) }
        section.current {
            h2 { "Now" }
            p.temp { (current.temperature) "°" (current.temperature_unit) }
            p { (current.short_forecast) }
            p {
                "Wind " (current.wind_speed) " " (current.wind_direction)
                " · Humidity " (format!("{:.0}", current.humidity)) "%"
            }
        }
        section.future {
            h2 { "At " (future.time) }
            p.temp { (future.temperature) "°" (future.temperature_unit) }
            p { (future.short_forecast) }
            p { "Wind " (future.wind_speed) " " (future.wind_direction) }
        }
        section.outlook {
            h2 { "Next days" }
            div.days {
                @for day in &board.daily {
                    (day_card(day))
                }
            }
        }
        section.astronomy {
            h2 { "Sun & Moon" }
            p { "Sunrise " (astronomy.sunrise) " · Sunset " (astronomy.sunset) }
            @if let Some(phase) = &astronomy.moon_phase {
                p { "Moon: " (phase) }
            }
        }
    };

    layout(&format!("Weather for {}", board.location), body)
}

/// Page shown in place of the dashboard when data could not be loaded.
pub fn error(message: &str) -> Markup {
    let body = html! {
        h1 { "Weather" }
        section.error {
            h2 { "Unable to load weather data" }
            p { (message) }
        }
    };
    layout("Weather unavailable", body)
}
