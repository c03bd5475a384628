use std::fmt::{self, Write};

use citywx_core::DisplayViewModel;

/// Plain-text weather card.
pub fn card(view: &DisplayViewModel) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let t = &view.temperature;

    writeln!(out, "{}", view.city)?;
    writeln!(out, "{}", view.coordinates)?;
    writeln!(out, "Direction: {}", view.bearing)?;
    writeln!(out, "{} · {}", view.date, view.timezone)?;
    if !view.hebrew_date.is_empty() {
        writeln!(out, "{}", view.hebrew_date)?;
    }
    writeln!(out)?;
    writeln!(out, "{}  {}", t.current, t.description)?;
    writeln!(out, "Feels like: {}", t.feels_like)?;
    if let Some(min_max) = &t.min_max {
        writeln!(out, "Min / max:  {min_max}")?;
    }
    writeln!(out, "Humidity:   {}", view.humidity)?;
    writeln!(out, "Clouds:     {}", view.clouds)?;
    writeln!(out, "Pressure:   {}", view.pressure)?;
    if let Some(visibility) = &view.visibility {
        writeln!(out, "Visibility: {visibility}")?;
    }
    writeln!(out, "Wind:       {}", view.wind.label)?;
    writeln!(out, "Sun:        {}", view.sun.label)?;
    writeln!(out, "Observed:   {}", view.observed_at)?;

    if !view.hourly.is_empty() {
        writeln!(out)?;
        writeln!(out, "Daylight hours:")?;
        for row in &view.hourly {
            writeln!(out, "  {:>5}  {:>6}  {}", row.time, row.temperature, row.pressure)?;
        }
    }

    Ok(out)
}
