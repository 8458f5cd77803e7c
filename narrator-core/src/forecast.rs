//! Reduces the provider's 3-hour forecast to one sample per future day.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike};

use crate::model::{ForecastEntry, ForecastSample};

/// Maximum number of days returned to the client.
pub const MAX_FORECAST_DAYS: usize = 5;

/// Day labels indexed by days since Monday.
pub const DAY_NAMES: [&str; 7] = [
    "Lunes",
    "Martes",
    "Miércoles",
    "Jueves",
    "Viernes",
    "Sábado",
    "Domingo",
];

const DT_TXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn is_midday(time: NaiveTime) -> bool {
    (time.hour(), time.minute(), time.second(), time.nanosecond()) == (12, 0, 0, 0)
}

/// Keep the 12:00:00 entry of each calendar day after `today`, in provider
/// order, up to [`MAX_FORECAST_DAYS`].
///
/// The time of day is read from the provider's `dt_txt`; the calendar date is
/// the entry's `dt` seen in `tz`. Days without an exact 12:00:00 slot are not
/// represented.
pub fn reduce<Tz: TimeZone>(
    entries: &[ForecastEntry],
    today: NaiveDate,
    tz: &Tz,
) -> Vec<ForecastSample> {
    let mut admitted: Vec<NaiveDate> = Vec::with_capacity(MAX_FORECAST_DAYS);
    let mut samples = Vec::with_capacity(MAX_FORECAST_DAYS);

    for entry in entries {
        if samples.len() == MAX_FORECAST_DAYS {
            break;
        }

        let Ok(ts) = NaiveDateTime::parse_from_str(&entry.dt_txt, DT_TXT_FORMAT) else {
            tracing::debug!(dt_txt = %entry.dt_txt, "skipping forecast entry with unparseable timestamp");
            continue;
        };

        if !is_midday(ts.time()) {
            continue;
        }

        let Some(date) = DateTime::from_timestamp(entry.dt, 0)
            .map(|utc| utc.with_timezone(tz).date_naive())
        else {
            tracing::debug!(dt = entry.dt, "skipping forecast entry with out-of-range timestamp");
            continue;
        };

        if date == today || admitted.contains(&date) {
            continue;
        }

        admitted.push(date);
        samples.push(ForecastSample {
            day: day_name(date).to_string(),
            temp: entry.temperature_c,
            icon: entry.icon.clone(),
        });
    }

    samples
}

pub fn day_name(date: NaiveDate) -> &'static str {
    DAY_NAMES[date.weekday().num_days_from_monday() as usize]
}
