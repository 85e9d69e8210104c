//! Synthetic forecast payloads for unit tests.
//!
//! Wind speeds are derived from the hour of day so per-hour means are easy to
//! predict: 10 m = hour, 80 m = hour + 1, 120 m = 2 * hour, 180 m = index of
//! the day within the payload.

use crate::forecast::response::{CurrentWeather, ForecastResponse, HourlySeries};
use crate::table::hourly_table::TIMESTAMP_FORMAT;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta, Timelike};

pub(crate) fn hour_at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

pub(crate) fn forecast_response(start: NaiveDateTime, hours: usize) -> ForecastResponse {
    let mut hourly = HourlySeries::default();

    for i in 0..hours {
        let timestamp = start + TimeDelta::hours(i as i64);
        let hour = timestamp.hour() as f64;

        hourly.time.push(timestamp.format(TIMESTAMP_FORMAT).to_string());
        hourly.relativehumidity_2m.push(Some(50.0 + (i % 30) as f64));
        hourly.temperature_2m.push(Some(-5.0 + i as f64 * 0.25));
        hourly.pressure_msl.push(Some(1000.0 + (i % 10) as f64));
        hourly
            .precipitation
            .push(Some(if i % 7 == 0 { 0.5 } else { 0.0 }));
        hourly.windspeed_10m.push(Some(hour));
        hourly.windspeed_80m.push(Some(hour + 1.0));
        hourly.windspeed_120m.push(Some(hour * 2.0));
        hourly.windspeed_180m.push(Some((i / 24) as f64));
    }

    ForecastResponse {
        latitude: 55.75,
        longitude: 37.61,
        utc_offset_seconds: 0,
        timezone: Some("GMT".to_string()),
        current_weather: CurrentWeather {
            temperature: 2.0,
            windspeed: 3.0,
            time: None,
        },
        hourly,
    }
}
