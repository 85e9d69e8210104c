//! Headline numbers shown above the charts: temperature, wind and humidity,
//! each with its change since the previous hour.

use crate::forecast::response::CurrentWeather;
use crate::table::samples::SamplePair;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metric {
    pub value: Option<f64>,
    /// Change since the previous hour; `None` if either side is missing.
    pub delta: Option<f64>,
    pub unit: &'static str,
}

impl Metric {
    fn new(value: Option<f64>, previous: Option<f64>, unit: &'static str) -> Self {
        let delta = value.zip(previous).map(|(now, before)| now - before);
        Self { value, delta, unit }
    }

    fn rounded(mut self) -> Self {
        self.delta = self.delta.map(round2);
        self
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(value) => write!(f, "{}{}", value, self.unit)?,
            None => write!(f, "n/a")?,
        }
        if let Some(delta) = self.delta {
            write!(f, " ({:+}{})", delta, self.unit)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardMetrics {
    pub temperature: Metric,
    pub wind_speed: Metric,
    pub humidity: Metric,
}

impl DashboardMetrics {
    /// Computes the three metrics.
    ///
    /// The temperature value is the live `current_weather` reading; wind speed
    /// (10 m) and humidity come from the current-hour row. Every delta is taken
    /// against the previous-hour row. Temperature and wind deltas are rounded to
    /// two decimals, the humidity delta is left as is.
    pub fn from_samples(current_weather: &CurrentWeather, samples: &SamplePair<'_>) -> Self {
        let current = samples.current;
        let previous = samples.previous;

        Self {
            temperature: Metric::new(
                Some(current_weather.temperature),
                previous.temperature,
                "°C",
            )
            .rounded(),
            wind_speed: Metric::new(current.wind_speed(), previous.wind_speed(), "m/s").rounded(),
            humidity: Metric::new(current.relative_humidity, previous.relative_humidity, "%"),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::hourly_table::{build_table, HourlyTable};
    use crate::table::samples::select_samples;
    use crate::test_data::{forecast_response, hour_at};

    fn table() -> HourlyTable {
        let mut response = forecast_response(hour_at(2024, 3, 10, 0), 24);
        response.hourly.temperature_2m[12] = Some(1.111);
        response.hourly.windspeed_10m[12] = Some(4.0);
        response.hourly.windspeed_10m[13] = Some(5.337);
        response.hourly.relativehumidity_2m[12] = Some(81.0);
        response.hourly.relativehumidity_2m[13] = Some(77.5);
        build_table(&response).unwrap()
    }

    #[test]
    fn test_metrics_use_live_temperature_and_row_values() {
        let table = table();
        let samples = select_samples(&table, hour_at(2024, 3, 10, 13)).unwrap();
        let current = CurrentWeather {
            temperature: 2.5,
            windspeed: 9.9,
            time: None,
        };

        let metrics = DashboardMetrics::from_samples(&current, &samples);

        assert_eq!(metrics.temperature.value, Some(2.5));
        assert_eq!(metrics.temperature.delta, Some(1.39));
        assert_eq!(metrics.wind_speed.value, Some(5.337));
        assert_eq!(metrics.wind_speed.delta, Some(1.34));
        assert_eq!(metrics.humidity.value, Some(77.5));
        assert_eq!(metrics.humidity.delta, Some(-3.5));
    }

    #[test]
    fn test_missing_previous_value_leaves_delta_empty() {
        let mut response = forecast_response(hour_at(2024, 3, 10, 0), 3);
        response.hourly.relativehumidity_2m[0] = None;
        let table = build_table(&response).unwrap();
        let samples = select_samples(&table, hour_at(2024, 3, 10, 1)).unwrap();

        let metrics = DashboardMetrics::from_samples(&response.current_weather, &samples);
        assert!(metrics.humidity.value.is_some());
        assert_eq!(metrics.humidity.delta, None);
    }

    #[test]
    fn test_display() {
        let metric = Metric {
            value: Some(3.5),
            delta: Some(-0.25),
            unit: "m/s",
        };
        assert_eq!(metric.to_string(), "3.5m/s (-0.25m/s)");

        let empty = Metric {
            value: None,
            delta: None,
            unit: "%",
        };
        assert_eq!(empty.to_string(), "n/a");
    }
}
