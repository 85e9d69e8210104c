//! Payload returned by the forecast service.

use serde::{Deserialize, Serialize};

/// The snapshot of conditions at fetch time (`current_weather` in the payload).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature: f64,
    pub windspeed: f64,
    #[serde(default)]
    pub time: Option<String>,
}

/// Parallel hourly sequences, one entry per hour of the requested window.
///
/// Every value sequence is expected to have the same length as `time`; the
/// service reports missing observations as `null`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HourlySeries {
    pub time: Vec<String>,
    #[serde(default)]
    pub relativehumidity_2m: Vec<Option<f64>>,
    #[serde(default)]
    pub temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    pub pressure_msl: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation: Vec<Option<f64>>,
    #[serde(default)]
    pub windspeed_10m: Vec<Option<f64>>,
    #[serde(default)]
    pub windspeed_80m: Vec<Option<f64>>,
    #[serde(default)]
    pub windspeed_120m: Vec<Option<f64>>,
    #[serde(default)]
    pub windspeed_180m: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    /// Offset of the location's timezone, present because the request asks for `timezone=auto`.
    #[serde(default)]
    pub utc_offset_seconds: i32,
    #[serde(default)]
    pub timezone: Option<String>,
    pub current_weather: CurrentWeather,
    pub hourly: HourlySeries,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_with_nulls_and_extra_fields() -> Result<(), serde_json::Error> {
        let payload = json!({
            "latitude": 55.75,
            "longitude": 37.625,
            "generationtime_ms": 0.5,
            "utc_offset_seconds": 10800,
            "timezone": "Europe/Moscow",
            "current_weather": {"temperature": -3.4, "windspeed": 4.1, "winddirection": 200, "time": "2024-03-10T14:00"},
            "hourly_units": {"time": "iso8601"},
            "hourly": {
                "time": ["2024-03-10T13:00", "2024-03-10T14:00"],
                "relativehumidity_2m": [80, 78],
                "temperature_2m": [-3.0, null],
                "pressure_msl": [1012.3, 1012.1],
                "precipitation": [0.0, 0.1],
                "windspeed_10m": [3.5, 4.1],
                "windspeed_80m": [6.2, 7.0],
                "windspeed_120m": [7.1, 7.9],
                "windspeed_180m": [8.0, null]
            }
        });

        let response: ForecastResponse = serde_json::from_value(payload)?;
        assert_eq!(response.utc_offset_seconds, 10800);
        assert_eq!(response.current_weather.temperature, -3.4);
        assert_eq!(response.hourly.time.len(), 2);
        assert_eq!(response.hourly.relativehumidity_2m, vec![Some(80.0), Some(78.0)]);
        assert_eq!(response.hourly.temperature_2m[1], None);
        Ok(())
    }
}
