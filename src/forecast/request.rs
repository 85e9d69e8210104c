//! The parameter set sent to the forecast service.

use crate::config::{DEFAULT_FORECAST_DAYS, DEFAULT_PAST_DAYS};
use crate::types::hourly_variable::HourlyVariable;
use crate::types::lat_lon::LatLon;
use bon::bon;
use chrono::{Days, NaiveDate};
use ordered_float::OrderedFloat;
use std::fmt;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Unit the forecast service should use for every wind-speed series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WindSpeedUnit {
    /// Metres per second.
    #[default]
    Ms,
    /// Kilometres per hour.
    Kmh,
    /// Miles per hour.
    Mph,
    /// Knots.
    Kn,
}

impl WindSpeedUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WindSpeedUnit::Ms => "ms",
            WindSpeedUnit::Kmh => "kmh",
            WindSpeedUnit::Mph => "mph",
            WindSpeedUnit::Kn => "kn",
        }
    }
}

impl fmt::Display for WindSpeedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A fully populated forecast query.
///
/// The coordinates are stored as [`OrderedFloat`] so the whole request can be
/// used as a memoization key. Because the date window is part of the key, a
/// request built on a later day never reuses an older payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ForecastRequest {
    pub latitude: OrderedFloat<f64>,
    pub longitude: OrderedFloat<f64>,
    pub current_weather: bool,
    pub windspeed_unit: WindSpeedUnit,
    pub timezone: String,
    pub hourly: Vec<HourlyVariable>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[bon]
impl ForecastRequest {
    /// Builds the request for a coordinate, with the date window derived from `today`.
    ///
    /// The window is `[today - past_days, today + forecast_days]`, by default
    /// yesterday through two weeks from today. All eight [`HourlyVariable`]s are
    /// requested, wind speeds in m/s, with the service choosing the local timezone.
    ///
    /// # Example
    ///
    /// ```
    /// use meteodash::{ForecastRequest, LatLon};
    /// use chrono::NaiveDate;
    ///
    /// let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
    /// let request = ForecastRequest::for_location(LatLon(55.75, 37.61))
    ///     .today(today)
    ///     .call();
    ///
    /// assert_eq!(request.start_date, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
    /// assert_eq!(request.end_date, NaiveDate::from_ymd_opt(2024, 3, 24).unwrap());
    /// assert_eq!(request.hourly.len(), 8);
    /// ```
    #[builder(start_fn = for_location)]
    #[doc(hidden)]
    pub fn build_for_location(
        #[builder(start_fn)] coordinate: LatLon,
        today: NaiveDate,
        past_days: Option<u32>,
        forecast_days: Option<u32>,
        windspeed_unit: Option<WindSpeedUnit>,
    ) -> Self {
        let past_days = past_days.unwrap_or(DEFAULT_PAST_DAYS);
        let forecast_days = forecast_days.unwrap_or(DEFAULT_FORECAST_DAYS);

        Self {
            latitude: OrderedFloat(coordinate.latitude()),
            longitude: OrderedFloat(coordinate.longitude()),
            current_weather: true,
            windspeed_unit: windspeed_unit.unwrap_or_default(),
            timezone: "auto".to_string(),
            hourly: HourlyVariable::ALL.to_vec(),
            start_date: today - Days::new(u64::from(past_days)),
            end_date: today + Days::new(u64::from(forecast_days)),
        }
    }

    pub fn coordinate(&self) -> LatLon {
        LatLon(self.latitude.into_inner(), self.longitude.into_inner())
    }

    /// The query parameters, in the order they are sent.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let hourly = self
            .hourly
            .iter()
            .map(HourlyVariable::api_name)
            .collect::<Vec<_>>()
            .join(",");

        vec![
            ("latitude", self.latitude.to_string()),
            ("longitude", self.longitude.to_string()),
            ("current_weather", self.current_weather.to_string()),
            ("windspeed_unit", self.windspeed_unit.to_string()),
            ("timezone", self.timezone.clone()),
            ("hourly", hourly),
            ("start_date", self.start_date.format(DATE_FORMAT).to_string()),
            ("end_date", self.end_date.format(DATE_FORMAT).to_string()),
        ]
    }
}
