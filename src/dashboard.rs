//! This module provides the main entry point: an address goes in, and the
//! tables and metrics the dashboard widgets consume come out.

use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::forecast::fetcher::{ForecastCache, ForecastFetcher};
use crate::forecast::request::ForecastRequest;
use crate::forecast::response::CurrentWeather;
use crate::geocoding::geocoder::{GeocodeCache, Geocoder};
use crate::presentation::{donut_frame, heatmap_frame, line_chart_frame, ViewOptions};
use crate::table::aggregate::{aggregate_by_hour, HourlyAggregate};
use crate::table::error::TableError;
use crate::table::hourly_table::{build_table, HourlyRow, HourlyTable};
use crate::table::metrics::DashboardMetrics;
use crate::table::samples::{local_time, select_samples};
use crate::types::lat_lon::LatLon;
use bon::bon;
use chrono::{DateTime, NaiveDateTime, Utc};
use log::info;
use polars::prelude::DataFrame;
use reqwest::Client;
use std::sync::Arc;

/// Everything one address submission produces.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub address: String,
    pub coordinate: LatLon,
    pub request: ForecastRequest,
    pub current_weather: CurrentWeather,
    pub timezone: Option<String>,
    /// Wall-clock time at the location when the dashboard was built.
    pub local_time: NaiveDateTime,
    pub table: HourlyTable,
    /// Index of the current-hour row in `table`; the previous hour is at `current_index - 1`.
    pub current_index: usize,
    pub metrics: DashboardMetrics,
    pub aggregate: HourlyAggregate,
}

/// The frames behind the three charts, cut according to [`ViewOptions`].
#[derive(Debug, Clone)]
pub struct ChartFrames {
    pub heatmap: DataFrame,
    pub donut: DataFrame,
    pub line_chart: DataFrame,
}

impl DashboardData {
    pub fn current(&self) -> Option<&HourlyRow> {
        self.table.get(self.current_index)
    }

    pub fn previous(&self) -> Option<&HourlyRow> {
        self.current_index
            .checked_sub(1)
            .and_then(|index| self.table.get(index))
    }

    /// Builds the chart frames for the given sidebar state.
    ///
    /// # Errors
    ///
    /// Returns a [`TableError`] if Polars fails to shape one of the frames.
    pub fn charts(&self, options: &ViewOptions) -> Result<ChartFrames, TableError> {
        Ok(ChartFrames {
            heatmap: heatmap_frame(&self.table, options.heatmap)?,
            donut: donut_frame(&self.aggregate, options.donut)?,
            line_chart: line_chart_frame(&self.table, &options.line_chart)?,
        })
    }
}

/// The dashboard pipeline: geocoder, forecast fetcher and their caches.
///
/// Each [`Dashboard::load`] runs one geocode call, then one forecast call,
/// then the table transforms, in that order. Both calls are memoized for the
/// lifetime of the caches (see [`crate::MemoCache`]).
///
/// # Examples
///
/// ```no_run
/// # use meteodash::{Dashboard, DashboardError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), DashboardError> {
/// let dashboard = Dashboard::new()?; // reads ORS_API_KEY
/// let data = dashboard.load("Moscow").call().await?;
///
/// println!("Temperature: {}", data.metrics.temperature);
/// println!("{} hourly rows", data.table.len());
/// # Ok(())
/// # }
/// ```
pub struct Dashboard {
    config: DashboardConfig,
    geocoder: Geocoder,
    fetcher: ForecastFetcher,
}

#[bon]
impl Dashboard {
    /// Creates a dashboard configured from the environment, with fresh caches.
    ///
    /// # Errors
    ///
    /// See [`DashboardConfig::from_env`] and [`Dashboard::with_config`].
    pub fn new() -> Result<Self, DashboardError> {
        Self::with_config(DashboardConfig::from_env()?)
    }

    /// Creates a dashboard with fresh, empty caches.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::HttpClient`] if the HTTP client cannot be built.
    pub fn with_config(config: DashboardConfig) -> Result<Self, DashboardError> {
        Self::with_caches(
            config,
            Arc::new(GeocodeCache::new("geocode")),
            Arc::new(ForecastCache::new("forecast")),
        )
    }

    /// Creates a dashboard that memoizes into the given caches.
    ///
    /// Sharing caches between several `Dashboard`s lets them reuse each other's lookups.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::HttpClient`] if the HTTP client cannot be built.
    pub fn with_caches(
        config: DashboardConfig,
        geocode_cache: Arc<GeocodeCache>,
        forecast_cache: Arc<ForecastCache>,
    ) -> Result<Self, DashboardError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(DashboardError::HttpClient)?;

        Ok(Self {
            geocoder: Geocoder::new(
                client.clone(),
                config.geocoding_url.clone(),
                config.api_key.clone(),
                geocode_cache,
            ),
            fetcher: ForecastFetcher::new(client, config.forecast_url.clone(), forecast_cache),
            config,
        })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Runs the whole pipeline for `address`.
    ///
    /// Optionally takes `.now(DateTime<Utc>)`; defaults to the current time. The
    /// forecast window is computed from that date, and the current-hour row is
    /// looked up at that instant in the forecast location's own timezone.
    ///
    /// # Errors
    ///
    /// * [`DashboardError::EmptyAddress`] for a blank address (no call is made).
    /// * [`DashboardError::NoResults`] if the geocoder has no candidate; the
    ///   forecast service is then not called.
    /// * [`DashboardError::Geocode`] / [`DashboardError::Forecast`] if a service
    ///   is unreachable or answers with an error status.
    /// * [`DashboardError::Table`] if the payload is malformed.
    /// * [`DashboardError::Selection`] if the current hour (or the hour before
    ///   it) is not covered by the forecast.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use meteodash::{Dashboard, DashboardConfig, DashboardError};
    /// use chrono::{TimeZone, Utc};
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), DashboardError> {
    /// let dashboard = Dashboard::with_config(DashboardConfig::builder().api_key("key").build())?;
    /// let at = Utc.with_ymd_and_hms(2024, 3, 10, 14, 20, 0).unwrap();
    ///
    /// match dashboard.load("Moscow").now(at).call().await {
    ///     Ok(data) => println!("{}", data.metrics.wind_speed),
    ///     Err(e) => println!("{}", e.user_message()),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[builder(start_fn = load)]
    #[doc(hidden)]
    pub async fn load_dashboard(
        &self,
        #[builder(start_fn)] address: &str,
        now: Option<DateTime<Utc>>,
    ) -> Result<DashboardData, DashboardError> {
        if address.trim().is_empty() {
            return Err(DashboardError::EmptyAddress);
        }
        let now = now.unwrap_or_else(Utc::now);

        let coordinate = self
            .geocoder
            .geocode(address)
            .await?
            .ok_or_else(|| DashboardError::NoResults(address.to_string()))?;

        let request = ForecastRequest::for_location(coordinate)
            .today(now.date_naive())
            .past_days(self.config.past_days)
            .forecast_days(self.config.forecast_days)
            .call();
        let forecast = self.fetcher.get_forecast(&request).await?;

        let table = build_table(&forecast)?;
        let local_now = local_time(now, forecast.utc_offset_seconds);
        let samples = select_samples(&table, local_now)?;
        let metrics = DashboardMetrics::from_samples(&forecast.current_weather, &samples);
        let current_index = samples.current_index;
        let aggregate = aggregate_by_hour(&table)?;

        info!(
            "Dashboard for '{}' at {}: {} hourly rows, current hour {}",
            address,
            coordinate,
            table.len(),
            samples.current.time_string()
        );

        Ok(DashboardData {
            address: address.to_string(),
            coordinate,
            request,
            current_weather: forecast.current_weather,
            timezone: forecast.timezone,
            local_time: local_now,
            table,
            current_index,
            metrics,
            aggregate,
        })
    }
}
