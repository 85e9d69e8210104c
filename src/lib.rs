mod cache;
mod config;
mod dashboard;
mod error;
mod forecast;
mod geocoding;
mod presentation;
mod table;
mod types;

#[cfg(test)]
mod test_data;

pub use cache::MemoCache;
pub use config::*;
pub use dashboard::*;
pub use error::DashboardError;

pub use types::hourly_variable::HourlyVariable;
pub use types::lat_lon::LatLon;

pub use geocoding::error::GeocodeError;
pub use geocoding::geocoder::{GeocodeCache, Geocoder};

pub use forecast::error::ForecastError;
pub use forecast::fetcher::{ForecastCache, ForecastFetcher};
pub use forecast::request::{ForecastRequest, WindSpeedUnit};
pub use forecast::response::{CurrentWeather, ForecastResponse, HourlySeries};

pub use table::aggregate::*;
pub use table::error::{SelectionError, TableError};
pub use table::hourly_table::*;
pub use table::metrics::{DashboardMetrics, Metric};
pub use table::samples::*;

pub use presentation::*;
