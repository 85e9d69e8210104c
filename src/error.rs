use crate::forecast::error::ForecastError;
use crate::geocoding::error::GeocodeError;
use crate::table::error::{SelectionError, TableError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Address must not be empty")]
    EmptyAddress,

    #[error("No geocoding results for '{0}'")]
    NoResults(String),

    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    #[error(transparent)]
    Forecast(#[from] ForecastError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("Environment variable {0} with the geocoding API key is not set")]
    MissingApiKey(&'static str),

    #[error("Invalid value '{value}' for {key}")]
    InvalidConfig { key: &'static str, value: String },

    #[error("Failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
}

impl DashboardError {
    /// Short text a front-end can show in place of the dashboard.
    pub fn user_message(&self) -> &'static str {
        match self {
            DashboardError::EmptyAddress => "Enter an address",
            DashboardError::NoResults(_) => "No results found",
            DashboardError::Geocode(_) => "Geocoding service unreachable",
            DashboardError::Forecast(_) => "Weather service unreachable",
            DashboardError::Table(_) => "Weather data could not be read",
            DashboardError::Selection(SelectionError::NoCurrentData(_)) => {
                "No current data available"
            }
            DashboardError::Selection(SelectionError::NoPreviousSample(_)) => {
                "No data for the previous hour"
            }
            DashboardError::MissingApiKey(_)
            | DashboardError::InvalidConfig { .. }
            | DashboardError::HttpClient(_) => "Dashboard is not configured",
        }
    }

    /// Whether one of the external services failed, as opposed to answering with no data.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            DashboardError::Geocode(_) | DashboardError::Forecast(_)
        )
    }
}
