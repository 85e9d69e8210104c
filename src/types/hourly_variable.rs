//! Defines the hourly forecast variables requested from the forecast service
//! and the table columns they populate.

use std::fmt;

/// One of the hourly series the dashboard requests.
///
/// The variants are listed in request order; [`HourlyVariable::ALL`] is the
/// exact list sent as the comma-joined `hourly` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HourlyVariable {
    /// Relative humidity at 2 m, percent.
    RelativeHumidity2m,
    /// Air temperature at 2 m, °C.
    Temperature2m,
    /// Pressure reduced to mean sea level, hPa.
    PressureMsl,
    /// Total precipitation of the preceding hour, mm.
    Precipitation,
    /// Wind speed at 10 m above ground.
    WindSpeed10m,
    /// Wind speed at 80 m above ground.
    WindSpeed80m,
    /// Wind speed at 120 m above ground.
    WindSpeed120m,
    /// Wind speed at 180 m above ground.
    WindSpeed180m,
}

impl HourlyVariable {
    pub const ALL: [HourlyVariable; 8] = [
        HourlyVariable::RelativeHumidity2m,
        HourlyVariable::Temperature2m,
        HourlyVariable::PressureMsl,
        HourlyVariable::Precipitation,
        HourlyVariable::WindSpeed10m,
        HourlyVariable::WindSpeed80m,
        HourlyVariable::WindSpeed120m,
        HourlyVariable::WindSpeed180m,
    ];

    /// The four wind-speed heights, lowest first.
    pub const WIND_SPEEDS: [HourlyVariable; 4] = [
        HourlyVariable::WindSpeed10m,
        HourlyVariable::WindSpeed80m,
        HourlyVariable::WindSpeed120m,
        HourlyVariable::WindSpeed180m,
    ];

    /// Name of the variable as understood by the forecast service.
    pub fn api_name(&self) -> &'static str {
        match self {
            HourlyVariable::RelativeHumidity2m => "relativehumidity_2m",
            HourlyVariable::Temperature2m => "temperature_2m",
            HourlyVariable::PressureMsl => "pressure_msl",
            HourlyVariable::Precipitation => "precipitation",
            HourlyVariable::WindSpeed10m => "windspeed_10m",
            HourlyVariable::WindSpeed80m => "windspeed_80m",
            HourlyVariable::WindSpeed120m => "windspeed_120m",
            HourlyVariable::WindSpeed180m => "windspeed_180m",
        }
    }

    /// Name of the column holding this variable in the hourly table frame.
    pub fn column_name(&self) -> &'static str {
        match self {
            HourlyVariable::RelativeHumidity2m => "relative_humidity",
            HourlyVariable::Temperature2m => "temperature",
            HourlyVariable::PressureMsl => "pressure",
            HourlyVariable::Precipitation => "precipitation",
            HourlyVariable::WindSpeed10m => "wind_speed_10m",
            HourlyVariable::WindSpeed80m => "wind_speed_80m",
            HourlyVariable::WindSpeed120m => "wind_speed_120m",
            HourlyVariable::WindSpeed180m => "wind_speed_180m",
        }
    }

    /// The comma-joined list of all variables, as sent in the `hourly` parameter.
    pub(crate) fn query_list() -> String {
        HourlyVariable::ALL
            .iter()
            .map(HourlyVariable::api_name)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Allows formatting a `HourlyVariable` using its API name.
///
/// # Examples
///
/// ```
/// use meteodash::HourlyVariable;
///
/// assert_eq!(HourlyVariable::PressureMsl.to_string(), "pressure_msl");
/// ```
impl fmt::Display for HourlyVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.api_name())
    }
}
