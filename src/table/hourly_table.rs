//! Reshapes the raw hourly forecast payload into a row-per-hour table.
//!
//! Row order is the order the service returned, chronological ascending.
//! [`crate::select_samples`] depends on it: the previous sample is simply the
//! row before the current one.

use crate::forecast::response::ForecastResponse;
use crate::table::error::TableError;
use crate::types::hourly_variable::HourlyVariable;
use chrono::{Datelike, NaiveDateTime, Timelike};
use polars::prelude::*;
use std::io::Write;

/// Format of the `time` entries in the forecast payload, e.g. `2024-03-10T14:00`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";

pub const TIME_COLUMN: &str = "time";
pub const DAY_COLUMN: &str = "day";
pub const HOUR_COLUMN: &str = "hour";
/// The 10 m wind speed under the name the metrics and the line chart use.
pub const WIND_SPEED_COLUMN: &str = "wind_speed";

/// One hour of forecast data.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyRow {
    pub timestamp: NaiveDateTime,
    /// Day of month, 1..=31.
    pub day: u32,
    /// Hour of day, 0..=23.
    pub hour: u32,
    pub relative_humidity: Option<f64>,
    pub temperature: Option<f64>,
    pub pressure: Option<f64>,
    pub precipitation: Option<f64>,
    pub wind_speed_10m: Option<f64>,
    pub wind_speed_80m: Option<f64>,
    pub wind_speed_120m: Option<f64>,
    pub wind_speed_180m: Option<f64>,
}

impl HourlyRow {
    /// The timestamp in the payload's own format.
    pub fn time_string(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Wind speed at 10 m, the one shown as "the" wind speed.
    pub fn wind_speed(&self) -> Option<f64> {
        self.wind_speed_10m
    }

    pub fn value(&self, variable: HourlyVariable) -> Option<f64> {
        match variable {
            HourlyVariable::RelativeHumidity2m => self.relative_humidity,
            HourlyVariable::Temperature2m => self.temperature,
            HourlyVariable::PressureMsl => self.pressure,
            HourlyVariable::Precipitation => self.precipitation,
            HourlyVariable::WindSpeed10m => self.wind_speed_10m,
            HourlyVariable::WindSpeed80m => self.wind_speed_80m,
            HourlyVariable::WindSpeed120m => self.wind_speed_120m,
            HourlyVariable::WindSpeed180m => self.wind_speed_180m,
        }
    }
}

/// Hourly rows in chronological order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HourlyTable {
    rows: Vec<HourlyRow>,
}

impl HourlyTable {
    pub fn rows(&self) -> &[HourlyRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&HourlyRow> {
        self.rows.get(index)
    }

    /// Converts the table into a Polars `DataFrame` for chart consumers.
    ///
    /// Columns, in order: `time` (str), `day` (i32), `hour` (i32),
    /// `relative_humidity`, `temperature`, `pressure`, `precipitation`,
    /// `wind_speed` (copy of the 10 m series), `wind_speed_10m`,
    /// `wind_speed_80m`, `wind_speed_120m`, `wind_speed_180m` (f64, nullable).
    ///
    /// # Errors
    ///
    /// Returns [`TableError::DataFrameProcessing`] if Polars rejects the columns.
    pub fn to_frame(&self) -> Result<DataFrame, TableError> {
        let mut columns = vec![
            Column::new(
                TIME_COLUMN.into(),
                self.rows.iter().map(HourlyRow::time_string).collect::<Vec<_>>(),
            ),
            Column::new(
                DAY_COLUMN.into(),
                self.rows.iter().map(|r| r.day as i32).collect::<Vec<_>>(),
            ),
            Column::new(
                HOUR_COLUMN.into(),
                self.rows.iter().map(|r| r.hour as i32).collect::<Vec<_>>(),
            ),
        ];

        for variable in HourlyVariable::ALL {
            if variable == HourlyVariable::WindSpeed10m {
                columns.push(self.float_column(WIND_SPEED_COLUMN, variable));
            }
            columns.push(self.float_column(variable.column_name(), variable));
        }

        Ok(DataFrame::new(columns)?)
    }

    fn float_column(&self, name: &str, variable: HourlyVariable) -> Column {
        Column::new(
            name.into(),
            self.rows
                .iter()
                .map(|r| r.value(variable))
                .collect::<Vec<Option<f64>>>(),
        )
    }

    /// Writes the table frame as CSV, with a header row.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::DataFrameProcessing`] if building the frame or writing fails.
    pub fn write_csv<W: Write>(&self, writer: &mut W) -> Result<(), TableError> {
        let mut frame = self.to_frame()?;
        CsvWriter::new(writer)
            .include_header(true)
            .finish(&mut frame)?;
        Ok(())
    }
}

fn series<'a>(
    column: &'static str,
    values: &'a [Option<f64>],
    expected: usize,
) -> Result<&'a [Option<f64>], TableError> {
    if values.len() != expected {
        return Err(TableError::LengthMismatch {
            column,
            expected,
            found: values.len(),
        });
    }
    Ok(values)
}

fn clean(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}

/// Builds one [`HourlyRow`] per entry of `hourly.time`, in payload order.
///
/// Day-of-month and hour-of-day come from a parsed timestamp, not from slicing
/// the string.
///
/// # Errors
///
/// * [`TableError::LengthMismatch`] if any value series is not as long as `time`.
/// * [`TableError::InvalidTimestamp`] if a `time` entry is not `YYYY-MM-DDTHH:MM`.
pub fn build_table(response: &ForecastResponse) -> Result<HourlyTable, TableError> {
    let hourly = &response.hourly;
    let n = hourly.time.len();

    let humidity = series("relativehumidity_2m", &hourly.relativehumidity_2m, n)?;
    let temperature = series("temperature_2m", &hourly.temperature_2m, n)?;
    let pressure = series("pressure_msl", &hourly.pressure_msl, n)?;
    let precipitation = series("precipitation", &hourly.precipitation, n)?;
    let wind_10 = series("windspeed_10m", &hourly.windspeed_10m, n)?;
    let wind_80 = series("windspeed_80m", &hourly.windspeed_80m, n)?;
    let wind_120 = series("windspeed_120m", &hourly.windspeed_120m, n)?;
    let wind_180 = series("windspeed_180m", &hourly.windspeed_180m, n)?;

    let rows = hourly
        .time
        .iter()
        .enumerate()
        .map(|(i, raw)| {
            let timestamp = NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
                .map_err(|e| TableError::InvalidTimestamp(raw.clone(), e))?;
            Ok(HourlyRow {
                timestamp,
                day: timestamp.day(),
                hour: timestamp.hour(),
                relative_humidity: clean(humidity[i]),
                temperature: clean(temperature[i]),
                pressure: clean(pressure[i]),
                precipitation: clean(precipitation[i]),
                wind_speed_10m: clean(wind_10[i]),
                wind_speed_80m: clean(wind_80[i]),
                wind_speed_120m: clean(wind_120[i]),
                wind_speed_180m: clean(wind_180[i]),
            })
        })
        .collect::<Result<Vec<_>, TableError>>()?;

    Ok(HourlyTable { rows })
}
