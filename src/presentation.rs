//! Chart-ready frames for the dashboard widgets.
//!
//! Rendering is left to the front-end. These functions only cut the hourly
//! table and the hourly aggregate down to the columns each widget needs,
//! according to the user's sidebar choices in [`ViewOptions`].

use crate::table::aggregate::{HourlyAggregate, HOUR_INDEX_COLUMN};
use crate::table::error::TableError;
use crate::table::hourly_table::{HourlyTable, HOUR_COLUMN, TIME_COLUMN, WIND_SPEED_COLUMN};
use crate::types::hourly_variable::HourlyVariable;
use chrono::Datelike;
use polars::prelude::*;

pub const MIN_CHART_HEIGHT: u32 = 200;
pub const MAX_CHART_HEIGHT: u32 = 500;
pub const DEFAULT_CHART_HEIGHT: u32 = 250;

pub const DATE_COLUMN: &str = "date";
pub const DAY_OF_YEAR_COLUMN: &str = "day_of_year";

/// Variables that can color the heatmap or be drawn on the line chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChartVariable {
    #[default]
    RelativeHumidity,
    Temperature,
    Pressure,
    Precipitation,
    WindSpeed,
}

impl ChartVariable {
    pub const ALL: [ChartVariable; 5] = [
        ChartVariable::RelativeHumidity,
        ChartVariable::Temperature,
        ChartVariable::Pressure,
        ChartVariable::Precipitation,
        ChartVariable::WindSpeed,
    ];

    pub fn column_name(&self) -> &'static str {
        match self {
            ChartVariable::RelativeHumidity => HourlyVariable::RelativeHumidity2m.column_name(),
            ChartVariable::Temperature => HourlyVariable::Temperature2m.column_name(),
            ChartVariable::Pressure => HourlyVariable::PressureMsl.column_name(),
            ChartVariable::Precipitation => HourlyVariable::Precipitation.column_name(),
            ChartVariable::WindSpeed => WIND_SPEED_COLUMN,
        }
    }
}

/// Wind-speed height shown on the donut chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DonutVariable {
    #[default]
    WindSpeed10m,
    WindSpeed80m,
    WindSpeed120m,
    WindSpeed180m,
}

impl DonutVariable {
    pub fn column_name(&self) -> &'static str {
        let variable = match self {
            DonutVariable::WindSpeed10m => HourlyVariable::WindSpeed10m,
            DonutVariable::WindSpeed80m => HourlyVariable::WindSpeed80m,
            DonutVariable::WindSpeed120m => HourlyVariable::WindSpeed120m,
            DonutVariable::WindSpeed180m => HourlyVariable::WindSpeed180m,
        };
        variable.column_name()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineChartOptions {
    variables: Vec<ChartVariable>,
    height: u32,
}

impl LineChartOptions {
    /// `height` is clamped to `200..=500` pixels.
    pub fn new(variables: Vec<ChartVariable>, height: u32) -> Self {
        Self {
            variables,
            height: height.clamp(MIN_CHART_HEIGHT, MAX_CHART_HEIGHT),
        }
    }

    pub fn variables(&self) -> &[ChartVariable] {
        &self.variables
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl Default for LineChartOptions {
    fn default() -> Self {
        Self::new(vec![ChartVariable::Temperature], DEFAULT_CHART_HEIGHT)
    }
}

/// The sidebar state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewOptions {
    pub heatmap: ChartVariable,
    pub donut: DonutVariable,
    pub line_chart: LineChartOptions,
}

/// Heatmap cells: one per (date, hour), valued by the median of `variable`.
///
/// Columns: `date` (str, `YYYY-MM-DD`), `hour`, `day_of_year`, and the chosen
/// variable's column. Sorted by date, then hour.
///
/// # Errors
///
/// Returns [`TableError::DataFrameProcessing`] if any Polars step fails.
pub fn heatmap_frame(table: &HourlyTable, variable: ChartVariable) -> Result<DataFrame, TableError> {
    let value_column = variable.column_name();
    let mut frame = table.to_frame()?;

    let dates = table
        .rows()
        .iter()
        .map(|r| r.timestamp.date().format("%Y-%m-%d").to_string())
        .collect::<Vec<_>>();
    let days_of_year = table
        .rows()
        .iter()
        .map(|r| r.timestamp.ordinal() as i32)
        .collect::<Vec<_>>();
    frame.with_column(Column::new(DATE_COLUMN.into(), dates))?;
    frame.with_column(Column::new(DAY_OF_YEAR_COLUMN.into(), days_of_year))?;

    Ok(frame
        .lazy()
        .group_by([col(DATE_COLUMN), col(HOUR_COLUMN)])
        .agg([
            col(DAY_OF_YEAR_COLUMN).first(),
            col(value_column).median(),
        ])
        .sort([DATE_COLUMN, HOUR_COLUMN], SortMultipleOptions::default())
        .collect()?)
}

/// `hour_index` plus the chosen wind-speed mean, 24 rows.
///
/// # Errors
///
/// Returns [`TableError::ColumnNotFound`] if the aggregate lacks the column.
pub fn donut_frame(
    aggregate: &HourlyAggregate,
    variable: DonutVariable,
) -> Result<DataFrame, TableError> {
    let name = variable.column_name();
    aggregate
        .frame
        .select([HOUR_INDEX_COLUMN, name])
        .map_err(|e| TableError::ColumnNotFound(name.to_string(), e))
}

/// `time` plus each selected variable, one row per hour.
///
/// # Errors
///
/// Returns [`TableError::DataFrameProcessing`] if the frame cannot be built.
pub fn line_chart_frame(
    table: &HourlyTable,
    options: &LineChartOptions,
) -> Result<DataFrame, TableError> {
    let mut columns = vec![TIME_COLUMN];
    for variable in options.variables() {
        let name = variable.column_name();
        if !columns.contains(&name) {
            columns.push(name);
        }
    }
    Ok(table.to_frame()?.select(columns)?)
}
