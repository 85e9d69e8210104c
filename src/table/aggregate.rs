//! Per-hour-of-day averages of the wind-speed series, used by the donut chart.

use crate::table::error::TableError;
use crate::table::hourly_table::{HourlyTable, HOUR_COLUMN};
use crate::types::hourly_variable::HourlyVariable;
use polars::prelude::*;

pub const HOUR_INDEX_COLUMN: &str = "hour_index";
pub const HOURS_PER_DAY: i32 = 24;

/// One hour-of-day bucket of the aggregate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyAggregateRow {
    pub hour: u32,
    pub wind_speed_10m: f64,
    pub wind_speed_80m: f64,
    pub wind_speed_120m: f64,
    pub wind_speed_180m: f64,
    pub hour_index: u32,
}

/// A 24-row frame: `hour`, the four wind-speed means, and `hour_index`.
///
/// Rows are ordered by hour 0..=23. Hours without any data carry `0.0` in every
/// wind column rather than being left out.
#[derive(Debug, Clone)]
pub struct HourlyAggregate {
    pub frame: DataFrame,
}

impl HourlyAggregate {
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Reads the frame back into typed rows.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::ColumnNotFound`] if an expected column is absent
    /// and [`TableError::DataFrameProcessing`] if a column has an unexpected type.
    pub fn rows(&self) -> Result<Vec<HourlyAggregateRow>, TableError> {
        macro_rules! get_column {
            ($name:expr) => {
                self.frame
                    .column($name)
                    .map_err(|e| TableError::ColumnNotFound($name.to_string(), e))?
            };
        }

        let hours = get_column!(HOUR_COLUMN).i32()?;
        let indices = get_column!(HOUR_INDEX_COLUMN).i32()?;
        let w10 = get_column!(HourlyVariable::WindSpeed10m.column_name()).f64()?;
        let w80 = get_column!(HourlyVariable::WindSpeed80m.column_name()).f64()?;
        let w120 = get_column!(HourlyVariable::WindSpeed120m.column_name()).f64()?;
        let w180 = get_column!(HourlyVariable::WindSpeed180m.column_name()).f64()?;

        Ok((0..self.frame.height())
            .map(|i| HourlyAggregateRow {
                hour: hours.get(i).unwrap_or_default() as u32,
                wind_speed_10m: w10.get(i).unwrap_or_default(),
                wind_speed_80m: w80.get(i).unwrap_or_default(),
                wind_speed_120m: w120.get(i).unwrap_or_default(),
                wind_speed_180m: w180.get(i).unwrap_or_default(),
                hour_index: indices.get(i).unwrap_or_default() as u32,
            })
            .collect())
    }
}

/// Groups the table by hour of day and averages each wind-speed height.
///
/// Means ignore missing values. A left join from the full 0..=23 hour range
/// keeps every hour, and hours with nothing to average are filled with zero.
///
/// # Errors
///
/// Returns [`TableError::DataFrameProcessing`] if any Polars step fails.
pub fn aggregate_by_hour(table: &HourlyTable) -> Result<HourlyAggregate, TableError> {
    let wind_columns: Vec<&str> = HourlyVariable::WIND_SPEEDS
        .iter()
        .map(HourlyVariable::column_name)
        .collect();

    let means = table
        .to_frame()?
        .lazy()
        .group_by([col(HOUR_COLUMN)])
        .agg(
            wind_columns
                .iter()
                .map(|name| col(*name).mean())
                .collect::<Vec<_>>(),
        );

    let all_hours = DataFrame::new(vec![Column::new(
        HOUR_COLUMN.into(),
        (0..HOURS_PER_DAY).collect::<Vec<i32>>(),
    )])?;

    let frame = all_hours
        .lazy()
        .join(
            means,
            [col(HOUR_COLUMN)],
            [col(HOUR_COLUMN)],
            JoinArgs::new(JoinType::Left),
        )
        .with_columns(
            wind_columns
                .iter()
                .map(|name| col(*name).fill_null(lit(0.0)))
                .collect::<Vec<_>>(),
        )
        .sort([HOUR_COLUMN], SortMultipleOptions::default())
        .with_column(col(HOUR_COLUMN).alias(HOUR_INDEX_COLUMN))
        .collect()?;

    Ok(HourlyAggregate { frame })
}
