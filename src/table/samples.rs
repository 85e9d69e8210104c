//! Locates the row for the current hour and the row just before it.

use crate::table::error::SelectionError;
use crate::table::hourly_table::{HourlyRow, HourlyTable};
use chrono::{DateTime, FixedOffset, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Utc};
use log::warn;

/// The current-hour row and its predecessor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePair<'a> {
    pub current: &'a HourlyRow,
    pub previous: &'a HourlyRow,
    /// Position of `current` in the table; `previous` sits at `current_index - 1`.
    pub current_index: usize,
}

/// Drops minutes, seconds and sub-seconds.
pub fn truncate_to_hour(datetime: NaiveDateTime) -> NaiveDateTime {
    datetime.date().and_time(NaiveTime::MIN) + TimeDelta::hours(i64::from(datetime.hour()))
}

/// Wall-clock time at a location `utc_offset_seconds` away from UTC.
///
/// Forecast timestamps are local to the forecast location, so this is the
/// time to pass to [`select_samples`]. An out-of-range offset falls back to UTC.
pub fn local_time(now: DateTime<Utc>, utc_offset_seconds: i32) -> NaiveDateTime {
    match FixedOffset::east_opt(utc_offset_seconds) {
        Some(offset) => now.with_timezone(&offset).naive_local(),
        None => {
            warn!(
                "Ignoring invalid UTC offset of {} seconds, using UTC",
                utc_offset_seconds
            );
            now.naive_utc()
        }
    }
}

/// Finds the row stamped with `now` truncated to the hour, and the row before it.
///
/// If several rows carry the same timestamp the first one is used.
///
/// # Errors
///
/// * [`SelectionError::NoCurrentData`] if no row matches the truncated hour.
/// * [`SelectionError::NoPreviousSample`] if the matching row is the first row,
///   since there is then no previous hour to compute deltas against.
pub fn select_samples(
    table: &HourlyTable,
    now: NaiveDateTime,
) -> Result<SamplePair<'_>, SelectionError> {
    let hour = truncate_to_hour(now);
    let rows = table.rows();

    let current_index = rows
        .iter()
        .position(|row| row.timestamp == hour)
        .ok_or(SelectionError::NoCurrentData(hour))?;
    let previous_index = current_index
        .checked_sub(1)
        .ok_or(SelectionError::NoPreviousSample(hour))?;

    Ok(SamplePair {
        current: &rows[current_index],
        previous: &rows[previous_index],
        current_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::hourly_table::build_table;
    use crate::test_data::{forecast_response, hour_at};
    use chrono::TimeZone;

    fn table() -> HourlyTable {
        build_table(&forecast_response(hour_at(2024, 3, 9, 0), 16 * 24)).unwrap()
    }

    #[test]
    fn test_truncate_to_hour() {
        let now = hour_at(2024, 3, 10, 14) + TimeDelta::seconds(37 * 60 + 12);
        assert_eq!(truncate_to_hour(now), hour_at(2024, 3, 10, 14));
        assert_eq!(truncate_to_hour(hour_at(2024, 3, 10, 0)), hour_at(2024, 3, 10, 0));
    }

    #[test]
    fn test_selects_current_and_previous() -> Result<(), SelectionError> {
        let table = table();
        let now = hour_at(2024, 3, 10, 14) + TimeDelta::minutes(42);

        let samples = select_samples(&table, now)?;
        assert_eq!(samples.current.timestamp, hour_at(2024, 3, 10, 14));
        assert_eq!(samples.current_index, 24 + 14);
        assert_eq!(samples.previous, &table.rows()[samples.current_index - 1]);
        assert_eq!(samples.previous.timestamp, hour_at(2024, 3, 10, 13));
        Ok(())
    }

    #[test]
    fn test_previous_crosses_midnight() -> Result<(), SelectionError> {
        let table = table();
        let samples = select_samples(&table, hour_at(2024, 3, 11, 0))?;
        assert_eq!(samples.previous.timestamp, hour_at(2024, 3, 10, 23));
        Ok(())
    }

    #[test]
    fn test_hour_outside_table_is_no_current_data() {
        let table = table();
        let result = select_samples(&table, hour_at(2030, 1, 1, 5));
        assert_eq!(
            result,
            Err(SelectionError::NoCurrentData(hour_at(2030, 1, 1, 5)))
        );
    }

    #[test]
    fn test_first_row_has_no_previous() {
        let table = table();
        let result = select_samples(&table, hour_at(2024, 3, 9, 0) + TimeDelta::minutes(5));
        assert_eq!(
            result,
            Err(SelectionError::NoPreviousSample(hour_at(2024, 3, 9, 0)))
        );
    }

    #[test]
    fn test_empty_table() {
        let empty = HourlyTable::default();
        let result = select_samples(&empty, hour_at(2024, 3, 9, 3));
        assert!(matches!(result, Err(SelectionError::NoCurrentData(_))));
    }

    #[test]
    fn test_local_time_applies_offset() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 22, 30, 0).unwrap();
        assert_eq!(
            truncate_to_hour(local_time(now, 3 * 3600)),
            hour_at(2024, 3, 11, 1)
        );
        assert_eq!(
            truncate_to_hour(local_time(now, -5 * 3600)),
            hour_at(2024, 3, 10, 17)
        );
        assert_eq!(local_time(now, 999_999), now.naive_utc());
    }
}
