//! Turns flat reading rows into chart-ready series.

use chrono::DateTime;
use common::{Reading, SeriesPoint, SeriesTable};
use polars::prelude::*;
use tracing::{debug, instrument, trace};

use crate::error::{ComputeError, Result};

const RECORDED_AT: &str = "recorded_at";
const CITY: &str = "city";
const TEMPERATURE: &str = "temperature";

/// Pivots readings into a timestamp x city table.
///
/// Readings sharing the exact same `recorded_at` and `city` collapse into one
/// cell holding the arithmetic mean of their temperatures. Timestamps are
/// grouped at nanosecond precision, so a cell key is always one of the input
/// `recorded_at` values. The result does not depend on the order of
/// `readings`. Timestamps outside the years 1677..=2262 are rejected.
#[instrument(skip(readings), fields(num_readings = readings.len()))]
pub fn reshape(readings: &[Reading]) -> Result<SeriesTable> {
    if readings.is_empty() {
        debug!("No readings to reshape, returning empty table");
        return Ok(SeriesTable::new());
    }

    // A canonical row order keeps floating point sums identical for any
    // permutation of the same readings.
    let mut sorted: Vec<&Reading> = readings.iter().collect();
    sorted.sort_by(|a, b| {
        a.recorded_at
            .cmp(&b.recorded_at)
            .then_with(|| a.city.cmp(&b.city))
            .then_with(|| a.temperature.total_cmp(&b.temperature))
    });

    let stamps: Vec<i64> = sorted
        .iter()
        .map(|r| {
            r.recorded_at.and_utc().timestamp_nanos_opt().ok_or_else(|| {
                ComputeError::DataFrame(format!("Timestamp out of range: {}", r.recorded_at))
            })
        })
        .collect::<Result<_>>()?;
    let cities: Vec<&str> = sorted.iter().map(|r| r.city.as_str()).collect();
    let temperatures: Vec<f64> = sorted.iter().map(|r| r.temperature).collect();

    let df = df!(
        RECORDED_AT => stamps,
        CITY => cities,
        TEMPERATURE => temperatures
    )?;

    let grouped = df
        .lazy()
        .group_by_stable([col(RECORDED_AT), col(CITY)])
        .agg([col(TEMPERATURE).mean()])
        .collect()?;
    trace!("Grouped {} readings into {} cells", readings.len(), grouped.height());

    let stamps = grouped.column(RECORDED_AT)?.as_materialized_series().i64()?;
    let cities = grouped.column(CITY)?.as_materialized_series().str()?;
    let means = grouped.column(TEMPERATURE)?.as_materialized_series().f64()?;

    let mut table = SeriesTable::new();
    for ((stamp, city), mean) in stamps.into_iter().zip(cities.into_iter()).zip(means.into_iter()) {
        let (Some(stamp), Some(city), Some(mean)) = (stamp, city, mean) else {
            return Err(ComputeError::DataFrame(
                "Null cell in grouped readings".to_string(),
            ));
        };
        let recorded_at = DateTime::from_timestamp_nanos(stamp).naive_utc();
        table.insert(recorded_at, city, mean);
    }

    debug!("Reshaped into {} timestamps", table.len());
    Ok(table)
}

/// One line for a single city, oldest point first.
pub fn single_series(readings: &[Reading]) -> Vec<SeriesPoint> {
    let mut points: Vec<SeriesPoint> = readings
        .iter()
        .map(|r| SeriesPoint {
            recorded_at: r.recorded_at,
            temperature: r.temperature,
        })
        .collect();
    points.sort_by_key(|p| p.recorded_at);
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn t(minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 7, 14)
            .unwrap()
            .and_hms_opt(12, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_duplicates_are_averaged() {
        let readings = vec![
            Reading::new(t(0), 10.0, "London"),
            Reading::new(t(0), 12.0, "London"),
        ];

        let table = reshape(&readings).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&t(0), "London"), Some(11.0));
    }

    #[test]
    fn test_single_reading_keeps_its_value() {
        let table = reshape(&[Reading::new(t(5), 17.25, "Kolkata")]).unwrap();
        assert_eq!(table.get(&t(5), "Kolkata"), Some(17.25));
    }

    #[test]
    fn test_empty_input_gives_empty_table() {
        let table = reshape(&[]).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_cells_are_sparse() {
        let readings = vec![
            Reading::new(t(0), 15.0, "Tokyo"),
            Reading::new(t(1), 31.0, "Cairo"),
        ];

        let table = reshape(&readings).unwrap();
        assert_eq!(table.get(&t(0), "Tokyo"), Some(15.0));
        assert_eq!(table.get(&t(0), "Cairo"), None);
        assert_eq!(table.get(&t(1), "Cairo"), Some(31.0));
        assert_eq!(table.row(&t(1)).map(|row| row.len()), Some(1));
    }

    #[test]
    fn test_same_timestamp_different_cities_stay_apart() {
        let readings = vec![
            Reading::new(t(0), 10.0, "London"),
            Reading::new(t(0), 30.0, "Cairo"),
            Reading::new(t(0), 14.0, "London"),
        ];

        let table = reshape(&readings).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&t(0), "London"), Some(12.0));
        assert_eq!(table.get(&t(0), "Cairo"), Some(30.0));
    }

    #[test]
    fn test_reshape_is_order_independent() {
        let readings = vec![
            Reading::new(t(0), 10.1, "London"),
            Reading::new(t(0), 12.7, "London"),
            Reading::new(t(0), 9.3, "London"),
            Reading::new(t(2), 28.4, "Cairo"),
            Reading::new(t(2), 29.9, "Cairo"),
            Reading::new(t(1), 16.0, "Tokyo"),
        ];
        let expected = reshape(&readings).unwrap();

        let mut reversed = readings.clone();
        reversed.reverse();
        assert_eq!(reshape(&reversed).unwrap(), expected);

        let mut rotated = readings.clone();
        rotated.rotate_left(2);
        assert_eq!(reshape(&rotated).unwrap(), expected);

        let mut swapped = readings.clone();
        swapped.swap(0, 4);
        swapped.swap(1, 3);
        assert_eq!(reshape(&swapped).unwrap(), expected);
    }

    #[test]
    fn test_tokyo_and_cairo_comparison() {
        let readings = vec![
            Reading::new(t(0), 15.0, "Tokyo"),
            Reading::new(t(10), 16.0, "Tokyo"),
            Reading::new(t(20), 17.0, "Tokyo"),
            Reading::new(t(30), 20.0, "Cairo"),
            Reading::new(t(30), 24.0, "Cairo"),
        ];

        let table = reshape(&readings).unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table.get(&t(30), "Cairo"), Some(22.0));
        assert_eq!(table.get(&t(10), "Tokyo"), Some(16.0));
        assert_eq!(table.cities().into_iter().collect::<Vec<_>>(), vec!["Cairo", "Tokyo"]);
    }

    #[test]
    fn test_sub_second_timestamps_survive() {
        let precise = t(0) + chrono::Duration::nanoseconds(123_456_789);
        let table = reshape(&[Reading::new(precise, 5.0, "London")]).unwrap();
        assert_eq!(table.timestamps().next(), Some(&precise));
    }

    #[test]
    fn test_timestamps_within_one_microsecond_stay_apart() {
        let first = t(0) + chrono::Duration::nanoseconds(1_000_100);
        let second = t(0) + chrono::Duration::nanoseconds(1_000_900);
        let readings = vec![
            Reading::new(first, 10.0, "London"),
            Reading::new(second, 14.0, "London"),
        ];

        let table = reshape(&readings).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&first, "London"), Some(10.0));
        assert_eq!(table.get(&second, "London"), Some(14.0));
    }

    #[test]
    fn test_out_of_range_timestamp_is_an_error() {
        let far = NaiveDate::from_ymd_opt(2500, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let result = reshape(&[Reading::new(far, 1.0, "Cairo")]);
        assert!(matches!(result, Err(ComputeError::DataFrame(_))));
    }

    #[test]
    fn test_single_series_is_ascending() {
        let readings = vec![
            Reading::new(t(20), 17.0, "Tokyo"),
            Reading::new(t(0), 15.0, "Tokyo"),
            Reading::new(t(10), 16.0, "Tokyo"),
        ];

        let points = single_series(&readings);
        let temps: Vec<f64> = points.iter().map(|p| p.temperature).collect();
        assert_eq!(temps, vec![15.0, 16.0, 17.0]);
    }
}
