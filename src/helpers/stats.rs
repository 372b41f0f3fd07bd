use common::{Metrics, Reading};

/// Headline figures for a set of readings: the newest temperature, when it
/// was logged (HH:MM), and how many rows were fetched.
///
/// On a timestamp tie the earliest row in `readings` wins, which for a
/// gateway result is the newest insert. Returns `None` for an empty set.
pub fn latest_metrics(readings: &[Reading]) -> Option<Metrics> {
    let latest = readings
        .iter()
        .reduce(|best, r| if r.recorded_at > best.recorded_at { r } else { best })?;

    Some(Metrics {
        current_temperature: latest.temperature,
        current_temperature_label: format!("{:.1} °C", latest.temperature),
        last_updated_at: latest.recorded_at,
        last_updated: latest.recorded_at.format("%H:%M").to_string(),
        data_points: readings.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_latest_metrics_uses_newest_reading() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        let readings = vec![
            Reading::new(day.and_hms_opt(8, 5, 59).unwrap(), 3.0, "London"),
            Reading::new(day.and_hms_opt(14, 7, 12).unwrap(), 7.3, "London"),
            Reading::new(day.and_hms_opt(11, 0, 0).unwrap(), 5.5, "London"),
        ];

        let metrics = latest_metrics(&readings).unwrap();
        assert_eq!(metrics.current_temperature, 7.3);
        assert_eq!(metrics.current_temperature_label, "7.3 °C");
        assert_eq!(metrics.last_updated, "14:07");
        assert_eq!(metrics.data_points, 3);
    }

    #[test]
    fn test_latest_metrics_tie_keeps_first_fetched_row() {
        let at = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap().and_hms_opt(9, 30, 0).unwrap();
        let earlier = at - chrono::Duration::hours(1);
        let readings = vec![
            Reading::new(at, 24.0, "Cairo"),
            Reading::new(at, 20.0, "Cairo"),
            Reading::new(earlier, 18.0, "Cairo"),
        ];

        let metrics = latest_metrics(&readings).unwrap();
        assert_eq!(metrics.current_temperature, 24.0);
        assert_eq!(metrics.last_updated, "09:30");
    }

    #[test]
    fn test_latest_metrics_empty() {
        assert!(latest_metrics(&[]).is_none());
    }
}
