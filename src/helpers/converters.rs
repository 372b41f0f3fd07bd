use common::{Chart, DashboardView, QueryScope, Reading, ViewStatus};
use compute::error::{FetchError, Result};
use compute::reshape::{reshape, single_series};
use compute::selector::Selection;
use tracing::debug;

use super::stats::latest_metrics;

fn title_for(scope: &QueryScope) -> String {
    match scope {
        QueryScope::SingleCity(city) => format!("{} Weather Tracker", city),
        QueryScope::AllCities => "City Comparison".to_string(),
    }
}

fn no_data_message(scope: &QueryScope) -> String {
    match scope {
        QueryScope::SingleCity(city) => {
            format!("No data found for {}. Run the ingestion job first!", city)
        }
        QueryScope::AllCities => "No data found for any city. Run the ingestion job first!".to_string(),
    }
}

fn unavailable_message(error: &FetchError) -> String {
    match error {
        FetchError::Connection(_) => "Could not reach the data source. Try again shortly.".to_string(),
        FetchError::Query(_) => "The data source rejected the query.".to_string(),
    }
}

/// Maps a fetch outcome onto the view a client renders.
///
/// Empty results and failed fetches end up in different states, so "no
/// data yet" and "data source down" read differently to the user. The only
/// error returned is a failure to reshape rows for the comparison chart.
pub fn build_dashboard_view(
    selection: &Selection,
    outcome: std::result::Result<Vec<Reading>, FetchError>,
    include_raw: bool,
) -> Result<DashboardView> {
    let scope = selection.scope;
    let title = title_for(&scope);

    let readings = match outcome {
        Ok(readings) => readings,
        Err(error) => {
            return Ok(DashboardView {
                title,
                scope,
                message: Some(unavailable_message(&error)),
                status: ViewStatus::Unavailable {
                    cause: error.to_string(),
                },
                metrics: None,
                chart: None,
                raw: None,
            });
        }
    };

    if readings.is_empty() {
        debug!("No readings for {:?}", scope);
        return Ok(DashboardView {
            title,
            scope,
            status: ViewStatus::NoData,
            message: Some(no_data_message(&scope)),
            metrics: None,
            chart: None,
            raw: include_raw.then(Vec::new),
        });
    }

    let chart = match scope {
        QueryScope::SingleCity(city) => Chart::Single {
            city,
            points: single_series(&readings),
        },
        QueryScope::AllCities => Chart::Comparison {
            table: reshape(&readings)?,
        },
    };

    Ok(DashboardView {
        title,
        scope,
        status: ViewStatus::Ready,
        message: None,
        metrics: latest_metrics(&readings),
        chart: Some(chart),
        raw: include_raw.then_some(readings),
    })
}
