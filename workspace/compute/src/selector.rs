//! Maps a dashboard choice onto the query it needs.

use common::{City, QueryScope, TimeWindow};
use tracing::{debug, instrument};

use crate::error::SelectionError;

/// Raw choice coming from the city selector and the comparison toggle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionRequest {
    pub city: Option<String>,
    pub compare_all: bool,
    pub window_hours: Option<u32>,
}

/// A validated selection, ready to hand to a [`crate::source::ReadingSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selection {
    pub scope: QueryScope,
    pub window: Option<TimeWindow>,
}

/// Resolves a selector choice into a [`Selection`].
///
/// `compare_all` wins over any city. A missing or unknown city is
/// rejected rather than defaulted.
#[instrument(level = "debug")]
pub fn select(request: &SelectionRequest) -> Result<Selection, SelectionError> {
    let window = match request.window_hours {
        None => None,
        Some(hours) => Some(TimeWindow::from_hours(hours).ok_or_else(|| {
            SelectionError::InvalidSelection(format!(
                "window_hours must be between 1 and {}, got {}",
                TimeWindow::MAX_HOURS,
                hours
            ))
        })?),
    };

    let scope = if request.compare_all {
        QueryScope::AllCities
    } else {
        let name = request
            .city
            .as_deref()
            .ok_or_else(|| SelectionError::InvalidSelection("no city selected".to_string()))?;
        let city = name
            .parse::<City>()
            .map_err(|e| SelectionError::InvalidSelection(e.to_string()))?;
        QueryScope::SingleCity(city)
    };

    debug!(?scope, ?window, "Resolved dashboard selection");
    Ok(Selection { scope, window })
}
