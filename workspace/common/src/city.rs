use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;

/// Cities the ingestion job collects readings for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum City {
    London,
    #[serde(rename = "New York")]
    NewYork,
    Tokyo,
    Kolkata,
    #[serde(rename = "New Delhi")]
    NewDelhi,
    Cairo,
}

/// Returned when a city name is not one of [`City::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown city '{0}'")]
pub struct UnknownCity(pub String);

impl City {
    /// Every selectable city, in the order the selector lists them.
    pub const ALL: [City; 6] = [
        City::London,
        City::NewYork,
        City::Tokyo,
        City::Kolkata,
        City::NewDelhi,
        City::Cairo,
    ];

    /// Name as stored in the `city` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            City::London => "London",
            City::NewYork => "New York",
            City::Tokyo => "Tokyo",
            City::Kolkata => "Kolkata",
            City::NewDelhi => "New Delhi",
            City::Cairo => "Cairo",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for City {
    type Err = UnknownCity;

    /// Matches the display name ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        City::ALL
            .into_iter()
            .find(|city| city.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCity(s.to_string()))
    }
}

/// Which rows a dashboard query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", content = "city", rename_all = "snake_case")]
pub enum QueryScope {
    /// Readings for one city.
    SingleCity(City),
    /// Readings across every city, for the comparison view.
    AllCities,
}

impl QueryScope {
    /// Rows fetched for a single city.
    pub const SINGLE_CITY_LIMIT: u64 = 50;
    /// Rows fetched for the comparison view. The cap is on shared history,
    /// not per city.
    pub const ALL_CITIES_LIMIT: u64 = 200;

    pub fn row_limit(&self) -> u64 {
        match self {
            QueryScope::SingleCity(_) => Self::SINGLE_CITY_LIMIT,
            QueryScope::AllCities => Self::ALL_CITIES_LIMIT,
        }
    }

    pub fn city(&self) -> Option<City> {
        match self {
            QueryScope::SingleCity(city) => Some(*city),
            QueryScope::AllCities => None,
        }
    }
}

/// Look-back window applied on top of a [`QueryScope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct TimeWindow {
    /// Hours before now, between 1 and [`TimeWindow::MAX_HOURS`].
    hours: u32,
}

impl TimeWindow {
    /// One year.
    pub const MAX_HOURS: u32 = 24 * 365;

    pub fn from_hours(hours: u32) -> Option<Self> {
        (1..=Self::MAX_HOURS)
            .contains(&hours)
            .then_some(Self { hours })
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }

    pub fn duration(&self) -> chrono::Duration {
        chrono::Duration::hours(i64::from(self.hours))
    }
}
