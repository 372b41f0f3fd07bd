use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use utoipa::ToSchema;

/// One timestamped temperature observation for a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Reading {
    /// When the observation was taken
    pub recorded_at: NaiveDateTime,
    /// Temperature in degrees Celsius
    pub temperature: f64,
    /// City display name
    pub city: String,
}

impl Reading {
    pub fn new(recorded_at: NaiveDateTime, temperature: f64, city: impl Into<String>) -> Self {
        Self {
            recorded_at,
            temperature,
            city: city.into(),
        }
    }
}

/// A point of a single-city temperature line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SeriesPoint {
    pub recorded_at: NaiveDateTime,
    pub temperature: f64,
}

/// Timestamp-keyed, city-columned table of averaged temperatures.
///
/// Cells are sparse: a city has no entry at a timestamp it has no reading for.
/// Rows are kept in ascending timestamp order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SeriesTable {
    #[schema(value_type = Object)]
    rows: BTreeMap<NaiveDateTime, BTreeMap<String, f64>>,
}

impl SeriesTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cell for `(recorded_at, city)`, replacing any previous value.
    pub fn insert(&mut self, recorded_at: NaiveDateTime, city: impl Into<String>, temperature: f64) {
        self.rows
            .entry(recorded_at)
            .or_default()
            .insert(city.into(), temperature);
    }

    pub fn get(&self, recorded_at: &NaiveDateTime, city: &str) -> Option<f64> {
        self.rows.get(recorded_at).and_then(|row| row.get(city)).copied()
    }

    /// All cells of one timestamp row.
    pub fn row(&self, recorded_at: &NaiveDateTime) -> Option<&BTreeMap<String, f64>> {
        self.rows.get(recorded_at)
    }

    /// Number of distinct timestamps.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Timestamps in ascending order.
    pub fn timestamps(&self) -> impl Iterator<Item = &NaiveDateTime> {
        self.rows.keys()
    }

    /// Every city that has at least one cell, sorted by name.
    pub fn cities(&self) -> BTreeSet<&str> {
        self.rows
            .values()
            .flat_map(|row| row.keys().map(String::as_str))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDateTime, &BTreeMap<String, f64>)> {
        self.rows.iter()
    }
}
