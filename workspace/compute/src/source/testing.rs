//! Fixtures shared by the source tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime, Timelike, Utc};
use common::{QueryScope, Reading, TimeWindow};
use migration::{Migrator, MigratorTrait};
use model::entities::weather_log;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use tokio::sync::Notify;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use super::{DatabaseGateway, LazyConnection, ReadingSource};
use crate::error::FetchError;

/// Logs to STDERR at the RUST_LOG level (WARN if unset) while the guard lives.
pub fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|level| level.parse::<Level>().ok())
        .unwrap_or(Level::WARN);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_default(subscriber)
}

/// Whole-second timestamp `hours` before now.
pub fn hours_ago(hours: i64) -> NaiveDateTime {
    let now = Utc::now().naive_utc();
    now.with_nanosecond(0).unwrap_or(now) - Duration::hours(hours)
}

pub async fn insert_reading(
    db: &DatabaseConnection,
    city: &str,
    recorded_at: NaiveDateTime,
    temperature: f64,
) -> weather_log::Model {
    weather_log::ActiveModel {
        recorded_at: Set(recorded_at),
        temperature: Set(temperature),
        city: Set(city.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert reading")
}

/// In-memory database with the schema applied, plus a gateway over it.
pub async fn migrated_gateway() -> (DatabaseConnection, DatabaseGateway) {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");
    Migrator::up(&db, None).await.expect("Migrations failed.");

    let gateway = DatabaseGateway::new(Arc::new(LazyConnection::from_connection(db.clone())));
    (db, gateway)
}

/// Gateway over an empty database without the `weather_logs` table.
pub async fn unmigrated_gateway() -> DatabaseGateway {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");
    DatabaseGateway::new(Arc::new(LazyConnection::from_connection(db)))
}

/// A source that returns canned rows and counts how often it was asked.
pub struct CountingSource {
    rows: Mutex<Option<Vec<Reading>>>,
    calls: AtomicUsize,
}

impl CountingSource {
    pub fn new(rows: Vec<Reading>) -> Self {
        Self {
            rows: Mutex::new(Some(rows)),
            calls: AtomicUsize::new(0),
        }
    }

    /// Every fetch fails with a connection error.
    pub fn failing() -> Self {
        Self {
            rows: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn replace(&self, rows: Vec<Reading>) {
        *self.rows.lock().unwrap() = Some(rows);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReadingSource for CountingSource {
    async fn fetch(
        &self,
        _scope: QueryScope,
        _window: Option<TimeWindow>,
    ) -> Result<Vec<Reading>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.rows
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| FetchError::Connection("connection refused".to_string()))
    }
}

/// A source whose first fetch reads its rows, then waits for [`GatedSource::release`].
pub struct GatedSource {
    rows: Mutex<Vec<Reading>>,
    calls: AtomicUsize,
    gated: AtomicBool,
    started: Notify,
    release: Notify,
}

impl GatedSource {
    pub fn new(rows: Vec<Reading>) -> Self {
        Self {
            rows: Mutex::new(rows),
            calls: AtomicUsize::new(0),
            gated: AtomicBool::new(true),
            started: Notify::new(),
            release: Notify::new(),
        }
    }

    /// Resolves once the gated fetch has read its rows.
    pub async fn started(&self) {
        self.started.notified().await;
    }

    pub fn release(&self) {
        self.release.notify_one();
    }

    pub fn replace(&self, rows: Vec<Reading>) {
        *self.rows.lock().unwrap() = rows;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReadingSource for GatedSource {
    async fn fetch(
        &self,
        _scope: QueryScope,
        _window: Option<TimeWindow>,
    ) -> Result<Vec<Reading>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let snapshot = self.rows.lock().unwrap().clone();

        if self.gated.swap(false, Ordering::SeqCst) {
            self.started.notify_one();
            self.release.notified().await;
        }
        Ok(snapshot)
    }
}
