//! Dummy data for local runs and tests.
//!
//! Rows use ids `1..=count` and `INSERT OR IGNORE`, so seeding an already
//! populated table is a no-op for existing ids.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rand::seq::IndexedRandom;
use rand::{Rng, RngCore};
use rusqlite::Connection;
use tracing::info;

use paddock_core::error::PaddockError;
use paddock_core::types::{Race, SportEvent};

const VENUES: &[&str] = &[
    "Flemington",
    "Randwick",
    "Caulfield",
    "Moonee Valley",
    "Eagle Farm",
    "Morphettville",
    "Ascot",
    "Rosehill",
];

const CITIES: &[&str] = &[
    "Adelaide", "Brisbane", "Geelong", "Hobart", "Melbourne", "Perth", "Sydney", "Darwin",
];

const MASCOTS: &[&str] = &[
    "Hawks", "Lions", "Cats", "Swans", "Eagles", "Tigers", "Dockers", "Giants",
];

/// Earliest seeded start, relative to now.
const START_WINDOW_BEFORE: i64 = 24 * 60 * 60;
/// Latest seeded start, relative to now.
const START_WINDOW_AFTER: i64 = 2 * 24 * 60 * 60;

/// Populates a domain table with `count` random rows.
pub trait SeedData {
    fn seed_rows(
        conn: &Connection,
        count: u32,
        now: DateTime<Utc>,
        rng: &mut dyn RngCore,
    ) -> Result<(), PaddockError>;
}

impl SeedData for Race {
    fn seed_rows(
        conn: &Connection,
        count: u32,
        now: DateTime<Utc>,
        rng: &mut dyn RngCore,
    ) -> Result<(), PaddockError> {
        let mut stmt = conn
            .prepare(
                "INSERT OR IGNORE INTO races
                    (id, meeting_id, name, number, visible, advertised_start_time)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )
            .map_err(|e| PaddockError::Storage(format!("Race seed prepare: {}", e)))?;

        for id in 1..=i64::from(count) {
            let number: i64 = rng.random_range(1..=12);
            let venue = pick(VENUES, rng);
            stmt.execute(rusqlite::params![
                id,
                rng.random_range(1..=10_i64),
                format!("{} R{}", venue, number),
                number,
                rng.random_range(0..=1_i64),
                format_start(random_start(now, rng)),
            ])
            .map_err(|e| PaddockError::Storage(format!("Race seed insert {}: {}", id, e)))?;
        }

        info!(count, "Seeded races");
        Ok(())
    }
}

impl SeedData for SportEvent {
    fn seed_rows(
        conn: &Connection,
        count: u32,
        now: DateTime<Utc>,
        rng: &mut dyn RngCore,
    ) -> Result<(), PaddockError> {
        let mut stmt = conn
            .prepare(
                "INSERT OR IGNORE INTO sports
                    (id, meeting_id, name, number, visible, home_team, away_team,
                     advertised_start_time, betting_closed_time)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )
            .map_err(|e| PaddockError::Storage(format!("Sports seed prepare: {}", e)))?;

        for id in 1..=i64::from(count) {
            let home = team_name(rng);
            let away = team_name(rng);
            let start = random_start(now, rng);
            let closes = start - Duration::minutes(rng.random_range(1..=15));
            stmt.execute(rusqlite::params![
                id,
                rng.random_range(1..=10_i64),
                format!("{} vs {}", home, away),
                rng.random_range(1..=12_i64),
                rng.random_range(0..=1_i64),
                home,
                away,
                format_start(start),
                format_start(closes),
            ])
            .map_err(|e| PaddockError::Storage(format!("Sports seed insert {}: {}", id, e)))?;
        }

        info!(count, "Seeded sports events");
        Ok(())
    }
}

fn pick(options: &[&'static str], rng: &mut dyn RngCore) -> &'static str {
    options.choose(&mut *rng).copied().unwrap_or("Unknown")
}

fn team_name(rng: &mut dyn RngCore) -> String {
    format!("{} {}", pick(CITIES, rng), pick(MASCOTS, rng))
}

fn random_start(now: DateTime<Utc>, rng: &mut dyn RngCore) -> DateTime<Utc> {
    now + Duration::seconds(rng.random_range(-START_WINDOW_BEFORE..=START_WINDOW_AFTER))
}

fn format_start(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}
