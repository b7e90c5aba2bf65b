//! Row mapper: scans result rows into entities and derives their status.
//!
//! Columns are read by position, in the order the templates in
//! [`crate::queries`] select them. The status compares the advertised start
//! against `clock.now()`, sampled once per row.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use rusqlite::types::{FromSql, ValueRef};
use rusqlite::Row;

use paddock_core::clock::Clock;
use paddock_core::error::PaddockError;
use paddock_core::types::{EntityStatus, Race, SportEvent, Timestamp};

/// Naive layouts SQLite itself produces; read as UTC.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Materializes one entity from one result row.
pub trait FromRow: Sized {
    fn from_row(row: &Row<'_>, clock: &dyn Clock) -> Result<Self, PaddockError>;
}

impl FromRow for Race {
    fn from_row(row: &Row<'_>, clock: &dyn Clock) -> Result<Self, PaddockError> {
        let (advertised_start_time, status) = start_and_status(row, 5, clock)?;

        Ok(Race {
            id: column(row, 0, "id")?,
            meeting_id: column(row, 1, "meeting_id")?,
            name: column(row, 2, "name")?,
            number: column(row, 3, "number")?,
            visible: column(row, 4, "visible")?,
            advertised_start_time,
            status,
        })
    }
}

impl FromRow for SportEvent {
    fn from_row(row: &Row<'_>, clock: &dyn Clock) -> Result<Self, PaddockError> {
        let (advertised_start_time, status) = start_and_status(row, 7, clock)?;

        let betting_closed = row
            .get_ref(8)
            .map_err(|e| scan_error("betting_closed_time", e))?;
        let betting_closed_time = match betting_closed {
            ValueRef::Null => None,
            value => Some(Timestamp::try_from(parse_stored_timestamp(value)?)?),
        };

        Ok(SportEvent {
            id: column(row, 0, "id")?,
            meeting_id: column(row, 1, "meeting_id")?,
            name: column(row, 2, "name")?,
            number: column(row, 3, "number")?,
            visible: column(row, 4, "visible")?,
            home_team: column(row, 5, "home_team")?,
            away_team: column(row, 6, "away_team")?,
            advertised_start_time,
            betting_closed_time,
            status,
        })
    }
}

fn column<T: FromSql>(row: &Row<'_>, idx: usize, name: &str) -> Result<T, PaddockError> {
    row.get(idx).map_err(|e| scan_error(name, e))
}

fn scan_error(name: &str, e: rusqlite::Error) -> PaddockError {
    PaddockError::Mapping(format!("Failed to scan column {}: {}", name, e))
}

/// Read the advertised start, convert it to a wire timestamp, and derive
/// the status against a fresh `now`.
fn start_and_status(
    row: &Row<'_>,
    idx: usize,
    clock: &dyn Clock,
) -> Result<(Timestamp, EntityStatus), PaddockError> {
    let value = row
        .get_ref(idx)
        .map_err(|e| scan_error("advertised_start_time", e))?;
    let start = parse_stored_timestamp(value)?;
    let timestamp = Timestamp::try_from(start)?;
    let status = EntityStatus::derive(start, clock.now());
    Ok((timestamp, status))
}

/// Parse a stored DATETIME value into a UTC instant.
///
/// Accepts RFC 3339 text (any offset), SQLite's naive `YYYY-MM-DD HH:MM:SS`
/// text taken as UTC, and integer Unix seconds.
pub fn parse_stored_timestamp(value: ValueRef<'_>) -> Result<DateTime<Utc>, PaddockError> {
    match value {
        ValueRef::Text(bytes) => {
            let text = std::str::from_utf8(bytes)
                .map_err(|e| PaddockError::Mapping(format!("Timestamp is not UTF-8: {}", e)))?;
            parse_timestamp_text(text)
        }
        ValueRef::Integer(secs) => Utc.timestamp_opt(secs, 0).single().ok_or_else(|| {
            PaddockError::Mapping(format!("Unix timestamp {} out of range", secs))
        }),
        ValueRef::Null => Err(PaddockError::Mapping("Timestamp is NULL".to_string())),
        other => Err(PaddockError::Mapping(format!(
            "Unsupported timestamp storage type: {:?}",
            other.data_type()
        ))),
    }
}

fn parse_timestamp_text(text: &str) -> Result<DateTime<Utc>, PaddockError> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(naive.and_utc());
        }
    }
    Err(PaddockError::Mapping(format!("Invalid timestamp: {:?}", text)))
}
