use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PaddockError, Result};

// =============================================================================
// Request values
// =============================================================================

/// Restricts which entities a listing returns.
///
/// An empty `meeting_ids` list and a `None` visibility both mean "no
/// constraint on that dimension".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFilter {
    /// Inclusion list of meeting identifiers.
    #[serde(default)]
    pub meeting_ids: Vec<i64>,
    /// Only return entities whose `visible` flag equals this value.
    #[serde(default)]
    pub visible: Option<bool>,
}

impl ListFilter {
    pub fn meetings(ids: impl Into<Vec<i64>>) -> Self {
        Self {
            meeting_ids: ids.into(),
            visible: None,
        }
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }
}

/// Sort direction for a single order-by field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    /// The SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// One sort directive: a column name and a direction.
///
/// The field name is passed to the store verbatim. It is never validated
/// locally, so it must come from a trusted caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderByField {
    pub field: String,
    #[serde(default)]
    pub direction: Direction,
}

impl OrderByField {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Desc,
        }
    }
}

/// Ordered list of sort directives, applied left to right as a tie-break chain.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    #[serde(default)]
    pub fields: Vec<OrderByField>,
}

impl OrderBy {
    pub fn new(fields: impl Into<Vec<OrderByField>>) -> Self {
        Self {
            fields: fields.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// =============================================================================
// Derived status
// =============================================================================

/// Whether an entity is still open for betting, derived at read time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityStatus {
    Open,
    Closed,
}

impl EntityStatus {
    /// `Open` when `start` is at or after `now`, `Closed` otherwise.
    pub fn derive(start: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if start >= now {
            EntityStatus::Open
        } else {
            EntityStatus::Closed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityStatus::Open => "OPEN",
            EntityStatus::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for EntityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Protocol timestamp
// =============================================================================

/// Smallest representable instant, 0001-01-01T00:00:00Z.
const MIN_TIMESTAMP_SECONDS: i64 = -62_135_596_800;
/// Largest representable instant, 9999-12-31T23:59:59Z.
const MAX_TIMESTAMP_SECONDS: i64 = 253_402_300_799;

/// Wire timestamp: seconds since the Unix epoch plus a nanosecond fraction.
///
/// Only instants within years 0001..=9999 convert; anything else is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    pub seconds: i64,
    pub nanos: i32,
}

impl Timestamp {
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        let nanos = u32::try_from(self.nanos).ok()?;
        Utc.timestamp_opt(self.seconds, nanos).single()
    }
}

impl TryFrom<DateTime<Utc>> for Timestamp {
    type Error = PaddockError;

    fn try_from(value: DateTime<Utc>) -> Result<Self> {
        let seconds = value.timestamp();
        let nanos = value.timestamp_subsec_nanos();
        if !(MIN_TIMESTAMP_SECONDS..=MAX_TIMESTAMP_SECONDS).contains(&seconds) {
            return Err(PaddockError::Mapping(format!(
                "timestamp {} out of range [0001-01-01, 10000-01-01)",
                value
            )));
        }
        if nanos >= 1_000_000_000 {
            return Err(PaddockError::Mapping(format!(
                "timestamp {} has out-of-range nanos {}",
                value, nanos
            )));
        }
        Ok(Self {
            seconds,
            nanos: nanos as i32,
        })
    }
}

// =============================================================================
// Entities
// =============================================================================

/// A race as returned by the racing listing service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Race {
    pub id: i64,
    pub meeting_id: i64,
    pub name: String,
    pub number: i64,
    pub visible: bool,
    pub advertised_start_time: Timestamp,
    pub status: EntityStatus,
}

/// A sporting event as returned by the sports listing service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SportEvent {
    pub id: i64,
    pub meeting_id: i64,
    pub name: String,
    pub number: i64,
    pub visible: bool,
    pub home_team: String,
    pub away_team: String,
    pub advertised_start_time: Timestamp,
    /// When betting closes, if the event records it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub betting_closed_time: Option<Timestamp>,
    pub status: EntityStatus,
}
