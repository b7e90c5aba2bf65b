//! Request and response messages for the listing services.

use serde::{Deserialize, Serialize};

use paddock_core::types::{ListFilter, OrderBy, Race, SportEvent};

/// Request for `Racing::list_races`. Both fields are optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRacesRequest {
    #[serde(default)]
    pub filter: Option<ListFilter>,
    #[serde(default)]
    pub order_by: Option<OrderBy>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRacesResponse {
    pub races: Vec<Race>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetRaceRequest {
    pub id: i64,
}

/// `race` is `None` when no race has the requested id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetRaceResponse {
    pub race: Option<Race>,
}

/// Request for `Sports::list_events`. Same shape as the racing request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEventsRequest {
    #[serde(default)]
    pub filter: Option<ListFilter>,
    #[serde(default)]
    pub order_by: Option<OrderBy>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEventsResponse {
    pub sports: Vec<SportEvent>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetSportRequest {
    pub id: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetSportResponse {
    pub sport: Option<SportEvent>,
}
