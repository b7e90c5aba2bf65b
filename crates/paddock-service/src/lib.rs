//! Paddock service crate - the racing and sports listing services.
//!
//! Wraps the storage repositories in async request/response services and
//! provides the composition root that builds both from configuration.

pub mod bootstrap;
mod blocking;
pub mod racing;
pub mod sports;
pub mod types;

pub use bootstrap::Services;
pub use racing::{Racing, RacingService};
pub use sports::{Sports, SportsService};
pub use types::{
    GetRaceRequest, GetRaceResponse, GetSportRequest, GetSportResponse, ListEventsRequest,
    ListEventsResponse, ListRacesRequest, ListRacesResponse,
};
