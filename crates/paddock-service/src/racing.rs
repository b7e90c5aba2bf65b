//! Racing listing service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use paddock_core::error::PaddockError;
use paddock_core::types::Race;
use paddock_storage::ListingRepository;

use crate::blocking::run_blocking;
use crate::types::{GetRaceRequest, GetRaceResponse, ListRacesRequest, ListRacesResponse};

/// Read-only access to races.
#[async_trait]
pub trait Racing: Send + Sync {
    /// List races matching the request's filter, in the requested order.
    async fn list_races(&self, request: ListRacesRequest)
        -> Result<ListRacesResponse, PaddockError>;

    /// Fetch a single race. A missing race is a successful empty response.
    async fn get_race_by_id(&self, request: GetRaceRequest)
        -> Result<GetRaceResponse, PaddockError>;
}

/// `Racing` backed by a races repository.
pub struct RacingService<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: ?Sized> RacingService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repo
    }
}

impl<R: ?Sized> Clone for RacingService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

#[async_trait]
impl<R> Racing for RacingService<R>
where
    R: ListingRepository<Entity = Race> + ?Sized + 'static,
{
    async fn list_races(
        &self,
        request: ListRacesRequest,
    ) -> Result<ListRacesResponse, PaddockError> {
        let races = run_blocking(&self.repo, move |repo| {
            repo.list(request.filter.as_ref(), request.order_by.as_ref())
        })
        .await?;

        debug!(count = races.len(), "Listed races");
        Ok(ListRacesResponse { races })
    }

    async fn get_race_by_id(
        &self,
        request: GetRaceRequest,
    ) -> Result<GetRaceResponse, PaddockError> {
        let race = run_blocking(&self.repo, move |repo| repo.get_by_id(request.id)).await?;
        debug!(id = request.id, found = race.is_some(), "Fetched race");
        Ok(GetRaceResponse { race })
    }
}
