//! Sports events listing service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use paddock_core::error::PaddockError;
use paddock_core::types::SportEvent;
use paddock_storage::ListingRepository;

use crate::blocking::run_blocking;
use crate::types::{GetSportRequest, GetSportResponse, ListEventsRequest, ListEventsResponse};

/// Read-only access to sporting events.
#[async_trait]
pub trait Sports: Send + Sync {
    async fn list_events(&self, request: ListEventsRequest)
        -> Result<ListEventsResponse, PaddockError>;

    async fn get_sport_by_id(&self, request: GetSportRequest)
        -> Result<GetSportResponse, PaddockError>;
}

/// `Sports` backed by a sports repository.
pub struct SportsService<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: ?Sized> SportsService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repo
    }
}

impl<R: ?Sized> Clone for SportsService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

#[async_trait]
impl<R> Sports for SportsService<R>
where
    R: ListingRepository<Entity = SportEvent> + ?Sized + 'static,
{
    async fn list_events(
        &self,
        request: ListEventsRequest,
    ) -> Result<ListEventsResponse, PaddockError> {
        let sports = run_blocking(&self.repo, move |repo| {
            repo.list(request.filter.as_ref(), request.order_by.as_ref())
        })
        .await?;

        debug!(count = sports.len(), "Listed sports events");
        Ok(ListEventsResponse { sports })
    }

    async fn get_sport_by_id(
        &self,
        request: GetSportRequest,
    ) -> Result<GetSportResponse, PaddockError> {
        let sport = run_blocking(&self.repo, move |repo| repo.get_by_id(request.id)).await?;
        debug!(id = request.id, found = sport.is_some(), "Fetched sports event");
        Ok(GetSportResponse { sport })
    }
}
