//! Repository facade for the listing services.
//!
//! `EntityRepository` composes the query templates, filter compiler, order
//! compiler and row mapper into `list` and `get_by_id`. One repository serves
//! one entity domain; races and sports events are the two instantiations.

use std::marker::PhantomData;
use std::sync::{Arc, OnceLock};

use rusqlite::OptionalExtension;
use tracing::{debug, info};

use paddock_core::clock::{Clock, SystemClock};
use paddock_core::config::StoreConfig;
use paddock_core::error::PaddockError;
use paddock_core::types::{ListFilter, OrderBy, Race, SportEvent};

use crate::db::Database;
use crate::filter::apply_filter;
use crate::mapper::FromRow;
use crate::order::apply_order_by;
use crate::queries::QueryTemplates;
use crate::seed::SeedData;

/// Read access to one entity domain, as consumed by the service layer.
pub trait ListingRepository: Send + Sync {
    type Entity: Send + 'static;

    /// Prepare the store. Seeds dummy data at most once.
    fn init(&self) -> Result<(), PaddockError>;

    /// All entities matching `filter`, sorted by `order_by`.
    fn list(
        &self,
        filter: Option<&ListFilter>,
        order_by: Option<&OrderBy>,
    ) -> Result<Vec<Self::Entity>, PaddockError>;

    /// A single entity, or `None` if no row has this id.
    fn get_by_id(&self, id: i64) -> Result<Option<Self::Entity>, PaddockError>;
}

/// SQLite-backed repository for one entity type.
pub struct EntityRepository<E> {
    db: Arc<Database>,
    templates: QueryTemplates,
    clock: Arc<dyn Clock>,
    seed_count: u32,
    seeded: OnceLock<Result<(), String>>,
    _entity: PhantomData<fn() -> E>,
}

pub type RacesRepository = EntityRepository<Race>;
pub type SportsRepository = EntityRepository<SportEvent>;

impl RacesRepository {
    pub fn races(db: Arc<Database>) -> Self {
        Self::new(db, QueryTemplates::races())
    }
}

impl SportsRepository {
    pub fn sports(db: Arc<Database>) -> Self {
        Self::new(db, QueryTemplates::sports())
    }
}

impl<E> EntityRepository<E>
where
    E: FromRow + SeedData,
{
    /// Create a repository over `db` using this domain's templates.
    ///
    /// Uses the system clock and seeds nothing until configured otherwise.
    pub fn new(db: Arc<Database>, templates: QueryTemplates) -> Self {
        Self {
            db,
            templates,
            clock: Arc::new(SystemClock),
            seed_count: 0,
            seeded: OnceLock::new(),
            _entity: PhantomData,
        }
    }

    /// Open the database a store section points at and configure seeding.
    pub fn open(config: &StoreConfig, templates: QueryTemplates) -> Result<Self, PaddockError> {
        let db = Arc::new(Database::from_config(config)?);
        let seed_count = if config.seed { config.seed_count } else { 0 };
        Ok(Self::new(db, templates).with_seed_count(seed_count))
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_seed_count(mut self, count: u32) -> Self {
        self.seed_count = count;
        self
    }

    pub fn templates(&self) -> &QueryTemplates {
        &self.templates
    }

    /// Seed the table on the first call; later calls return the first outcome.
    pub fn init(&self) -> Result<(), PaddockError> {
        let outcome = self.seeded.get_or_init(|| {
            if self.seed_count == 0 {
                return Ok(());
            }
            let now = self.clock.now();
            info!(count = self.seed_count, "Seeding dummy data");
            self.db
                .with_conn(|conn| E::seed_rows(conn, self.seed_count, now, &mut rand::rng()))
                .map_err(|e| e.to_string())
        });

        outcome
            .clone()
            .map_err(|msg| PaddockError::Storage(format!("Seeding failed: {}", msg)))
    }

    /// List entities matching `filter`, ordered by `order_by`.
    ///
    /// An empty result is `Ok(vec![])`. A mapping failure on any row aborts
    /// the whole call.
    pub fn list(
        &self,
        filter: Option<&ListFilter>,
        order_by: Option<&OrderBy>,
    ) -> Result<Vec<E>, PaddockError> {
        let (query, args) = apply_filter(self.templates.list(), filter);
        let query = apply_order_by(&query, order_by);

        debug!(sql = %query.trim(), args = args.len(), "Listing entities");

        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(&query).map_err(query_error)?;
            let mut rows = stmt
                .query(rusqlite::params_from_iter(args.iter()))
                .map_err(query_error)?;

            let mut entities = Vec::new();
            while let Some(row) = rows.next().map_err(query_error)? {
                entities.push(E::from_row(row, self.clock.as_ref())?);
            }
            Ok(entities)
        })
    }

    /// Fetch one entity by id. A missing row is `Ok(None)`.
    pub fn get_by_id(&self, id: i64) -> Result<Option<E>, PaddockError> {
        debug!(id, "Fetching entity by id");

        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(self.templates.by_id()).map_err(query_error)?;

            let result = stmt
                .query_row(rusqlite::params![id], |row| {
                    Ok(E::from_row(row, self.clock.as_ref()))
                })
                .optional()
                .map_err(query_error)?;

            result.transpose()
        })
    }
}

impl<E> ListingRepository for EntityRepository<E>
where
    E: FromRow + SeedData + Send + 'static,
{
    type Entity = E;

    fn init(&self) -> Result<(), PaddockError> {
        EntityRepository::init(self)
    }

    fn list(
        &self,
        filter: Option<&ListFilter>,
        order_by: Option<&OrderBy>,
    ) -> Result<Vec<E>, PaddockError> {
        EntityRepository::list(self, filter, order_by)
    }

    fn get_by_id(&self, id: i64) -> Result<Option<E>, PaddockError> {
        EntityRepository::get_by_id(self, id)
    }
}

fn query_error(e: rusqlite::Error) -> PaddockError {
    PaddockError::Query(e.to_string())
}
