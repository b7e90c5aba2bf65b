//! Composition root: builds both listing services from configuration.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use paddock_core::config::PaddockConfig;
use paddock_core::error::PaddockError;
use paddock_storage::{QueryTemplates, RacesRepository, SportsRepository};

use crate::racing::RacingService;
use crate::sports::SportsService;

/// The racing and sports services, each over its own store.
pub struct Services {
    pub racing: RacingService<RacesRepository>,
    pub sports: SportsService<SportsRepository>,
}

impl Services {
    /// Open both stores, run migrations and seed them once if configured.
    pub fn from_config(config: &PaddockConfig) -> Result<Self, PaddockError> {
        let races = RacesRepository::open(&config.racing, QueryTemplates::races())?;
        races.init()?;
        info!(db_path = %config.racing.db_path, "Racing store ready");

        let sports = SportsRepository::open(&config.sports, QueryTemplates::sports())?;
        sports.init()?;
        info!(db_path = %config.sports.db_path, "Sports store ready");

        Ok(Self {
            racing: RacingService::new(Arc::new(races)),
            sports: SportsService::new(Arc::new(sports)),
        })
    }

    /// Load configuration from `path` (defaults if missing) and build the services.
    pub fn from_config_file(path: &Path) -> Result<Self, PaddockError> {
        let config = PaddockConfig::load_or_default(path);
        Self::from_config(&config)
    }

    /// Build both services over seeded in-memory stores.
    pub fn in_memory(seed_count: u32) -> Result<Self, PaddockError> {
        let mut config = PaddockConfig::default();
        for store in [&mut config.racing, &mut config.sports] {
            store.db_path = paddock_core::config::IN_MEMORY_PATH.to_string();
            store.seed = seed_count > 0;
            store.seed_count = seed_count;
        }
        Self::from_config(&config)
    }
}
