//! Paddock storage crate - SQLite persistence for the listing services.
//!
//! Provides a WAL-mode SQLite database with migrations, per-domain query
//! templates, the filter and order compilers, row mapping with derived
//! status, and the repository facade consumed by the service layer.

pub mod db;
pub mod filter;
pub mod mapper;
pub mod migrations;
pub mod order;
pub mod queries;
pub mod repository;
pub mod seed;

pub use db::Database;
pub use filter::apply_filter;
pub use mapper::{parse_stored_timestamp, FromRow};
pub use order::apply_order_by;
pub use queries::QueryTemplates;
pub use repository::{EntityRepository, ListingRepository, RacesRepository, SportsRepository};
pub use seed::SeedData;
