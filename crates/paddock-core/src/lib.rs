//! Paddock core crate - shared types, configuration, errors and logging.
//!
//! Everything the storage and service crates agree on: request values,
//! entities, derived status, the injectable clock and `PaddockError`.

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use clock::{Clock, FixedClock, SteppingClock, SystemClock};
pub use config::{PaddockConfig, StoreConfig};
pub use error::{PaddockError, Result};
pub use types::*;
