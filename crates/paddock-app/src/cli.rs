//! CLI argument definitions for the paddock binary.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use paddock_core::config::PaddockConfig;
use paddock_core::error::PaddockError;
use paddock_core::types::{Direction, ListFilter, OrderBy, OrderByField};

/// Paddock - read-only racing and sports event listings.
#[derive(Parser, Debug)]
#[command(name = "paddock", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Query the racing service.
    #[command(subcommand)]
    Races(Query),
    /// Query the sports service.
    #[command(subcommand)]
    Sports(Query),
}

#[derive(Subcommand, Debug)]
pub enum Query {
    /// List entities, optionally filtered and ordered.
    List(ListArgs),
    /// Fetch one entity by id.
    Get {
        id: i64,
    },
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only include these meetings. Repeatable.
    #[arg(short = 'm', long = "meeting")]
    pub meetings: Vec<i64>,

    /// Only include entities with this visibility.
    #[arg(long = "visible")]
    pub visible: Option<bool>,

    /// Sort key as `field` or `field:asc|desc`. Repeatable, applied left to right.
    #[arg(short = 'o', long = "order", value_parser = parse_order_field)]
    pub order: Vec<OrderByField>,
}

impl ListArgs {
    pub fn filter(&self) -> Option<ListFilter> {
        if self.meetings.is_empty() && self.visible.is_none() {
            return None;
        }
        Some(ListFilter {
            meeting_ids: self.meetings.clone(),
            visible: self.visible,
        })
    }

    pub fn order_by(&self) -> Option<OrderBy> {
        if self.order.is_empty() {
            None
        } else {
            Some(OrderBy::new(self.order.clone()))
        }
    }
}

/// Parse `field[:asc|desc]` into an order-by entry.
pub fn parse_order_field(raw: &str) -> Result<OrderByField, String> {
    let (field, direction) = match raw.rsplit_once(':') {
        Some((field, dir)) => {
            let direction = match dir.to_ascii_lowercase().as_str() {
                "asc" => Direction::Asc,
                "desc" => Direction::Desc,
                other => return Err(format!("unknown direction '{}'", other)),
            };
            (field, direction)
        }
        None => (raw, Direction::Asc),
    };

    if field.is_empty() {
        return Err("order field must not be empty".to_string());
    }
    Ok(OrderByField {
        field: field.to_string(),
        direction,
    })
}

/// Configuration resolved for one run, before any subscriber exists.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: PaddockConfig,
    pub log_level: String,
    /// Why the file was ignored in favour of defaults, if it was.
    pub load_error: Option<PaddockError>,
}

impl CliArgs {
    /// Read the config file without logging.
    ///
    /// Falls back to defaults on any failure and keeps the error so the
    /// caller can report it once tracing is installed.
    pub fn load_config(&self, path: &Path) -> LoadedConfig {
        let (config, load_error) = match PaddockConfig::load(path) {
            Ok(config) => (config, None),
            Err(e) => (PaddockConfig::default(), Some(e)),
        };
        LoadedConfig {
            log_level: self.resolve_log_level(&config.general.log_level),
            config,
            load_error,
        }
    }

    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > PADDOCK_CONFIG env var > ./paddock.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("PADDOCK_CONFIG") {
            return PathBuf::from(p);
        }
        PathBuf::from("paddock.toml")
    }

    /// Resolve the log level. Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }
}
