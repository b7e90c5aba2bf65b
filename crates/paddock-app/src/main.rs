//! Paddock binary - composition root.
//!
//! 1. Parse CLI arguments and load configuration from TOML
//! 2. Install the tracing subscriber
//! 3. Open, migrate and seed the racing and sports stores
//! 4. Run one query and print the response as JSON

mod cli;

use clap::Parser;
use serde::Serialize;

use paddock_core::error::PaddockError;
use paddock_core::logging::init_tracing;
use paddock_service::{
    GetRaceRequest, GetSportRequest, ListEventsRequest, ListRacesRequest, Racing, Services, Sports,
};

use cli::{CliArgs, Command, Query};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let config_file = args.resolve_config_path();
    let loaded = args.load_config(&config_file);
    init_tracing(&loaded.log_level)?;

    match &loaded.load_error {
        None => tracing::info!(path = %config_file.display(), "Configuration loaded"),
        Some(PaddockError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(path = %config_file.display(), "No configuration file, using defaults")
        }
        Some(e) => tracing::warn!(
            path = %config_file.display(),
            error = %e,
            "Failed to load configuration, using defaults"
        ),
    }

    let services = Services::from_config(&loaded.config)?;

    match args.command {
        Command::Races(Query::List(list)) => {
            let resp = services
                .racing
                .list_races(ListRacesRequest {
                    filter: list.filter(),
                    order_by: list.order_by(),
                })
                .await?;
            print_json(&resp)?;
        }
        Command::Races(Query::Get { id }) => {
            let resp = services.racing.get_race_by_id(GetRaceRequest { id }).await?;
            print_json(&resp)?;
        }
        Command::Sports(Query::List(list)) => {
            let resp = services
                .sports
                .list_events(ListEventsRequest {
                    filter: list.filter(),
                    order_by: list.order_by(),
                })
                .await?;
            print_json(&resp)?;
        }
        Command::Sports(Query::Get { id }) => {
            let resp = services.sports.get_sport_by_id(GetSportRequest { id }).await?;
            print_json(&resp)?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
