//! `tripsict` - CLI for the trip planner
//!
//! This binary provides the command-line interface for recording trips and
//! flights and checking on upcoming trips.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::process::ExitCode;
use std::rc::Rc;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;

use tripsict::cli::{Cli, Command, ConfigCommand, FlightsCommand, TripsCommand};
use tripsict::{init_logging, view, Config, EntityId, Error, Planner, Record, SqliteStore, Trip};

/// Exit status for rejected input, such as an unknown id or a malformed date.
const EXIT_INPUT_ERROR: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            exit_code(&e)
        }
    }
}

fn exit_code(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<Error>() {
        Some(e) if e.is_input_error() => ExitCode::from(EXIT_INPUT_ERROR),
        _ => ExitCode::FAILURE,
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load_from(cli.config.clone())?;

    match cli.command {
        Command::Trips(trips_cmd) => handle_trips(&config, trips_cmd),
        Command::Flights(flights_cmd) => handle_flights(&config, flights_cmd),
        Command::Notifications(cmd) => handle_notifications(config, cmd.days, cmd.json),
        Command::Status(status_cmd) => handle_status(&config, status_cmd.json),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
        Command::Logout => {
            // There is no session to tear down
            println!("Logged out.");
            Ok(())
        }
    }
}

fn open_store(config: &Config) -> anyhow::Result<Rc<SqliteStore>> {
    let path = config.database_path();
    let store = SqliteStore::open(&path)
        .with_context(|| format!("could not open trip database at {}", path.display()))?;
    Ok(Rc::new(store))
}

fn open_planner(config: &Config) -> anyhow::Result<Planner> {
    let store = open_store(config)?;
    Ok(Planner::load(store, config, Utc::now())?)
}

fn handle_trips(config: &Config, cmd: TripsCommand) -> anyhow::Result<()> {
    let mut planner = open_planner(config)?;

    match cmd {
        TripsCommand::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(planner.trips().items())?);
            } else {
                if config.notifications.enabled {
                    println!("{}", view::render_badge(planner.notifications()));
                    println!();
                }
                println!("Your Trips:");
                print!("{}", view::render_trips(planner.trips().items()));
            }
        }
        TripsCommand::Add(args) => {
            let id = planner.add_trip(args.into(), Utc::now())?;
            println!("Added trip {id}");
        }
        TripsCommand::Edit(args) => {
            let (id, draft) = args.into_parts();
            planner.edit_trip(&id, draft, Utc::now())?;
            println!("Updated trip {id}");
        }
        TripsCommand::Delete { id } => {
            planner.delete_trip(&EntityId::from(id.as_str()), Utc::now())?;
            println!("Deleted trip {id}");
        }
        TripsCommand::Show { id, json } => {
            let id = EntityId::from(id);
            let trip = planner
                .trips()
                .find(&id)
                .ok_or_else(|| Error::not_found(Trip::KIND, id.as_str()))?;
            if json {
                println!("{}", serde_json::to_string_pretty(trip)?);
            } else {
                print!("{}", view::render_trips(std::slice::from_ref(trip)));
            }
        }
    }
    Ok(())
}

fn handle_flights(config: &Config, cmd: FlightsCommand) -> anyhow::Result<()> {
    let mut planner = open_planner(config)?;

    match cmd {
        FlightsCommand::List { json } => {
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(planner.flights().items())?
                );
            } else {
                println!("Your Flights:");
                print!("{}", view::render_flights(planner.flights().items()));
            }
        }
        FlightsCommand::Add(args) => {
            let id = planner.add_flight(args.into())?;
            println!("Added flight {id}");
        }
        FlightsCommand::Edit(args) => {
            let (id, draft) = args.into_parts();
            planner.edit_flight(&id, draft)?;
            println!("Updated flight {id}");
        }
        FlightsCommand::Delete { id } => {
            planner.delete_flight(&EntityId::from(id.as_str()))?;
            println!("Deleted flight {id}");
        }
    }
    Ok(())
}

fn handle_notifications(mut config: Config, days: Option<u32>, json: bool) -> anyhow::Result<()> {
    if !config.notifications.enabled {
        println!("Notifications are disabled.");
        return Ok(());
    }

    if let Some(days) = days {
        config.notifications.lookahead_days = days;
        config.validate()?;
    }

    let mut planner = open_planner(&config)?;
    planner.open_notifications()?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(planner.notifications().alerts())?
        );
    } else {
        println!("{}", view::render_badge(planner.notifications()));
        print!("{}", view::render_alerts(planner.notifications()));
    }
    Ok(())
}

fn handle_status(config: &Config, json: bool) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let stats = store.stats()?;
    let planner = Planner::load(store.clone(), config, Utc::now())?;

    if json {
        let status = serde_json::json!({
            "database_path": store.path(),
            "trips": planner.trips().len(),
            "flights": planner.flights().len(),
            "upcoming_trips": planner.notifications().count(),
            "last_write": stats.last_write,
            "db_size_bytes": stats.db_size_bytes,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("tripsict status");
        println!("---------------");
        println!("Database:      {}", store.path().display());
        println!("Size:          {} bytes", stats.db_size_bytes);
        println!("Trips:         {}", planner.trips().len());
        println!("Flights:       {}", planner.flights().len());
        println!("Upcoming:      {}", planner.notifications().count());
        match stats.last_write {
            Some(at) => println!("Last change:   {}", at.to_rfc3339()),
            None => println!("Last change:   never"),
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!();
                println!("[Notifications]");
                println!("  Enabled:            {}", config.notifications.enabled);
                println!(
                    "  Lookahead (days):   {}",
                    config.notifications.lookahead_days
                );
                println!();
                println!("[Flights]");
                println!(
                    "  Flight number:      {}",
                    config.flights.flight_number_pattern
                );
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
