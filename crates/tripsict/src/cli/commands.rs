//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::flight::FlightDraft;
use crate::record::EntityId;
use crate::trip::TripDraft;

/// Trip commands.
#[derive(Debug, Subcommand)]
pub enum TripsCommand {
    /// List trips, soonest first
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Add a trip
    Add(AddTripArgs),

    /// Change fields of an existing trip
    Edit(EditTripArgs),

    /// Delete a trip
    Delete {
        /// Id of the trip to delete
        id: String,
    },

    /// Show one trip
    Show {
        /// Id of the trip to show
        id: String,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

/// Arguments for adding a trip.
#[derive(Debug, Args)]
pub struct AddTripArgs {
    /// Trip name
    #[arg(short, long)]
    pub name: String,

    /// Trip date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: String,

    /// Destination
    #[arg(short, long)]
    pub location: String,

    /// Free-form description
    #[arg(long)]
    pub description: Option<String>,
}

/// Arguments for editing a trip. Omitted fields keep their current value.
#[derive(Debug, Args)]
pub struct EditTripArgs {
    /// Id of the trip to edit
    pub id: String,

    /// New name
    #[arg(short, long)]
    pub name: Option<String>,

    /// New date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<String>,

    /// New destination
    #[arg(short, long)]
    pub location: Option<String>,

    /// New description
    #[arg(long)]
    pub description: Option<String>,
}

/// Flight commands.
#[derive(Debug, Subcommand)]
pub enum FlightsCommand {
    /// List flights in the order they were added
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Add a flight
    Add(AddFlightArgs),

    /// Change fields of an existing flight
    Edit(EditFlightArgs),

    /// Delete a flight
    Delete {
        /// Id of the flight to delete
        id: String,
    },
}

/// Arguments for adding a flight.
#[derive(Debug, Args)]
pub struct AddFlightArgs {
    /// Flight number, e.g. UA123
    #[arg(short, long)]
    pub flight_number: String,

    /// Departure gate
    #[arg(short, long)]
    pub gate: String,

    /// Departure time
    #[arg(long)]
    pub departure: String,

    /// Arrival time
    #[arg(long)]
    pub arrival: String,

    /// Operating airline
    #[arg(short, long)]
    pub airline: Option<String>,

    /// Free-form notes
    #[arg(long)]
    pub description: Option<String>,
}

/// Arguments for editing a flight. Omitted fields keep their current value.
#[derive(Debug, Args)]
pub struct EditFlightArgs {
    /// Id of the flight to edit
    pub id: String,

    /// New flight number
    #[arg(short, long)]
    pub flight_number: Option<String>,

    /// New departure gate
    #[arg(short, long)]
    pub gate: Option<String>,

    /// New departure time
    #[arg(long)]
    pub departure: Option<String>,

    /// New arrival time
    #[arg(long)]
    pub arrival: Option<String>,

    /// New airline
    #[arg(short, long)]
    pub airline: Option<String>,

    /// New notes
    #[arg(long)]
    pub description: Option<String>,
}

/// Notifications command arguments.
#[derive(Debug, Args)]
pub struct NotificationsCommand {
    /// Override the lookahead window in days
    #[arg(short, long)]
    pub days: Option<u32>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

impl From<AddTripArgs> for TripDraft {
    fn from(args: AddTripArgs) -> Self {
        Self {
            name: Some(args.name),
            date: Some(args.date),
            description: args.description,
            location: Some(args.location),
        }
    }
}

impl EditTripArgs {
    /// Split into the target id and the fields to change.
    #[must_use]
    pub fn into_parts(self) -> (EntityId, TripDraft) {
        (
            EntityId::from(self.id),
            TripDraft {
                name: self.name,
                date: self.date,
                description: self.description,
                location: self.location,
            },
        )
    }
}

impl From<AddFlightArgs> for FlightDraft {
    fn from(args: AddFlightArgs) -> Self {
        Self {
            airline: args.airline,
            flight_number: Some(args.flight_number),
            gate: Some(args.gate),
            departure_time: Some(args.departure),
            arrival_time: Some(args.arrival),
            description: args.description,
        }
    }
}

impl EditFlightArgs {
    /// Split into the target id and the fields to change.
    #[must_use]
    pub fn into_parts(self) -> (EntityId, FlightDraft) {
        (
            EntityId::from(self.id),
            FlightDraft {
                airline: self.airline,
                flight_number: self.flight_number,
                gate: self.gate,
                departure_time: self.departure,
                arrival_time: self.arrival,
                description: self.description,
            },
        )
    }
}
