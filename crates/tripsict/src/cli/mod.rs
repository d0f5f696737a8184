//! Command-line interface for tripsict.
//!
//! This module provides the CLI structure for the `tripsict` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddFlightArgs, AddTripArgs, ConfigCommand, EditFlightArgs, EditTripArgs, FlightsCommand,
    NotificationsCommand, StatusCommand, TripsCommand,
};

/// tripsict - Keep track of your trips and flights
///
/// Records trips and flights locally and reminds you of trips coming up
/// in the next few days.
#[derive(Debug, Parser)]
#[command(name = "tripsict")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage trips
    #[command(subcommand)]
    Trips(TripsCommand),

    /// Manage flights
    #[command(subcommand)]
    Flights(FlightsCommand),

    /// Show trips coming up soon
    Notifications(NotificationsCommand),

    /// Show storage status
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Log out
    Logout,
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
