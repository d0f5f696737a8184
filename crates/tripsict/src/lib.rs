//! `tripsict` - Plan trips and flights, with reminders for what's coming up
//!
//! Trips and flights are kept in ordered sequences, each persisted as a
//! single JSON blob in a local store. Trips that start within the next few
//! days raise notifications.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod collection;
pub mod config;
pub mod error;
pub mod flight;
pub mod form;
pub mod logging;
pub mod notify;
pub mod planner;
pub mod record;
pub mod storage;
pub mod store;
pub mod trip;
pub mod view;

pub use collection::EntityCollection;
pub use config::Config;
pub use error::{Error, Result};
pub use flight::{Flight, FlightDraft};
pub use form::FormState;
pub use logging::init_logging;
pub use notify::{Alert, NotificationCenter, PointerTarget};
pub use planner::Planner;
pub use record::{EntityId, Record};
pub use storage::{BlobStore, MemoryStore, SqliteStore, StorageStats};
pub use store::EntityStore;
pub use trip::{Trip, TripDraft};
