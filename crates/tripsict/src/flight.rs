//! Flights, kept in the order they were added.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::record::{EntityId, Record};

/// A booked flight.
///
/// Serialized with camelCase field names, the layout the browser client
/// stored under the `flights` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    /// Unique id within the flight sequence.
    pub id: EntityId,
    /// Operating airline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airline: Option<String>,
    /// Flight number, e.g. `UA123`.
    pub flight_number: String,
    /// Departure gate.
    pub gate: String,
    /// Departure time as entered.
    pub departure_time: String,
    /// Arrival time as entered.
    pub arrival_time: String,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Candidate flight submitted by the flight form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlightDraft {
    /// Operating airline.
    pub airline: Option<String>,
    /// Flight number.
    pub flight_number: Option<String>,
    /// Departure gate.
    pub gate: Option<String>,
    /// Departure time.
    pub departure_time: Option<String>,
    /// Arrival time.
    pub arrival_time: Option<String>,
    /// Free-form notes.
    pub description: Option<String>,
}

impl FlightDraft {
    /// Check the flight number, if present, against `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFlightNumber`] if it doesn't match.
    pub fn validate(&self, pattern: &Regex) -> Result<()> {
        match &self.flight_number {
            Some(number) if !pattern.is_match(number) => Err(Error::InvalidFlightNumber {
                value: number.clone(),
                pattern: pattern.as_str().to_string(),
            }),
            _ => Ok(()),
        }
    }
}

impl Record for Flight {
    type Draft = FlightDraft;

    const KIND: &'static str = "flight";
    const STORAGE_KEY: &'static str = "flights";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn from_draft(id: EntityId, draft: FlightDraft) -> Result<Self> {
        let required = |value: Option<String>, field| {
            value.ok_or(Error::missing_field(Self::KIND, field))
        };
        Ok(Self {
            id,
            airline: draft.airline,
            flight_number: required(draft.flight_number, "flight_number")?,
            gate: required(draft.gate, "gate")?,
            departure_time: required(draft.departure_time, "departure_time")?,
            arrival_time: required(draft.arrival_time, "arrival_time")?,
            description: draft.description,
        })
    }

    fn merge(&mut self, draft: FlightDraft) {
        if draft.airline.is_some() {
            self.airline = draft.airline;
        }
        if let Some(flight_number) = draft.flight_number {
            self.flight_number = flight_number;
        }
        if let Some(gate) = draft.gate {
            self.gate = gate;
        }
        if let Some(departure_time) = draft.departure_time {
            self.departure_time = departure_time;
        }
        if let Some(arrival_time) = draft.arrival_time {
            self.arrival_time = arrival_time;
        }
        if draft.description.is_some() {
            self.description = draft.description;
        }
    }
}
