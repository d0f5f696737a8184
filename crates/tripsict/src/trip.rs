//! Trips: the planner's primary record.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::record::{EntityId, Record};

/// Format of a trip's calendar date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A planned trip.
///
/// `date` is kept as the string the user entered; see [`Trip::parsed_date`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    /// Unique id within the trip sequence.
    pub id: EntityId,
    /// Trip name.
    pub name: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Destination.
    pub location: String,
}

/// Candidate trip submitted by the trip form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripDraft {
    /// Trip name.
    pub name: Option<String>,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Destination.
    pub location: Option<String>,
}

impl Trip {
    /// Create a trip from its fields.
    #[must_use]
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        date: impl Into<String>,
        description: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            date: date.into(),
            description: description.into(),
            location: location.into(),
        }
    }

    /// The trip date, or `None` if the stored string isn't a calendar date.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }

    /// Route of the trip's detail page.
    #[must_use]
    pub fn detail_route(&self) -> String {
        format!("/trips/{}", self.id)
    }
}

/// Parse and normalise a user-supplied trip date.
///
/// # Errors
///
/// Returns [`Error::InvalidDate`] if `value` isn't a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| Error::invalid_date(value))
}

impl Record for Trip {
    type Draft = TripDraft;

    const KIND: &'static str = "trip";
    const STORAGE_KEY: &'static str = "trips";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn from_draft(id: EntityId, draft: TripDraft) -> Result<Self> {
        Ok(Self {
            id,
            name: draft.name.ok_or(Error::missing_field(Self::KIND, "name"))?,
            date: draft.date.ok_or(Error::missing_field(Self::KIND, "date"))?,
            description: draft.description.unwrap_or_default(),
            location: draft
                .location
                .ok_or(Error::missing_field(Self::KIND, "location"))?,
        })
    }

    fn merge(&mut self, draft: TripDraft) {
        if let Some(name) = draft.name {
            self.name = name;
        }
        if let Some(date) = draft.date {
            self.date = date;
        }
        if let Some(description) = draft.description {
            self.description = description;
        }
        if let Some(location) = draft.location {
            self.location = location;
        }
    }

    /// Ascending by date. Trips with an unparseable date go last.
    fn order(&self, other: &Self) -> Ordering {
        match (self.parsed_date(), other.parsed_date()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}
