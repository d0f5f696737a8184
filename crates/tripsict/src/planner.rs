//! The planner: trip and flight stores sharing one backend, plus the trip
//! notifications derived from them.
//!
//! This is the layer the CLI talks to. It validates user input before it
//! reaches a store, turns silent store no-ops into [`Error::NotFound`], and
//! keeps the notification state in step with the trip sequence.

use std::rc::Rc;

use chrono::{DateTime, Utc};
use regex::Regex;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::flight::{Flight, FlightDraft};
use crate::notify::{NotificationCenter, NotificationState};
use crate::record::{EntityId, Record};
use crate::storage::BlobStore;
use crate::store::EntityStore;
use crate::trip::{parse_date, Trip, TripDraft, DATE_FORMAT};

/// Trips, flights and notifications over a single [`BlobStore`].
#[derive(Debug)]
pub struct Planner {
    backend: Rc<dyn BlobStore>,
    trips: EntityStore<Trip>,
    flights: EntityStore<Flight>,
    notifications: NotificationCenter,
    flight_number: Regex,
}

impl Planner {
    /// Load both stores from `backend` and restore the notification state.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read or the configured
    /// flight number pattern is invalid.
    pub fn load(
        backend: Rc<dyn BlobStore>,
        config: &Config,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let trips = EntityStore::load(Rc::clone(&backend))?;
        let flights = EntityStore::load(Rc::clone(&backend))?;

        let state = match backend.get(NotificationState::STORAGE_KEY)? {
            Some(blob) => serde_json::from_str(&blob).unwrap_or_else(|e| {
                warn!("Ignoring unreadable notification state: {}", e);
                NotificationState::default()
            }),
            None => NotificationState::default(),
        };

        let mut notifications = NotificationCenter::new(config.notifications.lookahead_days);
        notifications.resume(&trips, now, state);

        Ok(Self {
            backend,
            trips,
            flights,
            notifications,
            flight_number: config.flight_number_regex()?,
        })
    }

    /// The trip store.
    #[must_use]
    pub fn trips(&self) -> &EntityStore<Trip> {
        &self.trips
    }

    /// The flight store.
    #[must_use]
    pub fn flights(&self) -> &EntityStore<Flight> {
        &self.flights
    }

    /// Current trip notifications.
    #[must_use]
    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    /// Add a trip.
    ///
    /// # Errors
    ///
    /// Returns an error if the date is invalid, a required field is missing,
    /// or the write fails.
    pub fn add_trip(&mut self, draft: TripDraft, now: DateTime<Utc>) -> Result<EntityId> {
        let draft = normalize_trip(draft)?;
        self.trips.cancel();
        self.trips.toggle_form();
        let id = self
            .trips
            .submit(draft)?
            .ok_or_else(|| Error::internal("trip create returned no id"))?;
        self.trips_changed(now)?;
        Ok(id)
    }

    /// Update the supplied fields of a trip.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id, or an error if the date
    /// is invalid or the write fails.
    pub fn edit_trip(
        &mut self,
        id: &EntityId,
        draft: TripDraft,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let draft = normalize_trip(draft)?;
        if !self.trips.begin_edit(id) {
            return Err(Error::not_found(Trip::KIND, id.as_str()));
        }
        self.trips.submit(draft)?;
        self.trips_changed(now)
    }

    /// Delete a trip.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id, or an error if the write fails.
    pub fn delete_trip(&mut self, id: &EntityId, now: DateTime<Utc>) -> Result<()> {
        if !self.trips.remove(id)? {
            return Err(Error::not_found(Trip::KIND, id.as_str()));
        }
        self.trips_changed(now)
    }

    /// Add a flight.
    ///
    /// # Errors
    ///
    /// Returns an error if the flight number is invalid, a required field is
    /// missing, or the write fails.
    pub fn add_flight(&mut self, draft: FlightDraft) -> Result<EntityId> {
        draft.validate(&self.flight_number)?;
        self.flights.cancel();
        self.flights.toggle_form();
        self.flights
            .submit(draft)?
            .ok_or_else(|| Error::internal("flight create returned no id"))
    }

    /// Update the supplied fields of a flight.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id, or an error if the
    /// flight number is invalid or the write fails.
    pub fn edit_flight(&mut self, id: &EntityId, draft: FlightDraft) -> Result<()> {
        draft.validate(&self.flight_number)?;
        if !self.flights.begin_edit(id) {
            return Err(Error::not_found(Flight::KIND, id.as_str()));
        }
        self.flights.submit(draft)?;
        Ok(())
    }

    /// Delete a flight.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id, or an error if the write fails.
    pub fn delete_flight(&mut self, id: &EntityId) -> Result<()> {
        if !self.flights.remove(id)? {
            return Err(Error::not_found(Flight::KIND, id.as_str()));
        }
        Ok(())
    }

    /// Open the notification popover, marking current alerts as seen.
    ///
    /// # Errors
    ///
    /// Returns an error if the notification state cannot be written.
    pub fn open_notifications(&mut self) -> Result<()> {
        if !self.notifications.is_popover_open() {
            self.notifications.toggle_popover();
        }
        self.save_notification_state()
    }

    fn trips_changed(&mut self, now: DateTime<Utc>) -> Result<()> {
        self.notifications.sync(&self.trips, now);
        self.save_notification_state()
    }

    fn save_notification_state(&self) -> Result<()> {
        let blob = serde_json::to_string(&self.notifications.state())?;
        debug!("Saving notification state {}", blob);
        self.backend.set(NotificationState::STORAGE_KEY, &blob)
    }
}

/// Validate and normalise the date of a trip draft, if present.
fn normalize_trip(mut draft: TripDraft) -> Result<TripDraft> {
    if let Some(date) = draft.date.take() {
        draft.date = Some(parse_date(&date)?.format(DATE_FORMAT).to_string());
    }
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::storage::{MemoryStore, SqliteStore};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 3, 1, 9, 0, 0).unwrap()
    }

    fn in_days(days: i64) -> String {
        (now().date_naive() + Duration::days(days)).to_string()
    }

    fn trip(name: &str, date: &str) -> TripDraft {
        TripDraft {
            name: Some(name.to_string()),
            date: Some(date.to_string()),
            description: Some(String::new()),
            location: Some("Madrid".to_string()),
        }
    }

    fn flight(number: &str) -> FlightDraft {
        FlightDraft {
            airline: Some("Iberia".to_string()),
            flight_number: Some(number.to_string()),
            gate: Some("K4".to_string()),
            departure_time: Some("07:00".to_string()),
            arrival_time: Some("09:10".to_string()),
            description: None,
        }
    }

    fn planner(backend: &Rc<dyn BlobStore>) -> Planner {
        Planner::load(Rc::clone(backend), &Config::default(), now()).unwrap()
    }

    #[test]
    fn test_add_trip_normalizes_date() {
        let backend: Rc<dyn BlobStore> = Rc::new(MemoryStore::new());
        let mut planner = planner(&backend);
        let id = planner.add_trip(trip("Tapas", " 2030-04-02 "), now()).unwrap();
        assert_eq!(planner.trips().find(&id).unwrap().date, "2030-04-02");
    }

    #[test]
    fn test_add_trip_rejects_invalid_date() {
        let backend: Rc<dyn BlobStore> = Rc::new(MemoryStore::new());
        let mut planner = planner(&backend);
        let err = planner.add_trip(trip("Tapas", "April"), now()).unwrap_err();
        assert!(matches!(err, Error::InvalidDate { .. }));
        assert!(planner.trips().is_empty());
    }

    #[test]
    fn test_edit_and_delete_unknown_trip() {
        let backend: Rc<dyn BlobStore> = Rc::new(MemoryStore::new());
        let mut planner = planner(&backend);
        let missing = EntityId::from("missing");

        assert!(planner
            .edit_trip(&missing, TripDraft::default(), now())
            .unwrap_err()
            .is_not_found());
        assert!(planner.delete_trip(&missing, now()).unwrap_err().is_not_found());
    }

    #[test]
    fn test_edit_trip_merges() {
        let backend: Rc<dyn BlobStore> = Rc::new(MemoryStore::new());
        let mut planner = planner(&backend);
        let id = planner.add_trip(trip("Tapas", "2030-04-02"), now()).unwrap();

        planner
            .edit_trip(
                &id,
                TripDraft {
                    name: Some("More tapas".to_string()),
                    ..TripDraft::default()
                },
                now(),
            )
            .unwrap();

        let edited = planner.trips().find(&id).unwrap();
        assert_eq!(edited.name, "More tapas");
        assert_eq!(edited.location, "Madrid");
        assert!(!planner.trips().form().is_open());
    }

    #[test]
    fn test_flight_number_validated() {
        let backend: Rc<dyn BlobStore> = Rc::new(MemoryStore::new());
        let mut planner = planner(&backend);
        assert!(matches!(
            planner.add_flight(flight("not a flight")),
            Err(Error::InvalidFlightNumber { .. })
        ));

        let id = planner.add_flight(flight("IB3166")).unwrap();
        assert!(planner
            .edit_flight(
                &id,
                FlightDraft {
                    flight_number: Some("???".to_string()),
                    ..FlightDraft::default()
                }
            )
            .is_err());
        assert_eq!(planner.flights().find(&id).unwrap().flight_number, "IB3166");
    }

    #[test]
    fn test_flights_and_trips_survive_reload() {
        let backend: Rc<dyn BlobStore> = Rc::new(SqliteStore::open_in_memory().unwrap());
        let mut first = planner(&backend);
        first.add_trip(trip("Tapas", "2030-04-02"), now()).unwrap();
        let flight_id = first.add_flight(flight("IB3166")).unwrap();

        let second = planner(&backend);
        assert_eq!(second.trips().len(), 1);
        assert_eq!(second.flights().items(), first.flights().items());
        assert!(second.flights().find(&flight_id).is_some());
    }

    #[test]
    fn test_unseen_state_persists_between_sessions() {
        let backend: Rc<dyn BlobStore> = Rc::new(MemoryStore::new());

        let mut first = planner(&backend);
        first.add_trip(trip("Soon", &in_days(2)), now()).unwrap();
        first.add_trip(trip("Later", &in_days(10)), now()).unwrap();
        assert_eq!(first.notifications().count(), 1);
        assert!(first.notifications().has_unseen());

        let mut second = planner(&backend);
        assert!(second.notifications().has_unseen());
        second.open_notifications().unwrap();
        assert!(!second.notifications().has_unseen());

        let mut third = planner(&backend);
        assert!(!third.notifications().has_unseen());

        third.add_trip(trip("Unrelated", &in_days(90)), now()).unwrap();
        assert!(third.notifications().has_unseen());
    }

    #[test]
    fn test_corrupt_notification_state_ignored() {
        let backend: Rc<dyn BlobStore> = Rc::new(MemoryStore::new());
        backend.set(NotificationState::STORAGE_KEY, "garbage").unwrap();
        let planner = planner(&backend);
        assert!(!planner.notifications().has_unseen());
    }
}
