//! Upcoming-trip notifications.
//!
//! A trip triggers an alert when it starts within the lookahead window:
//! `0 <= ceil((trip date at 00:00 UTC - now) / 1 day) <= lookahead`.
//! Trips whose date doesn't parse never alert.
//!
//! [`NotificationCenter`] holds the derived alerts plus the badge and
//! popover state. The "unseen" flag clears when the popover opens and is
//! recomputed from scratch on the next change to the trip sequence, so
//! dismissal never outlives a mutation.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::record::EntityId;
use crate::store::EntityStore;
use crate::trip::Trip;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Whole days from `now` until the start of `date` (UTC), rounded up.
#[must_use]
pub fn days_until(date: NaiveDate, now: DateTime<Utc>) -> i64 {
    let start = date.and_time(NaiveTime::MIN).and_utc();
    let millis = (start - now).num_milliseconds();
    // Integer division truncates toward zero, which is already the ceiling
    // for negative values
    let days = millis / MILLIS_PER_DAY;
    if millis > 0 && millis % MILLIS_PER_DAY != 0 {
        days + 1
    } else {
        days
    }
}

/// An alert for one upcoming trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    /// The trip's id.
    pub trip_id: EntityId,
    /// The trip's name.
    pub name: String,
    /// The trip's destination.
    pub location: String,
    /// The trip's date.
    pub date: NaiveDate,
    /// Days until the trip starts.
    pub days_until: i64,
    /// Rendered message.
    pub message: String,
}

impl Alert {
    fn new(trip: &Trip, date: NaiveDate, days_until: i64) -> Self {
        let when = match days_until {
            0 => "today".to_string(),
            1 => "tomorrow".to_string(),
            n => format!("in {n} days"),
        };
        Self {
            trip_id: trip.id.clone(),
            name: trip.name.clone(),
            location: trip.location.clone(),
            date,
            days_until,
            message: format!("\"{}\" in {} is {when}", trip.name, trip.location),
        }
    }
}

/// Alerts for every trip starting within `lookahead_days` of `now`, in sequence order.
#[must_use]
pub fn upcoming(trips: &[Trip], now: DateTime<Utc>, lookahead_days: u32) -> Vec<Alert> {
    let horizon = i64::from(lookahead_days);
    trips
        .iter()
        .filter_map(|trip| {
            let date = trip.parsed_date()?;
            let days = days_until(date, now);
            (0..=horizon)
                .contains(&days)
                .then(|| Alert::new(trip, date, days))
        })
        .collect()
}

/// Where a pointer-down event landed, relative to the popover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// Inside the popover.
    Popover,
    /// On the control that toggles the popover.
    Toggle,
    /// Anywhere else.
    Outside,
}

/// Persisted part of the notification state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationState {
    /// Whether there are alerts the user hasn't looked at.
    pub has_unseen: bool,
}

impl NotificationState {
    /// Key the state is persisted under.
    pub const STORAGE_KEY: &'static str = "notifications";
}

/// Derived alert state, badge and popover for the trip view.
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    lookahead_days: u32,
    alerts: Vec<Alert>,
    has_unseen: bool,
    popover_open: bool,
    listening: bool,
    synced_revision: Option<u64>,
}

impl NotificationCenter {
    /// Create an empty center with the given lookahead window.
    #[must_use]
    pub fn new(lookahead_days: u32) -> Self {
        Self {
            lookahead_days,
            alerts: Vec::new(),
            has_unseen: false,
            popover_open: false,
            listening: false,
            synced_revision: None,
        }
    }

    /// Recompute alerts from `trips`.
    ///
    /// If the sequence changed since the last sync (or this is the first
    /// sync) the unseen flag is recomputed: set when any alert exists.
    pub fn sync(&mut self, trips: &EntityStore<Trip>, now: DateTime<Utc>) {
        self.alerts = upcoming(trips.items(), now, self.lookahead_days);
        if self.synced_revision != Some(trips.revision()) {
            self.synced_revision = Some(trips.revision());
            self.has_unseen = !self.alerts.is_empty();
            debug!(
                "Trip sequence changed, {} upcoming trip(s)",
                self.alerts.len()
            );
        }
    }

    /// Recompute alerts from `trips` and restore a previously persisted state
    /// without treating the sequence as changed.
    pub fn resume(
        &mut self,
        trips: &EntityStore<Trip>,
        now: DateTime<Utc>,
        state: NotificationState,
    ) {
        self.alerts = upcoming(trips.items(), now, self.lookahead_days);
        self.synced_revision = Some(trips.revision());
        self.has_unseen = state.has_unseen && !self.alerts.is_empty();
    }

    /// State worth persisting between sessions.
    #[must_use]
    pub fn state(&self) -> NotificationState {
        NotificationState {
            has_unseen: self.has_unseen,
        }
    }

    /// Current alerts.
    #[must_use]
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    /// Badge count.
    #[must_use]
    pub fn count(&self) -> usize {
        self.alerts.len()
    }

    /// Whether there are alerts the user hasn't looked at.
    #[must_use]
    pub fn has_unseen(&self) -> bool {
        self.has_unseen
    }

    /// Whether the popover is open.
    #[must_use]
    pub fn is_popover_open(&self) -> bool {
        self.popover_open
    }

    /// Open or close the popover. Opening marks the alerts as seen.
    pub fn toggle_popover(&mut self) {
        self.popover_open = !self.popover_open;
        if self.popover_open {
            self.has_unseen = false;
        }
    }

    /// Start listening for pointer-down events.
    pub fn attach(&mut self) {
        self.listening = true;
    }

    /// Stop listening for pointer-down events.
    pub fn detach(&mut self) {
        self.listening = false;
    }

    /// Handle a pointer-down event: close the popover when the pointer lands
    /// outside both the popover and its toggle.
    pub fn pointer_down(&mut self, target: PointerTarget) {
        if self.listening && self.popover_open && target == PointerTarget::Outside {
            self.popover_open = false;
        }
    }
}
