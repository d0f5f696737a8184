//! Plain-text list views.

use std::fmt::Write;

use crate::flight::Flight;
use crate::notify::NotificationCenter;
use crate::trip::Trip;

/// Shown instead of the trip list when there are no trips.
pub const NO_TRIPS: &str = "No trips added yet.";

/// Shown instead of the flight list when there are no flights.
pub const NO_FLIGHTS: &str = "No flights added yet.";

/// Render trips as a numbered list, one block per trip.
#[must_use]
pub fn render_trips(trips: &[Trip]) -> String {
    if trips.is_empty() {
        return format!("{NO_TRIPS}\n");
    }

    let mut out = String::new();
    for (i, trip) in trips.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, trip.name);
        let _ = writeln!(out, "   Date:     {}", trip.date);
        let _ = writeln!(out, "   Location: {}", trip.location);
        if !trip.description.is_empty() {
            let _ = writeln!(out, "   {}", trip.description);
        }
        let _ = writeln!(out, "   [{}] {}", trip.id, trip.detail_route());
    }
    out
}

/// Render flights as a numbered list, one block per flight.
#[must_use]
pub fn render_flights(flights: &[Flight]) -> String {
    if flights.is_empty() {
        return format!("{NO_FLIGHTS}\n");
    }

    let mut out = String::new();
    for (i, flight) in flights.iter().enumerate() {
        let heading = flight.airline.as_deref().unwrap_or(&flight.flight_number);
        let _ = writeln!(out, "{}. {heading}", i + 1);
        let _ = writeln!(out, "   Flight number: {}", flight.flight_number);
        let _ = writeln!(out, "   Gate:          {}", flight.gate);
        let _ = writeln!(out, "   Departure:     {}", flight.departure_time);
        let _ = writeln!(out, "   Arrival:       {}", flight.arrival_time);
        if let Some(description) = &flight.description {
            let _ = writeln!(out, "   {description}");
        }
        let _ = writeln!(out, "   [{}]", flight.id);
    }
    out
}

/// One-line notification badge, e.g. `Notifications: 2 (new)`.
#[must_use]
pub fn render_badge(center: &NotificationCenter) -> String {
    if center.has_unseen() {
        format!("Notifications: {} (new)", center.count())
    } else {
        format!("Notifications: {}", center.count())
    }
}

/// The popover contents: one line per alert.
#[must_use]
pub fn render_alerts(center: &NotificationCenter) -> String {
    if center.alerts().is_empty() {
        return "No upcoming trips.\n".to_string();
    }

    center
        .alerts()
        .iter()
        .fold(String::new(), |mut out, alert| {
            let _ = writeln!(out, "- {} ({})", alert.message, alert.date);
            out
        })
}
