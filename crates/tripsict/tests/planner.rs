//! End-to-end tests over an on-disk database.

use std::path::PathBuf;
use std::rc::Rc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use tripsict::{Config, FlightDraft, Planner, SqliteStore, TripDraft};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2031, 7, 10, 18, 30, 0).unwrap()
}

fn in_days(days: i64) -> String {
    (now().date_naive() + Duration::days(days)).to_string()
}

fn db_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("tripsict_it_{}_{}.db", name, std::process::id()))
}

fn cleanup(path: &PathBuf) {
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{}", path.display(), suffix));
    }
}

fn open(path: &PathBuf) -> Planner {
    let store = Rc::new(SqliteStore::open(path).unwrap());
    Planner::load(store, &Config::default(), now()).unwrap()
}

fn trip(name: &str, date: &str, location: &str) -> TripDraft {
    TripDraft {
        name: Some(name.to_string()),
        date: Some(date.to_string()),
        description: None,
        location: Some(location.to_string()),
    }
}

#[test]
fn trips_are_sorted_and_survive_reopen() {
    let path = db_path("sorted");
    cleanup(&path);

    {
        let mut planner = open(&path);
        planner.add_trip(trip("Late", &in_days(30), "Oslo"), now()).unwrap();
        planner.add_trip(trip("Early", &in_days(1), "Bergen"), now()).unwrap();
        planner.add_trip(trip("Middle", &in_days(5), "Tromso"), now()).unwrap();
    }

    let planner = open(&path);
    let names: Vec<_> = planner.trips().items().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Early", "Middle", "Late"]);

    cleanup(&path);
}

#[test]
fn notifications_follow_trip_changes() {
    let path = db_path("notify");
    cleanup(&path);

    let mut planner = open(&path);
    let soon = planner.add_trip(trip("Soon", &in_days(2), "Lisbon"), now()).unwrap();
    planner.add_trip(trip("Far", &in_days(10), "Quito"), now()).unwrap();

    let alerts = planner.notifications().alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].days_until, 2);
    assert_eq!(alerts[0].message, "\"Soon\" in Lisbon is in 2 days");
    assert!(planner.notifications().has_unseen());

    planner.open_notifications().unwrap();
    assert!(!planner.notifications().has_unseen());

    planner.delete_trip(&soon, now()).unwrap();
    assert_eq!(planner.notifications().count(), 0);

    drop(planner);
    let reopened = open(&path);
    assert_eq!(reopened.trips().len(), 1);
    assert_eq!(reopened.notifications().count(), 0);

    cleanup(&path);
}

#[test]
fn flights_keep_insertion_order_and_merge_edits() {
    let path = db_path("flights");
    cleanup(&path);

    let mut planner = open(&path);
    let first = planner
        .add_flight(FlightDraft {
            airline: None,
            flight_number: Some("SK4035".to_string()),
            gate: Some("A3".to_string()),
            departure_time: Some("06:15".to_string()),
            arrival_time: Some("07:10".to_string()),
            description: None,
        })
        .unwrap();
    planner
        .add_flight(FlightDraft {
            airline: Some("Norwegian".to_string()),
            flight_number: Some("DY600".to_string()),
            gate: Some("C9".to_string()),
            departure_time: Some("12:00".to_string()),
            arrival_time: Some("13:05".to_string()),
            description: Some("window seat".to_string()),
        })
        .unwrap();

    planner
        .edit_flight(
            &first,
            FlightDraft {
                gate: Some("B1".to_string()),
                ..FlightDraft::default()
            },
        )
        .unwrap();

    drop(planner);
    let planner = open(&path);
    let numbers: Vec<_> = planner
        .flights()
        .items()
        .iter()
        .map(|f| f.flight_number.as_str())
        .collect();
    assert_eq!(numbers, vec!["SK4035", "DY600"]);

    let edited = planner.flights().find(&first).unwrap();
    assert_eq!(edited.gate, "B1");
    assert_eq!(edited.departure_time, "06:15");

    cleanup(&path);
}

#[test]
fn shared_store_reports_entity_writes_only() {
    let path = db_path("status");
    cleanup(&path);

    let store = Rc::new(SqliteStore::open(&path).unwrap());
    let mut planner = Planner::load(store.clone(), &Config::default(), now()).unwrap();
    planner.add_trip(trip("Soon", &in_days(3), "Faro"), now()).unwrap();

    let before = store.stats().unwrap();
    assert_eq!(before.blob_count, 1);
    assert!(before.last_write.is_some());

    planner.open_notifications().unwrap();
    let after = store.stats().unwrap();
    assert_eq!(after.blob_count, 1);
    assert_eq!(after.last_write, before.last_write);

    drop(planner);
    drop(store);
    cleanup(&path);
}
