//! Integration tests for the CSV record store.
//!
//! These tests verify that:
//! - appended events come back from `recent()` in file order
//! - the day window is inclusive and ignores malformed rows
//! - name lookups still see rows whose date or time is unreadable
//! - the most recent loose match wins
//! - concurrent appends never corrupt the file

use std::fs;
use std::sync::Arc;
use std::thread;

use chrono::{NaiveDate, NaiveDateTime};
use medtrack_core::{MedicationEvent, RecordStore};
use medtrack_store::{CsvRecordStore, MemoryRecordStore};

fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, 30, 0))
        .unwrap_or_default()
}

fn event(when: NaiveDateTime, name: &str, dosage: &str) -> MedicationEvent {
    MedicationEvent::new(when, name, dosage).unwrap_or_else(|| panic!("valid event {name}"))
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 10).unwrap_or_default()
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn test_recent_returns_window_in_file_order() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store =
        CsvRecordStore::open_with_fallback(dir.path().join("meds.csv"), dir.path()).expect("opens");

    let events = vec![
        event(at(2010, 1, 1, 8), "Ancient", "1 pill"),
        event(at(2024, 3, 9, 8), "Aspirin", "10 mg"),
        event(at(2024, 2, 1, 8), "Tylenol", "1 pill"),
        event(at(2024, 3, 3, 20), "Advil", "200 mg"),
        event(at(2024, 3, 10, 7), "Vitamin D", "Not specified"),
    ];
    for e in &events {
        store.append(e).expect("append");
    }

    let everything = store.recent(3650, today()).expect("readable");
    assert_eq!(everything, events[1..].to_vec());

    // Exactly seven days back is still inside the window.
    let week = store.recent(7, today()).expect("readable");
    let names: Vec<_> = week.iter().map(|e| e.medication.as_str()).collect();
    assert_eq!(names, ["Aspirin", "Advil", "Vitamin D"]);
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn test_malformed_rows_are_skipped() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("meds.csv");
    fs::write(
        &path,
        "Date,Time,Medication,Dosage,Notes\n\
         not-a-date,09:00 AM,Broken,1 pill,\n\
         2024-03-09,08:30 AM,Aspirin,10 mg,\n\
         2024-03-09,whenever,Advil,200 mg,\n\
         2024-03-08,07:15 PM,Tylenol,1 pill\n",
    )
    .expect("seed file");

    let store = CsvRecordStore::open_with_fallback(&path, dir.path()).expect("opens");
    let rows = store.recent(30, today()).expect("readable");
    let names: Vec<_> = rows.iter().map(|e| e.medication.as_str()).collect();
    assert_eq!(names, ["Aspirin", "Tylenol"]);

    // Lookups match on the name column alone and echo the row as stored.
    let advil = store
        .most_recent_matching("advil")
        .expect("readable")
        .expect("row with unreadable time is still found");
    assert_eq!(advil.time, "whenever");
    assert_eq!(advil.dosage, "200 mg");
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn test_most_recent_match_wins() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store =
        CsvRecordStore::open_with_fallback(dir.path().join("meds.csv"), dir.path()).expect("opens");

    store
        .append(&event(at(2024, 3, 1, 8), "Aspirin", "10 mg"))
        .expect("append");
    store
        .append(&event(at(2024, 3, 2, 8), "Baby Aspirin", "81 mg"))
        .expect("append");
    store
        .append(&event(at(2024, 3, 3, 8), "Advil", "200 mg"))
        .expect("append");

    let found = store
        .most_recent_matching("ASPIRIN")
        .expect("readable")
        .expect("match exists");
    assert_eq!(found.medication, "Baby Aspirin");
    assert_eq!(found.dosage, "81 mg");

    assert!(store.most_recent_matching("").expect("readable").is_none());
    assert!(store.most_recent_matching("zoloft").expect("readable").is_none());
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn test_concurrent_appends_stay_well_formed() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = Arc::new(
        CsvRecordStore::open_with_fallback(dir.path().join("meds.csv"), dir.path())
            .expect("opens"),
    );

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..25 {
                    let name = format!("Med {worker} {i}, extended release");
                    store
                        .append(&event(at(2024, 3, 9, 9), &name, "1 pill"))
                        .expect("append");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker finished");
    }

    let rows = store.recent(30, today()).expect("readable");
    assert_eq!(rows.len(), 200);
    assert!(rows.iter().all(|e| e.medication.ends_with(", extended release")));
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn test_memory_store_matches_csv_semantics() {
    let store = MemoryRecordStore::new();
    assert!(store.is_empty());

    store
        .append(&event(at(2024, 3, 9, 8), "Aspirin", "10 mg"))
        .expect("append");
    store
        .append(&event(at(2015, 3, 9, 8), "Old", "1 pill"))
        .expect("append");

    assert_eq!(store.len(), 2);
    assert_eq!(store.recent(7, today()).expect("readable").len(), 1);
    assert!(
        store
            .most_recent_matching("my aspirin")
            .expect("readable")
            .is_some()
    );
}
