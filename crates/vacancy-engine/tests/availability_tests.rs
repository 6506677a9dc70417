//! Tests for the availability evaluator: boundaries, next-start lookup,
//! occupied-range completeness and batch ordering.

use vacancy_engine::availability::{
    is_available, status_at, status_for_all_rooms, BoundaryPolicy, Evaluator, Status, StatusResult,
};
use vacancy_engine::{OccupiedInterval, Room, Schedule, TimeOfDay, Weekday};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn t(s: &str) -> TimeOfDay {
    TimeOfDay::parse(s).unwrap()
}

fn iv(start: &str, end: &str) -> OccupiedInterval {
    OccupiedInterval::parse(start, end).unwrap()
}

fn monday(intervals: &[(&str, &str)]) -> Schedule {
    intervals
        .iter()
        .map(|(s, e)| (Weekday::Monday, iv(s, e)))
        .collect()
}

// ── Absent / empty schedules ────────────────────────────────────────────────

#[test]
fn no_schedule_is_open_all_day() {
    for time in ["00:00", "09:00", "23:59"] {
        assert_eq!(
            status_at(None, Weekday::Monday, t(time)),
            StatusResult::Open { available_until: None }
        );
        assert!(is_available(None, Weekday::Monday, t(time)));
    }
}

#[test]
fn day_without_entry_is_open() {
    let schedule = monday(&[("09:00", "10:00")]);
    let result = status_at(Some(&schedule), Weekday::Tuesday, t("09:30"));
    assert_eq!(result, StatusResult::Open { available_until: None });
}

#[test]
fn empty_schedule_is_open() {
    let schedule = Schedule::new();
    assert!(status_at(Some(&schedule), Weekday::Friday, t("12:00")).is_open());
}

// ── Half-open boundary law ──────────────────────────────────────────────────

#[test]
fn half_open_boundaries() {
    let schedule = monday(&[("09:00", "10:00")]);
    let at = |time| status_at(Some(&schedule), Weekday::Monday, t(time)).status();

    assert_eq!(at("08:59"), Status::Open);
    assert_eq!(at("09:00"), Status::Occupied);
    assert_eq!(at("09:59"), Status::Occupied);
    assert_eq!(at("10:00"), Status::Open);
}

#[test]
fn instant_on_end_does_not_count_as_next_start() {
    let schedule = monday(&[("09:00", "10:00")]);
    let result = status_at(Some(&schedule), Weekday::Monday, t("10:00"));
    assert_eq!(result, StatusResult::Open { available_until: None });
}

#[test]
fn back_to_back_intervals_stay_occupied_at_the_seam() {
    let schedule = monday(&[("09:00", "10:00"), ("10:00", "11:00")]);
    let result = status_at(Some(&schedule), Weekday::Monday, t("10:00"));
    assert_eq!(result.status(), Status::Occupied);
}

// ── availableUntil ──────────────────────────────────────────────────────────

#[test]
fn available_until_is_next_start() {
    let schedule = monday(&[("09:00", "10:00"), ("14:00", "15:00")]);
    let until = |time| status_at(Some(&schedule), Weekday::Monday, t(time)).available_until();

    assert_eq!(until("08:00"), Some(t("09:00")));
    assert_eq!(until("10:30"), Some(t("14:00")));
    assert_eq!(until("16:00"), None);
}

#[test]
fn gap_between_intervals_is_open() {
    let schedule = monday(&[("09:00", "10:00"), ("14:00", "15:00")]);
    let result = status_at(Some(&schedule), Weekday::Monday, t("12:30"));
    assert_eq!(
        result,
        StatusResult::Open {
            available_until: Some(t("14:00"))
        }
    );
}

#[test]
fn available_until_ignores_list_order() {
    let schedule = monday(&[("16:00", "17:00"), ("11:00", "12:00"), ("13:00", "14:00")]);
    let result = status_at(Some(&schedule), Weekday::Monday, t("10:00"));
    assert_eq!(result.available_until(), Some(t("11:00")));
}

// ── occupiedRanges ──────────────────────────────────────────────────────────

#[test]
fn single_covering_interval_reports_one_range() {
    let schedule = monday(&[("12:00", "13:00")]);
    let result = status_at(Some(&schedule), Weekday::Monday, t("12:30"));
    assert_eq!(result.status(), Status::Occupied);
    assert_eq!(result.occupied_ranges(), &[iv("12:00", "13:00")]);
    assert_eq!(result.available_until(), None);
}

#[test]
fn occupied_reports_full_day_list_unfiltered() {
    let schedule = monday(&[("15:00", "16:00"), ("12:00", "13:00")]);
    let result = status_at(Some(&schedule), Weekday::Monday, t("12:30"));
    assert_eq!(
        result,
        StatusResult::Occupied {
            occupied_ranges: vec![iv("15:00", "16:00"), iv("12:00", "13:00")]
        }
    );
}

#[test]
fn overlapping_intervals_classify_as_occupied() {
    let schedule = monday(&[("09:00", "11:00"), ("10:00", "12:00")]);
    assert!(!is_available(Some(&schedule), Weekday::Monday, t("10:30")));
    assert!(!is_available(Some(&schedule), Weekday::Monday, t("11:30")));
    assert!(is_available(Some(&schedule), Weekday::Monday, t("12:00")));
}

#[test]
fn occupied_until_takes_latest_covering_end() {
    let schedule = monday(&[("09:00", "11:00"), ("10:00", "12:00"), ("13:00", "14:00")]);
    let evaluator = Evaluator::default();
    assert_eq!(
        evaluator.occupied_until(Some(&schedule), Weekday::Monday, t("10:30")),
        Some(t("12:00"))
    );
    assert_eq!(
        evaluator.occupied_until(Some(&schedule), Weekday::Monday, t("09:30")),
        Some(t("11:00"))
    );
    assert_eq!(
        evaluator.occupied_until(Some(&schedule), Weekday::Monday, t("12:30")),
        None
    );
}

// ── Inclusive-end policy ────────────────────────────────────────────────────

#[test]
fn inclusive_end_policy_occupies_end_minute() {
    let schedule = monday(&[("09:00", "10:00"), ("14:00", "15:00")]);
    let legacy = Evaluator::new(BoundaryPolicy::InclusiveEnd);

    assert!(!legacy.is_available(Some(&schedule), Weekday::Monday, t("10:00")));
    assert!(legacy.is_available(Some(&schedule), Weekday::Monday, t("10:01")));
    assert_eq!(
        legacy
            .status_at(Some(&schedule), Weekday::Monday, t("10:01"))
            .available_until(),
        Some(t("14:00"))
    );
}

// ── Batch ───────────────────────────────────────────────────────────────────

#[test]
fn batch_mirrors_input_order() {
    let rooms = vec![
        Room::new("Test Building", "103").with_schedule(monday(&[("12:00", "13:00"), ("15:00", "16:00")])),
        Room::new("Test Building", "101"),
        Room::new("Test Building", "102").with_schedule(monday(&[("09:00", "10:00"), ("14:00", "15:00")])),
    ];

    let statuses = status_for_all_rooms(&rooms, Weekday::Monday, t("12:30"));
    let ids: Vec<&str> = statuses.iter().map(|s| s.room.as_str()).collect();
    assert_eq!(ids, vec!["103", "101", "102"]);

    assert_eq!(statuses[0].result.status(), Status::Occupied);
    assert_eq!(statuses[0].result.occupied_ranges().len(), 2);
    assert_eq!(statuses[1].result, StatusResult::Open { available_until: None });
    assert_eq!(statuses[2].result.available_until(), Some(t("14:00")));
}

#[test]
fn batch_after_last_class_is_free_for_rest_of_day() {
    let rooms = vec![
        Room::new("Test Building", "102").with_schedule(monday(&[("09:00", "10:00"), ("14:00", "15:00")])),
        Room::new("Test Building", "103").with_schedule(monday(&[("12:00", "13:00"), ("15:00", "16:00")])),
    ];
    for status in status_for_all_rooms(&rooms, Weekday::Monday, t("16:30")) {
        assert_eq!(status.result, StatusResult::Open { available_until: None });
    }
}

#[test]
fn empty_batch_is_empty() {
    assert!(status_for_all_rooms(&[], Weekday::Monday, t("12:00")).is_empty());
}

#[cfg(feature = "rayon")]
#[test]
fn parallel_batch_matches_sequential() {
    let rooms: Vec<Room> = (0..64)
        .map(|i| {
            let start = TimeOfDay::from_minutes(8 * 60 + i * 7).unwrap();
            let end = TimeOfDay::from_minutes(9 * 60 + i * 7).unwrap();
            let schedule = Schedule::new().with(Weekday::Wednesday, OccupiedInterval::new(start, end).unwrap());
            Room::new("Loomis", format!("{}", 100 + i)).with_schedule(schedule)
        })
        .collect();

    let evaluator = Evaluator::default();
    assert_eq!(
        evaluator.status_for_all_rooms_par(&rooms, Weekday::Wednesday, t("10:00")),
        evaluator.status_for_all_rooms(&rooms, Weekday::Wednesday, t("10:00"))
    );
}

// ── Wire format ─────────────────────────────────────────────────────────────

#[test]
fn room_status_serializes_with_wire_field_names() {
    let rooms = vec![
        Room::new("B", "101"),
        Room::new("B", "103").with_schedule(monday(&[("12:00", "13:00")])),
    ];
    let statuses = status_for_all_rooms(&rooms, Weekday::Monday, t("12:30"));
    let json = serde_json::to_value(&statuses).unwrap();

    assert_eq!(
        json,
        serde_json::json!([
            {"roomNumber": "101", "status": "OPEN", "availableUntil": null},
            {"roomNumber": "103", "status": "OCCUPIED",
             "occupiedRanges": [{"start": "12:00", "end": "13:00"}]}
        ])
    );
}
