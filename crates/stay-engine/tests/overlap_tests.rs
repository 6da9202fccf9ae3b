//! Tests for the interval overlap checker.

use stay_engine::{find_overlaps, has_overlap, BookedRange, BookingId, DateRange};

fn booked(id: u64, start: &str, end: &str) -> BookedRange {
    BookedRange {
        id: BookingId(id),
        range: DateRange::parse(start, end).unwrap(),
    }
}

fn range(start: &str, end: &str) -> DateRange {
    DateRange::parse(start, end).unwrap()
}

#[test]
fn empty_existing_no_conflict() {
    let candidate = range("2024-03-01", "2024-03-05");
    assert!(find_overlaps(&candidate, &[], None).is_empty());
    assert!(!has_overlap(&candidate, &[], None));
}

#[test]
fn partial_overlap_detected() {
    // Existing 03-01..03-05, candidate 03-03..03-07 → 3 shared days.
    let existing = vec![booked(1, "2024-03-01", "2024-03-05")];
    let candidate = range("2024-03-03", "2024-03-07");

    let overlaps = find_overlaps(&candidate, &existing, None);

    assert_eq!(overlaps.len(), 1);
    assert_eq!(overlaps[0].booking.id, BookingId(1));
    assert_eq!(overlaps[0].shared_days, 3);
    assert!(has_overlap(&candidate, &existing, None));
}

#[test]
fn start_on_existing_end_is_conflict() {
    let existing = vec![booked(1, "2024-03-01", "2024-03-05")];
    let candidate = range("2024-03-05", "2024-03-09");

    assert!(
        has_overlap(&candidate, &existing, None),
        "candidate starting on an existing booking's last day must conflict"
    );
}

#[test]
fn end_on_existing_start_is_conflict() {
    let existing = vec![booked(1, "2024-03-10", "2024-03-15")];
    let candidate = range("2024-03-07", "2024-03-10");

    assert!(has_overlap(&candidate, &existing, None));
}

#[test]
fn identical_range_is_conflict() {
    let existing = vec![booked(7, "2024-03-01", "2024-03-05")];
    let candidate = range("2024-03-01", "2024-03-05");

    let overlaps = find_overlaps(&candidate, &existing, None);
    assert_eq!(overlaps.len(), 1);
    assert_eq!(overlaps[0].shared_days, 5);
}

#[test]
fn excluded_booking_is_skipped() {
    let existing = vec![booked(7, "2024-03-01", "2024-03-05")];
    let candidate = range("2024-03-02", "2024-03-08");

    assert!(find_overlaps(&candidate, &existing, Some(BookingId(7))).is_empty());
    assert!(!has_overlap(&candidate, &existing, Some(BookingId(7))));
}

#[test]
fn exclusion_only_skips_that_booking() {
    let existing = vec![
        booked(7, "2024-03-01", "2024-03-05"),
        booked(8, "2024-03-07", "2024-03-09"),
    ];
    let candidate = range("2024-03-02", "2024-03-08");

    let overlaps = find_overlaps(&candidate, &existing, Some(BookingId(7)));
    assert_eq!(overlaps.len(), 1);
    assert_eq!(overlaps[0].booking.id, BookingId(8));
}

#[test]
fn unsorted_input_finds_all_conflicts_in_input_order() {
    let existing = vec![
        booked(3, "2024-05-10", "2024-05-12"),
        booked(1, "2024-01-01", "2024-01-05"),
        booked(2, "2024-05-01", "2024-05-04"),
    ];
    let candidate = range("2024-05-03", "2024-05-11");

    let ids: Vec<BookingId> = find_overlaps(&candidate, &existing, None)
        .iter()
        .map(|o| o.booking.id)
        .collect();

    assert_eq!(ids, vec![BookingId(3), BookingId(2)]);
}

#[test]
fn candidate_enclosing_existing_reports_existing_length() {
    let existing = vec![booked(1, "2024-03-10", "2024-03-12")];
    let candidate = range("2024-03-01", "2024-03-31");

    let overlaps = find_overlaps(&candidate, &existing, None);
    assert_eq!(overlaps[0].shared_days, 3);
}
