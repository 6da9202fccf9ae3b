//! Tests for the booking workflow: create, update, delete and availability views.

use chrono::NaiveDate;
use stay_engine::AvailabilityError;
use stay_ledger::{
    BookingId, BookingUpdate, DateRange, Ledger, LedgerError, NewBooking, NewProperty,
    PropertyFilter, PropertyId,
};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn range(start: &str, end: &str) -> DateRange {
    DateRange::parse(start, end).unwrap()
}

fn ledger_with_property() -> (Ledger, PropertyId) {
    let ledger = Ledger::new();
    let property = ledger.add_property(NewProperty {
        title: "Test Property".to_string(),
        description: "Test description".to_string(),
        availability_window: range("2024-01-01", "2024-12-31"),
    });
    (ledger, property.id)
}

fn book(ledger: &Ledger, property_id: PropertyId, start: &str, end: &str) -> BookingId {
    ledger
        .create_booking(NewBooking {
            property_id,
            guest_name: "John Doe".to_string(),
            range: range(start, end),
        })
        .unwrap()
        .id
}

// ── check_availability ──────────────────────────────────────────────────────

#[test]
fn available_dates_pass_check() {
    let (ledger, pid) = ledger_with_property();
    assert!(ledger
        .check_availability(pid, &range("2024-03-01", "2024-03-05"), None)
        .is_ok());
}

#[test]
fn unknown_property_is_reported() {
    let (ledger, _) = ledger_with_property();
    let err = ledger
        .check_availability(PropertyId(999), &range("2024-03-01", "2024-03-05"), None)
        .unwrap_err();
    assert!(matches!(err, LedgerError::PropertyNotFound(PropertyId(999))));
    assert_eq!(err.to_string(), "Property not found: 999");
}

#[test]
fn dates_outside_window_are_reported() {
    let (ledger, pid) = ledger_with_property();
    let err = ledger
        .check_availability(pid, &range("2023-12-01", "2023-12-05"), None)
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Availability(AvailabilityError::OutOfWindow { .. })
    ));
}

#[test]
fn overlapping_dates_are_reported() {
    let (ledger, pid) = ledger_with_property();
    book(&ledger, pid, "2024-03-01", "2024-03-05");

    let err = ledger
        .check_availability(pid, &range("2024-03-03", "2024-03-07"), None)
        .unwrap_err();

    assert!(matches!(
        err,
        LedgerError::Availability(AvailabilityError::Overlap { .. })
    ));
    assert!(err.to_string().contains("overlap with an existing booking"));
}

// ── create / get / delete ───────────────────────────────────────────────────

#[test]
fn create_booking_assigns_id_and_stores_it() {
    let (ledger, pid) = ledger_with_property();

    let booking = ledger
        .create_booking(NewBooking {
            property_id: pid,
            guest_name: "John Doe".to_string(),
            range: range("2024-03-01", "2024-03-05"),
        })
        .unwrap();

    assert_eq!(booking.property_id, pid);
    assert_eq!(booking.guest_name, "John Doe");
    assert_eq!(booking.range.start(), date("2024-03-01"));
    assert_eq!(ledger.get_booking(booking.id).unwrap(), booking);
    assert_eq!(ledger.list_bookings(pid).unwrap(), vec![booking]);
}

#[test]
fn back_to_back_booking_is_rejected() {
    let (ledger, pid) = ledger_with_property();
    book(&ledger, pid, "2024-03-01", "2024-03-05");

    let result = ledger.create_booking(NewBooking {
        property_id: pid,
        guest_name: "Jane Smith".to_string(),
        range: range("2024-03-05", "2024-03-08"),
    });

    assert!(result.is_err(), "checkout day is not free for a new check-in");
    assert_eq!(ledger.list_bookings(pid).unwrap().len(), 1);
}

#[test]
fn booking_for_unknown_property_is_rejected() {
    let (ledger, _) = ledger_with_property();
    let err = ledger
        .create_booking(NewBooking {
            property_id: PropertyId(42),
            guest_name: "John Doe".to_string(),
            range: range("2024-03-01", "2024-03-05"),
        })
        .unwrap_err();
    assert!(matches!(err, LedgerError::PropertyNotFound(PropertyId(42))));
}

#[test]
fn delete_booking_frees_its_dates() {
    let (ledger, pid) = ledger_with_property();
    let id = book(&ledger, pid, "2024-03-01", "2024-03-05");

    ledger.delete_booking(id).unwrap();

    assert!(matches!(
        ledger.get_booking(id),
        Err(LedgerError::BookingNotFound(_))
    ));
    assert!(ledger.list_bookings(pid).unwrap().is_empty());
    book(&ledger, pid, "2024-03-01", "2024-03-05");
}

#[test]
fn delete_missing_booking_fails() {
    let (ledger, _) = ledger_with_property();
    let err = ledger.delete_booking(BookingId(999)).unwrap_err();
    assert_eq!(err.to_string(), "Booking not found: 999");
}

// ── update ──────────────────────────────────────────────────────────────────

#[test]
fn update_guest_name_only_keeps_dates() {
    let (ledger, pid) = ledger_with_property();
    let id = book(&ledger, pid, "2024-03-01", "2024-03-05");

    let updated = ledger
        .update_booking(
            id,
            BookingUpdate {
                guest_name: Some("Jane Smith".to_string()),
                ..BookingUpdate::default()
            },
        )
        .unwrap();

    assert_eq!(updated.guest_name, "Jane Smith");
    assert_eq!(updated.range, range("2024-03-01", "2024-03-05"));
}

#[test]
fn update_overlapping_only_own_prior_dates_passes() {
    let (ledger, pid) = ledger_with_property();
    let id = book(&ledger, pid, "2024-03-01", "2024-03-05");

    let updated = ledger
        .update_booking(
            id,
            BookingUpdate {
                start: Some(date("2024-03-03")),
                end: Some(date("2024-03-09")),
                ..BookingUpdate::default()
            },
        )
        .unwrap();

    assert_eq!(updated.range, range("2024-03-03", "2024-03-09"));
}

#[test]
fn update_with_only_end_date_uses_stored_start() {
    let (ledger, pid) = ledger_with_property();
    let id = book(&ledger, pid, "2024-03-01", "2024-03-05");

    let updated = ledger
        .update_booking(
            id,
            BookingUpdate {
                end: Some(date("2024-03-10")),
                ..BookingUpdate::default()
            },
        )
        .unwrap();

    assert_eq!(updated.range, range("2024-03-01", "2024-03-10"));
}

#[test]
fn update_into_another_booking_is_rejected_and_unchanged() {
    let (ledger, pid) = ledger_with_property();
    let first = book(&ledger, pid, "2024-03-01", "2024-03-05");
    book(&ledger, pid, "2024-03-10", "2024-03-12");

    let err = ledger
        .update_booking(
            first,
            BookingUpdate {
                end: Some(date("2024-03-10")),
                guest_name: Some("Jane Smith".to_string()),
                ..BookingUpdate::default()
            },
        )
        .unwrap_err();

    assert!(matches!(
        err,
        LedgerError::Availability(AvailabilityError::Overlap { .. })
    ));
    let stored = ledger.get_booking(first).unwrap();
    assert_eq!(stored.range, range("2024-03-01", "2024-03-05"));
    assert_eq!(stored.guest_name, "John Doe");
}

#[test]
fn update_to_inverted_range_is_rejected() {
    let (ledger, pid) = ledger_with_property();
    let id = book(&ledger, pid, "2024-03-01", "2024-03-05");

    let err = ledger
        .update_booking(
            id,
            BookingUpdate {
                start: Some(date("2024-03-06")),
                ..BookingUpdate::default()
            },
        )
        .unwrap_err();

    assert!(matches!(
        err,
        LedgerError::Availability(AvailabilityError::InvalidRange { .. })
    ));
    assert_eq!(
        ledger.get_booking(id).unwrap().range,
        DateRange::parse("2024-03-01", "2024-03-05").unwrap()
    );
}

#[test]
fn update_missing_booking_fails() {
    let (ledger, _) = ledger_with_property();
    let err = ledger
        .update_booking(BookingId(999), BookingUpdate::default())
        .unwrap_err();
    assert!(matches!(err, LedgerError::BookingNotFound(BookingId(999))));
}

// ── availability views ──────────────────────────────────────────────────────

#[test]
fn free_ranges_without_bookings_is_whole_window() {
    let (ledger, pid) = ledger_with_property();

    let free = ledger.free_ranges(pid).unwrap();

    assert_eq!(free.len(), 1);
    assert_eq!(free[0].start, date("2024-01-01"));
    assert_eq!(free[0].end, date("2024-12-31"));
}

#[test]
fn free_ranges_around_a_booking() {
    let (ledger, pid) = ledger_with_property();
    book(&ledger, pid, "2024-06-01", "2024-06-05");

    let free = ledger.free_ranges(pid).unwrap();

    assert_eq!(free.len(), 2);
    assert_eq!((free[0].start, free[0].end), (date("2024-01-01"), date("2024-05-31")));
    assert_eq!((free[1].start, free[1].end), (date("2024-06-06"), date("2024-12-31")));
}

#[test]
fn calendar_for_unknown_property_fails() {
    let (ledger, _) = ledger_with_property();
    assert!(matches!(
        ledger.calendar(PropertyId(5)),
        Err(LedgerError::PropertyNotFound(_))
    ));
}

#[test]
fn shrinking_window_does_not_touch_existing_bookings() {
    let (ledger, pid) = ledger_with_property();
    let id = book(&ledger, pid, "2024-11-01", "2024-11-05");

    ledger
        .set_availability_window(pid, range("2024-01-01", "2024-06-30"))
        .unwrap();

    assert!(ledger.get_booking(id).is_ok());
    let calendar = ledger.calendar(pid).unwrap();
    assert!(calendar.booked.is_empty(), "booking now lies outside the window");
    assert_eq!(calendar.free.len(), 1);
}

// ── property listing ────────────────────────────────────────────────────────

#[test]
fn list_properties_filters_on_window_and_orders_newest_first() {
    let ledger = Ledger::new();
    let spring = ledger.add_property(NewProperty {
        title: "Spring".to_string(),
        description: String::new(),
        availability_window: range("2025-03-01", "2025-05-31"),
    });
    let year = ledger.add_property(NewProperty {
        title: "Year".to_string(),
        description: String::new(),
        availability_window: range("2025-01-01", "2025-12-31"),
    });

    let all = ledger.list_properties(&PropertyFilter::default());
    assert_eq!(
        all.iter().map(|p| p.id).collect::<Vec<_>>(),
        vec![year.id, spring.id]
    );

    let open_in_february = ledger.list_properties(&PropertyFilter {
        available_from: Some(date("2025-02-01")),
        available_to: None,
    });
    assert_eq!(open_in_february, vec![year.clone()]);

    let open_through_may = ledger.list_properties(&PropertyFilter {
        available_from: Some(date("2025-03-01")),
        available_to: Some(date("2025-05-31")),
    });
    assert_eq!(open_through_may.len(), 2);

    let open_in_december = ledger.list_properties(&PropertyFilter {
        available_from: None,
        available_to: Some(date("2025-12-01")),
    });
    assert_eq!(open_in_december, vec![year]);
}
