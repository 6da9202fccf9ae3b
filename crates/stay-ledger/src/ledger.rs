//! The in-memory property and booking ledger.
//!
//! Each property's record and bookings live in one `DashMap` entry. Booking
//! writes take that entry's exclusive guard, run the availability check and
//! apply the change before releasing it, so validation and persistence form
//! one atomic step per property. Two concurrent requests for overlapping dates
//! can never both be accepted.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use stay_engine::{
    availability_calendar, compute_free_ranges, validate_booking, AvailabilityCalendar,
    BookedRange, BookingId, DateRange, FreeRange,
};
use tracing::{debug, info, warn};

use crate::error::{LedgerError, Result};
use crate::model::{
    Booking, BookingUpdate, NewBooking, NewProperty, Property, PropertyFilter, PropertyId,
};
use crate::snapshot::LedgerSnapshot;

#[derive(Debug, Clone)]
struct PropertyState {
    property: Property,
    bookings: Vec<Booking>,
}

impl PropertyState {
    fn booked_ranges(&self) -> Vec<BookedRange> {
        self.bookings.iter().map(Booking::booked_range).collect()
    }

    fn date_ranges(&self) -> Vec<DateRange> {
        self.bookings.iter().map(|b| b.range).collect()
    }
}

#[derive(Debug)]
pub struct Ledger {
    properties: DashMap<PropertyId, PropertyState>,
    /// Reverse lookup: booking id → owning property.
    booking_index: DashMap<BookingId, PropertyId>,
    next_property_id: AtomicU64,
    next_booking_id: AtomicU64,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            properties: DashMap::new(),
            booking_index: DashMap::new(),
            next_property_id: AtomicU64::new(1),
            next_booking_id: AtomicU64::new(1),
        }
    }

    // ── Properties ──────────────────────────────────────────────────────

    pub fn add_property(&self, new: NewProperty) -> Property {
        let id = PropertyId(self.next_property_id.fetch_add(1, Ordering::Relaxed));
        let property = Property {
            id,
            title: new.title,
            description: new.description,
            availability_window: new.availability_window,
        };
        self.properties.insert(
            id,
            PropertyState {
                property: property.clone(),
                bookings: Vec::new(),
            },
        );
        info!(property_id = %id, window = %property.availability_window, "property added");
        property
    }

    pub fn get_property(&self, id: PropertyId) -> Result<Property> {
        self.properties
            .get(&id)
            .map(|state| state.property.clone())
            .ok_or(LedgerError::PropertyNotFound(id))
    }

    /// Replace a property's availability window.
    ///
    /// Existing bookings are not re-checked against the new window.
    pub fn set_availability_window(&self, id: PropertyId, window: DateRange) -> Result<Property> {
        let mut state = self
            .properties
            .get_mut(&id)
            .ok_or(LedgerError::PropertyNotFound(id))?;
        state.property.availability_window = window;
        info!(property_id = %id, window = %window, "availability window changed");
        Ok(state.property.clone())
    }

    /// Properties matching `filter`, newest first.
    pub fn list_properties(&self, filter: &PropertyFilter) -> Vec<Property> {
        let mut properties: Vec<Property> = self
            .properties
            .iter()
            .filter(|entry| filter.matches(&entry.property))
            .map(|entry| entry.property.clone())
            .collect();
        properties.sort_by(|a, b| b.id.cmp(&a.id));
        properties
    }

    // ── Bookings ────────────────────────────────────────────────────────

    /// All bookings of a property, in creation order.
    pub fn list_bookings(&self, property_id: PropertyId) -> Result<Vec<Booking>> {
        self.properties
            .get(&property_id)
            .map(|state| state.bookings.clone())
            .ok_or(LedgerError::PropertyNotFound(property_id))
    }

    pub fn get_booking(&self, id: BookingId) -> Result<Booking> {
        let property_id = self.owner_of(id)?;
        self.properties
            .get(&property_id)
            .and_then(|state| state.bookings.iter().find(|b| b.id == id).cloned())
            .ok_or(LedgerError::BookingNotFound(id))
    }

    /// Advisory check of `candidate` against the property's current state.
    ///
    /// Nothing is reserved: a later [`Ledger::create_booking`] re-runs the
    /// check under the property's lock.
    pub fn check_availability(
        &self,
        property_id: PropertyId,
        candidate: &DateRange,
        exclude: Option<BookingId>,
    ) -> Result<()> {
        let state = self
            .properties
            .get(&property_id)
            .ok_or(LedgerError::PropertyNotFound(property_id))?;
        validate_booking(
            &state.property.availability_window,
            &state.booked_ranges(),
            candidate,
            exclude,
        )?;
        Ok(())
    }

    pub fn create_booking(&self, new: NewBooking) -> Result<Booking> {
        let property_id = new.property_id;
        let mut state = self
            .properties
            .get_mut(&property_id)
            .ok_or(LedgerError::PropertyNotFound(property_id))?;

        if let Err(e) = validate_booking(
            &state.property.availability_window,
            &state.booked_ranges(),
            &new.range,
            None,
        ) {
            warn!(property_id = %property_id, range = %new.range, error = %e, "booking rejected");
            return Err(e.into());
        }

        let booking = Booking {
            id: BookingId(self.next_booking_id.fetch_add(1, Ordering::Relaxed)),
            property_id,
            guest_name: new.guest_name,
            range: new.range,
        };
        state.bookings.push(booking.clone());
        self.booking_index.insert(booking.id, property_id);

        info!(
            booking_id = %booking.id,
            property_id = %property_id,
            range = %booking.range,
            "booking created"
        );
        Ok(booking)
    }

    /// Apply a partial update.
    ///
    /// When either date changes, the new range is validated with the booking's
    /// own previous dates excluded from the conflict check.
    pub fn update_booking(&self, id: BookingId, update: BookingUpdate) -> Result<Booking> {
        let property_id = self.owner_of(id)?;
        let mut state = self
            .properties
            .get_mut(&property_id)
            .ok_or(LedgerError::PropertyNotFound(property_id))?;
        let position = state
            .bookings
            .iter()
            .position(|b| b.id == id)
            .ok_or(LedgerError::BookingNotFound(id))?;

        let current = state.bookings[position].range;
        let range = if update.changes_dates() {
            let range = match DateRange::new(
                update.start.unwrap_or(current.start()),
                update.end.unwrap_or(current.end()),
            ) {
                Ok(range) => range,
                Err(e) => {
                    warn!(booking_id = %id, error = %e, "booking update rejected");
                    return Err(e.into());
                }
            };
            if let Err(e) = validate_booking(
                &state.property.availability_window,
                &state.booked_ranges(),
                &range,
                Some(id),
            ) {
                warn!(booking_id = %id, range = %range, error = %e, "booking update rejected");
                return Err(e.into());
            }
            range
        } else {
            current
        };

        let booking = &mut state.bookings[position];
        booking.range = range;
        if let Some(guest_name) = update.guest_name {
            booking.guest_name = guest_name;
        }

        info!(booking_id = %id, property_id = %property_id, range = %range, "booking updated");
        Ok(booking.clone())
    }

    pub fn delete_booking(&self, id: BookingId) -> Result<()> {
        let (_, property_id) = self
            .booking_index
            .remove(&id)
            .ok_or(LedgerError::BookingNotFound(id))?;
        if let Some(mut state) = self.properties.get_mut(&property_id) {
            state.bookings.retain(|b| b.id != id);
        }
        info!(booking_id = %id, property_id = %property_id, "booking cancelled");
        Ok(())
    }

    // ── Availability views ──────────────────────────────────────────────

    pub fn free_ranges(&self, property_id: PropertyId) -> Result<Vec<FreeRange>> {
        let state = self
            .properties
            .get(&property_id)
            .ok_or(LedgerError::PropertyNotFound(property_id))?;
        Ok(compute_free_ranges(
            &state.property.availability_window,
            &state.date_ranges(),
        ))
    }

    pub fn calendar(&self, property_id: PropertyId) -> Result<AvailabilityCalendar> {
        let state = self
            .properties
            .get(&property_id)
            .ok_or(LedgerError::PropertyNotFound(property_id))?;
        Ok(availability_calendar(
            &state.property.availability_window,
            &state.date_ranges(),
        ))
    }

    // ── Snapshots ───────────────────────────────────────────────────────

    /// Rebuild a ledger from a snapshot.
    ///
    /// Persisted bookings are trusted as-is and not checked against each
    /// other. A booking pointing at an unknown property, or a property or
    /// booking id that appears twice, is refused.
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Result<Self> {
        let ledger = Self::new();
        let mut max_property = 0;
        let mut max_booking = 0;

        for property in snapshot.properties {
            let id = property.id;
            max_property = max_property.max(id.0);
            let previous = ledger.properties.insert(
                id,
                PropertyState {
                    property,
                    bookings: Vec::new(),
                },
            );
            if previous.is_some() {
                return Err(LedgerError::DuplicateProperty(id));
            }
        }
        for booking in snapshot.bookings {
            let mut state = ledger
                .properties
                .get_mut(&booking.property_id)
                .ok_or(LedgerError::PropertyNotFound(booking.property_id))?;
            max_booking = max_booking.max(booking.id.0);
            if ledger
                .booking_index
                .insert(booking.id, booking.property_id)
                .is_some()
            {
                return Err(LedgerError::DuplicateBooking(booking.id));
            }
            state.bookings.push(booking);
        }

        ledger
            .next_property_id
            .store(max_property.saturating_add(1), Ordering::Relaxed);
        ledger
            .next_booking_id
            .store(max_booking.saturating_add(1), Ordering::Relaxed);
        debug!(
            properties = ledger.properties.len(),
            bookings = ledger.booking_index.len(),
            "ledger restored from snapshot"
        );
        Ok(ledger)
    }

    /// Point-in-time copy of every property and booking, sorted by id.
    pub fn snapshot(&self) -> LedgerSnapshot {
        let mut properties = Vec::new();
        let mut bookings = Vec::new();
        for entry in self.properties.iter() {
            properties.push(entry.property.clone());
            bookings.extend(entry.bookings.iter().cloned());
        }
        properties.sort_by_key(|p| p.id);
        bookings.sort_by_key(|b| b.id);
        LedgerSnapshot {
            properties,
            bookings,
        }
    }

    fn owner_of(&self, id: BookingId) -> Result<PropertyId> {
        self.booking_index
            .get(&id)
            .map(|entry| *entry)
            .ok_or(LedgerError::BookingNotFound(id))
    }
}
