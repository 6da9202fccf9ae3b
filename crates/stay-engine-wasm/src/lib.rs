//! WASM bindings for stay-engine.
//!
//! Exposes booking validation and free-range computation to JavaScript via
//! `wasm-bindgen`. Ranges and booking lists cross the boundary as JSON strings;
//! dates are `YYYY-MM-DD` strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p stay-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/stay-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/stay_engine_wasm.wasm
//! ```

use serde::Deserialize;
use stay_engine::{BookedRange, BookingId, DateRange};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

/// Input format for bookings passed from JavaScript.
#[derive(Deserialize)]
struct BookingInput {
    #[serde(default)]
    id: Option<u64>,
    start: String,
    end: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Convert a JSON array of `{id?, start, end}` objects into `(id, range)`
/// pairs, keeping the id only when the caller supplied one.
fn parse_bookings_json(json: &str) -> Result<Vec<(Option<u64>, DateRange)>, String> {
    let inputs: Vec<BookingInput> =
        serde_json::from_str(json).map_err(|e| format!("Invalid bookings JSON: {}", e))?;

    inputs
        .into_iter()
        .map(|input| {
            let range = DateRange::parse(&input.start, &input.end).map_err(|e| e.to_string())?;
            Ok((input.id, range))
        })
        .collect()
}

/// Booked ranges left after dropping the booking with `exclude_id`.
///
/// Only explicit ids can match. Anonymous bookings always take part in the
/// conflict check.
fn booked_ranges(
    bookings: Vec<(Option<u64>, DateRange)>,
    exclude_id: Option<u64>,
) -> Vec<BookedRange> {
    bookings
        .into_iter()
        .filter(|(id, _)| exclude_id.is_none() || *id != exclude_id)
        .enumerate()
        .map(|(index, (_, range))| BookedRange {
            id: BookingId(index as u64),
            range,
        })
        .collect()
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

// ---------------------------------------------------------------------------
// Core operations (target independent)
// ---------------------------------------------------------------------------

/// Validate a proposed stay. `Ok` carries the JSON `{"ok":true}`; every
/// rejection is an `Err` message.
pub fn validate_booking_json(
    window_start: &str,
    window_end: &str,
    bookings_json: &str,
    start: &str,
    end: &str,
    exclude_id: Option<u64>,
) -> Result<String, String> {
    let window = DateRange::parse(window_start, window_end).map_err(|e| e.to_string())?;
    let existing = booked_ranges(parse_bookings_json(bookings_json)?, exclude_id);
    let candidate = DateRange::parse(start, end).map_err(|e| e.to_string())?;

    stay_engine::validate_booking(&window, &existing, &candidate, None)
        .map_err(|e| e.to_string())?;

    to_json(&serde_json::json!({ "ok": true }))
}

/// Free ranges of the window as a JSON array of `{start, end, days}`.
pub fn compute_free_ranges_json(
    window_start: &str,
    window_end: &str,
    bookings_json: &str,
) -> Result<String, String> {
    let window = DateRange::parse(window_start, window_end).map_err(|e| e.to_string())?;
    let ranges: Vec<DateRange> = parse_bookings_json(bookings_json)?
        .into_iter()
        .map(|(_, range)| range)
        .collect();

    to_json(&stay_engine::compute_free_ranges(&window, &ranges))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Check a proposed stay against a property's window and bookings.
///
/// `bookings_json` is a JSON array of `{id?, start, end}` objects. Throws with
/// the rejection reason when the stay is out of window, overlaps another
/// booking, or the input is malformed.
#[wasm_bindgen(js_name = "validateBooking")]
pub fn validate_booking(
    window_start: &str,
    window_end: &str,
    bookings_json: &str,
    start: &str,
    end: &str,
    exclude_id: Option<u64>,
) -> Result<String, JsValue> {
    validate_booking_json(window_start, window_end, bookings_json, start, end, exclude_id)
        .map_err(|e| JsValue::from_str(&e))
}

/// Compute the free date ranges of a property's availability window.
///
/// Returns a JSON string containing an array of `{start, end, days}` objects.
#[wasm_bindgen(js_name = "computeFreeRanges")]
pub fn compute_free_ranges(
    window_start: &str,
    window_end: &str,
    bookings_json: &str,
) -> Result<String, JsValue> {
    compute_free_ranges_json(window_start, window_end, bookings_json)
        .map_err(|e| JsValue::from_str(&e))
}
