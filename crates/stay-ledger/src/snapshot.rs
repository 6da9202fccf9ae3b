//! JSON snapshots of the ledger.
//!
//! ```json
//! {
//!   "properties": [
//!     { "id": 1, "title": "Lagos Island Apartment", "description": "...",
//!       "availability_window": { "start": "2025-01-01", "end": "2025-12-31" } }
//!   ],
//!   "bookings": [
//!     { "id": 1, "property_id": 1, "guest_name": "John Doe",
//!       "range": { "start": "2025-03-01", "end": "2025-03-05" } }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ledger::Ledger;
use crate::model::{Booking, Property};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
}

impl LedgerSnapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Ledger {
    /// Load a ledger from a JSON snapshot file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_snapshot(LedgerSnapshot::from_json(&json)?)
    }

    /// Write the current state to a JSON snapshot file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.snapshot().to_json()?)?;
        Ok(())
    }
}
