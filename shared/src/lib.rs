use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Availability level a person assigns to one calendar date.
///
/// Serializes as a lowercase string on the wire; the same string doubles
/// as the CSS class applied to the day cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    Available,
    Unavailable,
    Preferred,
}

impl AvailabilityStatus {
    /// Next status when a new drag gesture begins on a cell:
    /// available -> unavailable -> preferred -> available.
    pub fn cycle(self) -> Self {
        match self {
            AvailabilityStatus::Available => AvailabilityStatus::Unavailable,
            AvailabilityStatus::Unavailable => AvailabilityStatus::Preferred,
            AvailabilityStatus::Preferred => AvailabilityStatus::Available,
        }
    }

    /// Lowercase wire name, also used as the day cell's CSS class.
    pub fn as_str(self) -> &'static str {
        match self {
            AvailabilityStatus::Available => "available",
            AvailabilityStatus::Unavailable => "unavailable",
            AvailabilityStatus::Preferred => "preferred",
        }
    }

    /// Parse a stored wire name back into a status.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "available" => Some(AvailabilityStatus::Available),
            "unavailable" => Some(AvailabilityStatus::Unavailable),
            "preferred" => Some(AvailabilityStatus::Preferred),
            _ => None,
        }
    }
}

impl Default for AvailabilityStatus {
    fn default() -> Self {
        AvailabilityStatus::Available
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One stored status for one calendar date ("YYYY-MM-DD").
///
/// Identity is the date: a person has at most one record per date, and
/// dates without a record are implicitly available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityRecord {
    pub date: String,
    pub status: AvailabilityStatus,
}

/// POST body for a create-or-update of a single date's status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveAvailabilityRequest {
    pub date: String,
    pub status: AvailabilityStatus,
}

/// Month currently shown by the availability calendar (1-indexed month).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthSelection {
    pub year: i32,
    pub month: u32,
}

impl Default for MonthSelection {
    fn default() -> Self {
        let now = chrono::Local::now();
        Self {
            year: now.year(),
            month: now.month(),
        }
    }
}
