use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use shared::{AvailabilityRecord, AvailabilityStatus};

use crate::services::date_utils::{days_in_month, format_date};

/// Weekday short names indexed by day-of-week, 0 = Sunday.
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// One rendered day in the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    /// Calendar date in "YYYY-MM-DD" form.
    pub date: String,
    /// Day-of-month number, 1-based.
    pub day: u32,
    pub weekday_label: &'static str,
    pub status: AvailabilityStatus,
}

/// The full cell list for one selected month.
///
/// Rebuilt wholesale from the fetched records on every month load; the
/// per-cell status is the only state that mutates between rebuilds.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<DayCell>,
}

impl MonthGrid {
    /// Build the grid for a month from the person's fetched records.
    /// Dates without a record default to available.
    pub fn build(year: i32, month: u32, records: &[AvailabilityRecord]) -> Self {
        let availability_map: HashMap<&str, AvailabilityStatus> = records
            .iter()
            .map(|record| (record.date.as_str(), record.status))
            .collect();

        let mut cells = Vec::new();
        for day in 1..=days_in_month(year, month) {
            let date = format_date(year, month, day);
            let weekday = NaiveDate::from_ymd_opt(year, month, day)
                .map(|d| d.weekday().num_days_from_sunday())
                .unwrap_or(0);
            let status = availability_map
                .get(date.as_str())
                .copied()
                .unwrap_or_default();

            cells.push(DayCell {
                date,
                day,
                weekday_label: WEEKDAY_LABELS[weekday as usize],
                status,
            });
        }

        Self { year, month, cells }
    }

    /// Set the status stored for `date`. Returns false when the date is
    /// not part of this month or the cell already has that status, in
    /// which case nothing changes and no save should be issued.
    pub fn apply(&mut self, date: &str, status: AvailabilityStatus) -> bool {
        match self.cells.iter_mut().find(|cell| cell.date == date) {
            Some(cell) if cell.status != status => {
                cell.status = status;
                true
            }
            _ => false,
        }
    }
}

/// Tracks one pointer drag gesture from press to release.
///
/// A gesture paints a single status: the cycle step computed from the
/// pressed cell, applied unchanged to every cell the pointer enters.
#[derive(Debug, Default)]
pub struct DragGesture {
    painting: Option<AvailabilityStatus>,
}

impl DragGesture {
    /// Begin a gesture on the pressed cell and return the status the
    /// gesture will paint.
    pub fn press(&mut self, current: AvailabilityStatus) -> AvailabilityStatus {
        let target = current.cycle();
        self.painting = Some(target);
        target
    }

    /// Status to paint onto a cell entered mid-gesture, if a gesture is
    /// active.
    pub fn painting(&self) -> Option<AvailabilityStatus> {
        self.painting
    }

    /// Pointer released anywhere on the page; ends the gesture.
    pub fn release(&mut self) {
        self.painting = None;
    }
}
