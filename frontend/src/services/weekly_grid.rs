use shared::ScheduleEntry;
use std::ops::Range;

pub const DAY_NAMES: [&str; 7] = [
    "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
];

/// Rows shown in the weekly view: 08:00 through 19:00
pub const GRID_HOURS: Range<u32> = 8..20;

/// Text shown in the first cell of a schedule block
#[derive(Debug, Clone, PartialEq)]
pub struct BlockLabel {
    pub time_range: String,
    pub duration: String,
}

/// A cell covered by a schedule entry
#[derive(Debug, Clone, PartialEq)]
pub struct Occupant {
    pub schedule_id: i64,
    /// Only set on the entry's starting hour
    pub label: Option<BlockLabel>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub day: u8,
    pub hour: u32,
    pub occupant: Option<Occupant>,
}

impl GridCell {
    pub fn is_scheduled(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn css_class(&self) -> &'static str {
        if self.is_scheduled() {
            "schedule-slot scheduled"
        } else {
            "schedule-slot"
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    pub hour: u32,
    pub cells: Vec<GridCell>,
}

impl GridRow {
    pub fn time_label(&self) -> String {
        format!("{:02}:00", self.hour)
    }
}

/// Day x hour layout of a doctor's week, ready for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyGrid {
    pub rows: Vec<GridRow>,
}

impl WeeklyGrid {
    pub fn build(entries: &[ScheduleEntry]) -> Self {
        Self::build_for_hours(entries, GRID_HOURS)
    }

    pub fn build_for_hours(entries: &[ScheduleEntry], hours: Range<u32>) -> Self {
        let rows = hours
            .map(|hour| GridRow {
                hour,
                cells: (0..DAY_NAMES.len() as u8)
                    .map(|day| GridCell {
                        day,
                        hour,
                        occupant: entry_covering(entries, day, hour).map(|entry| Occupant {
                            schedule_id: entry.id,
                            label: (entry.start_hour() == Some(hour)).then(|| BlockLabel {
                                time_range: entry.time_range_label(),
                                duration: entry.duration_label(),
                            }),
                        }),
                    })
                    .collect(),
            })
            .collect();
        Self { rows }
    }

    pub fn cell(&self, day: u8, hour: u32) -> Option<&GridCell> {
        self.rows
            .iter()
            .find(|row| row.hour == hour)
            .and_then(|row| row.cells.get(day as usize))
    }
}

/// Entry occupying `day`/`hour`. Overlaps are not resolved by specificity:
/// the first listed entry wins.
pub fn entry_covering(entries: &[ScheduleEntry], day: u8, hour: u32) -> Option<&ScheduleEntry> {
    entries.iter().find(|entry| entry.covers(day, hour))
}
