use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One weekly working block of a doctor, as served by `/api/doctor-schedule/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: i64,
    /// 0 = Monday .. 6 = Sunday
    pub day_of_week: u8,
    /// Start of the block, "HH:MM"
    pub start_time: String,
    /// End of the block (exclusive), "HH:MM"
    pub end_time: String,
    /// Length of a single appointment in minutes
    pub appointment_duration: u32,
    #[serde(default)]
    pub day_name: Option<String>,
    #[serde(default)]
    pub break_duration: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ScheduleEntry {
    /// Hour component of `start_time`, `None` when the time is not "HH:MM"
    pub fn start_hour(&self) -> Option<u32> {
        parse_hour(&self.start_time)
    }

    /// Hour component of `end_time`, `None` when the time is not "HH:MM"
    pub fn end_hour(&self) -> Option<u32> {
        parse_hour(&self.end_time)
    }

    /// Whether this entry covers the given day and hour, using the half-open
    /// interval `[start_hour, end_hour)`. Entries with unreadable times cover nothing.
    pub fn covers(&self, day: u8, hour: u32) -> bool {
        match (self.start_hour(), self.end_hour()) {
            (Some(start), Some(end)) => self.day_of_week == day && start <= hour && hour < end,
            _ => false,
        }
    }

    /// Label shown in the first cell of the block, e.g. "09:00 - 11:00"
    pub fn time_range_label(&self) -> String {
        format!("{} - {}", self.start_time, self.end_time)
    }

    /// Label for the per-appointment length, e.g. "30 min/appointment"
    pub fn duration_label(&self) -> String {
        format!("{} min/appointment", self.appointment_duration)
    }
}

fn parse_hour(time: &str) -> Option<u32> {
    NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .ok()
        .map(|t| t.hour())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorSummary {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub specialization: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorScheduleResponse {
    #[serde(default)]
    pub doctor: Option<DoctorSummary>,
    pub schedules: Vec<ScheduleEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableSlotsResponse {
    /// Bookable start times ("HH:MM"); order is display order
    pub slots: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl ValidationResult {
    /// Server-supplied message if present and not blank
    pub fn conflict_message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }
}

/// Form values driving the slot selector, re-read on every change event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub doctor_id: String,
    pub date: String,
    /// Present when editing an existing appointment
    pub appointment_id: Option<String>,
}

impl SelectionState {
    pub fn new(doctor_id: &str, date: &str, appointment_id: Option<&str>) -> Self {
        Self {
            doctor_id: doctor_id.trim().to_string(),
            date: date.trim().to_string(),
            appointment_id: appointment_id.and_then(non_empty),
        }
    }

    /// Query for `/api/available-slots`, or `None` when doctor or date is empty
    pub fn slot_query(&self) -> Option<SlotQuery> {
        if self.doctor_id.is_empty() || self.date.is_empty() {
            return None;
        }
        Some(SlotQuery {
            doctor_id: self.doctor_id.clone(),
            date: self.date.clone(),
            exclude_appointment_id: self.appointment_id.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotQuery {
    pub doctor_id: String,
    pub date: String,
    pub exclude_appointment_id: Option<String>,
}

impl SlotQuery {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("doctor_id", self.doctor_id.clone()),
            ("date", self.date.clone()),
        ];
        if let Some(id) = &self.exclude_appointment_id {
            pairs.push(("exclude_appointment_id", id.clone()));
        }
        pairs
    }
}

/// A required appointment form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentField {
    Doctor,
    Date,
    Time,
}

impl fmt::Display for AppointmentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentField::Doctor => write!(f, "doctor"),
            AppointmentField::Date => write!(f, "date"),
            AppointmentField::Time => write!(f, "time"),
        }
    }
}

/// Values of the appointment form at submit time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentFields {
    pub doctor_id: String,
    pub date: String,
    pub time: String,
    pub appointment_id: Option<String>,
}

impl AppointmentFields {
    pub fn new(doctor_id: &str, date: &str, time: &str, appointment_id: Option<&str>) -> Self {
        Self {
            doctor_id: doctor_id.trim().to_string(),
            date: date.trim().to_string(),
            time: time.trim().to_string(),
            appointment_id: appointment_id.and_then(non_empty),
        }
    }

    /// Required fields that are still empty, in form order
    pub fn missing(&self) -> Vec<AppointmentField> {
        let mut missing = Vec::new();
        if self.doctor_id.is_empty() {
            missing.push(AppointmentField::Doctor);
        }
        if self.date.is_empty() {
            missing.push(AppointmentField::Date);
        }
        if self.time.is_empty() {
            missing.push(AppointmentField::Time);
        }
        missing
    }

    /// Query for `/api/validate-appointment`, or the list of missing fields
    pub fn conflict_check(&self) -> Result<AppointmentCheck, Vec<AppointmentField>> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(missing);
        }
        Ok(AppointmentCheck {
            doctor_id: self.doctor_id.clone(),
            date: self.date.clone(),
            time: self.time.clone(),
            appointment_id: self.appointment_id.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentCheck {
    pub doctor_id: String,
    pub date: String,
    pub time: String,
    pub appointment_id: Option<String>,
}

impl AppointmentCheck {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("doctor_id", self.doctor_id.clone()),
            ("date", self.date.clone()),
            ("time", self.time.clone()),
        ];
        if let Some(id) = &self.appointment_id {
            pairs.push(("appointment_id", id.clone()));
        }
        pairs
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
