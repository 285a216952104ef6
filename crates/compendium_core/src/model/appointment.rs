//! Scheduled appointment record.
//!
//! # Invariants
//! - `date` is kept as the caller supplied it; parsing happens only when a
//!   calendar day or sort key is needed (see [`Appointment::scheduled_at`]).
//! - Appointments have no `updated_at`; patches never stamp time.

use super::{new_entity_id, now_timestamp, EntityId};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

const APPOINTMENT_ID_PREFIX: &str = "apt";

/// Appointment on a calendar day at a given time of day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: EntityId,
    pub title: String,
    /// Calendar day, usually `YYYY-MM-DD`.
    pub date: String,
    /// Time of day, usually `HH:MM`.
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: String,
}

impl Appointment {
    /// Creates an appointment with a generated id and `created_at` set to now.
    pub fn new(title: impl Into<String>, date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            id: new_entity_id(APPOINTMENT_ID_PREFIX),
            title: title.into(),
            date: date.into(),
            time: time.into(),
            description: None,
            created_at: now_timestamp(),
        }
    }

    /// Parses `date` into a wall-clock timestamp.
    ///
    /// Accepts `YYYY-MM-DD` (read as midnight), RFC 3339 timestamps (kept in
    /// their own offset) and `YYYY-MM-DDTHH:MM[:SS]`. Returns `None` for
    /// anything else.
    pub fn scheduled_at(&self) -> Option<NaiveDateTime> {
        parse_scheduled_at(self.date.trim())
    }

    /// Calendar day of [`Self::scheduled_at`].
    pub fn scheduled_day(&self) -> Option<NaiveDate> {
        self.scheduled_at().map(|timestamp| timestamp.date())
    }

    /// Applies every field present in `patch`; absent fields stay unchanged.
    pub fn apply(&mut self, patch: &AppointmentPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(date) = &patch.date {
            self.date = date.clone();
        }
        if let Some(time) = &patch.time {
            self.time = time.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(created_at) = &patch.created_at {
            self.created_at = created_at.clone();
        }
    }
}

/// Partial update for an [`Appointment`].
///
/// `description` is doubly optional: `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentPatch {
    pub title: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub description: Option<Option<String>>,
    pub created_at: Option<String>,
}

fn parse_scheduled_at(value: &str) -> Option<NaiveDateTime> {
    if let Ok(day) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(day.and_time(NaiveTime::MIN));
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}
