//! Whole-collection snapshot exchanged with local and remote persistence.
//!
//! # Invariants
//! - A [`Snapshot`] always carries all three collections; persistence is
//!   whole-blob overwrite, never a patch.
//! - A [`PartialSnapshot`] is only used on the read side, where a missing
//!   collection must leave the in-memory one untouched.

use super::appointment::Appointment;
use super::goal::Goal;
use super::note::Note;
use serde::{Deserialize, Serialize};

/// Full `{notes, appointments, goals}` payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub appointments: Vec<Appointment>,
    #[serde(default)]
    pub goals: Vec<Goal>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty() && self.appointments.is_empty() && self.goals.is_empty()
    }
}

/// Snapshot where each collection may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<Note>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointments: Option<Vec<Appointment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<Vec<Goal>>,
}

impl From<Snapshot> for PartialSnapshot {
    fn from(value: Snapshot) -> Self {
        Self {
            notes: Some(value.notes),
            appointments: Some(value.appointments),
            goals: Some(value.goals),
        }
    }
}
