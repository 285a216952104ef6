//! Domain store for notes, appointments and goals.
//!
//! # Responsibility
//! - Own the in-memory collections and apply create/update/delete actions.
//! - Expose derived views (upcoming appointments) and snapshot exchange.
//! - Track loading/saving flags and the last successful sync time.
//!
//! # Invariants
//! - Notes and goals keep insertion order.
//! - Adds never check for duplicate ids; updates touch the first match only,
//!   deletes remove every match.
//! - Note and goal updates restamp `updated_at`; appointment updates do not.

use crate::model::appointment::{Appointment, AppointmentPatch};
use crate::model::goal::{clamp_progress, Goal, GoalPatch};
use crate::model::note::{Note, NotePatch};
use crate::model::now_timestamp;
use crate::model::snapshot::{PartialSnapshot, Snapshot};
use chrono::{Local, NaiveDate};
use log::debug;

/// Mutable collections plus sync status flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompendiumStore {
    notes: Vec<Note>,
    appointments: Vec<Appointment>,
    goals: Vec<Goal>,
    is_loading: bool,
    is_saving: bool,
    last_synced_at: Option<String>,
}

impl CompendiumStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- notes ----

    pub fn all_notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get_note(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn add_note(&mut self, note: Note) {
        self.notes.push(note);
    }

    /// Applies `patch` to the first note with `id` and restamps `updated_at`.
    ///
    /// Returns `false` when no note matched.
    pub fn update_note(&mut self, id: &str, patch: &NotePatch) -> bool {
        match self.notes.iter_mut().find(|note| note.id == id) {
            Some(note) => {
                note.apply(patch);
                note.updated_at = now_timestamp();
                true
            }
            None => false,
        }
    }

    /// Removes every note with `id` and returns how many were removed.
    pub fn delete_note(&mut self, id: &str) -> usize {
        remove_by_id(&mut self.notes, id, |note| note.id.as_str())
    }

    // ---- appointments ----

    pub fn all_appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn get_appointment(&self, id: &str) -> Option<&Appointment> {
        self.appointments
            .iter()
            .find(|appointment| appointment.id == id)
    }

    pub fn add_appointment(&mut self, appointment: Appointment) {
        self.appointments.push(appointment);
    }

    pub fn update_appointment(&mut self, id: &str, patch: &AppointmentPatch) -> bool {
        match self
            .appointments
            .iter_mut()
            .find(|appointment| appointment.id == id)
        {
            Some(appointment) => {
                appointment.apply(patch);
                true
            }
            None => false,
        }
    }

    pub fn delete_appointment(&mut self, id: &str) -> usize {
        remove_by_id(&mut self.appointments, id, |appointment| {
            appointment.id.as_str()
        })
    }

    /// Appointments from today (local time) onward, earliest day first.
    pub fn upcoming_appointments(&self) -> Vec<&Appointment> {
        self.upcoming_appointments_from(Local::now().date_naive())
    }

    /// Appointments on or after `today`, earliest first.
    ///
    /// `today` is compared by calendar day; ordering uses the full parsed
    /// timestamp. The sort is stable, so exact ties keep insertion order.
    /// Appointments whose date does not parse are left out.
    pub fn upcoming_appointments_from(&self, today: NaiveDate) -> Vec<&Appointment> {
        let mut upcoming = self
            .appointments
            .iter()
            .filter_map(|appointment| {
                appointment
                    .scheduled_at()
                    .filter(|at| at.date() >= today)
                    .map(|at| (at, appointment))
            })
            .collect::<Vec<_>>();
        upcoming.sort_by_key(|(at, _)| *at);
        upcoming
            .into_iter()
            .map(|(_, appointment)| appointment)
            .collect()
    }

    // ---- goals ----

    pub fn all_goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn get_goal(&self, id: &str) -> Option<&Goal> {
        self.goals.iter().find(|goal| goal.id == id)
    }

    /// Appends `goal`, capping its progress at 100.
    pub fn add_goal(&mut self, mut goal: Goal) {
        goal.progress = clamp_progress(goal.progress);
        self.goals.push(goal);
    }

    /// Applies `patch` to the first goal with `id` and restamps `updated_at`.
    pub fn update_goal(&mut self, id: &str, patch: &GoalPatch) -> bool {
        match self.goals.iter_mut().find(|goal| goal.id == id) {
            Some(goal) => {
                goal.apply(patch);
                goal.updated_at = now_timestamp();
                true
            }
            None => false,
        }
    }

    pub fn delete_goal(&mut self, id: &str) -> usize {
        remove_by_id(&mut self.goals, id, |goal| goal.id.as_str())
    }

    // ---- sync ----

    /// Replaces every collection present in `data` and stamps the sync time.
    ///
    /// Collections missing from `data` are left as they are. Goal progress
    /// is capped as in [`Self::add_goal`].
    pub fn load_from_data(&mut self, data: PartialSnapshot) {
        let PartialSnapshot {
            notes,
            appointments,
            goals,
        } = data;
        if let Some(notes) = notes {
            self.notes = notes;
        }
        if let Some(appointments) = appointments {
            self.appointments = appointments;
        }
        if let Some(goals) = goals {
            self.goals = clamp_goals(goals);
        }
        self.last_synced_at = Some(now_timestamp());
        debug!(
            "event=store_load module=store status=ok notes={} appointments={} goals={}",
            self.notes.len(),
            self.appointments.len(),
            self.goals.len()
        );
    }

    /// Replaces all collections from a locally cached snapshot.
    ///
    /// Goal progress is capped as in [`Self::add_goal`]. Unlike [`Self::load_from_data`] this is not a sync, so
    /// `last_synced_at` is kept.
    pub fn restore_local(&mut self, snapshot: Snapshot) {
        self.notes = snapshot.notes;
        self.appointments = snapshot.appointments;
        self.goals = clamp_goals(snapshot.goals);
    }

    /// Copies the current collections into a snapshot.
    pub fn get_data_for_save(&self) -> Snapshot {
        Snapshot {
            notes: self.notes.clone(),
            appointments: self.appointments.clone(),
            goals: self.goals.clone(),
        }
    }

    pub fn clear_all(&mut self) {
        self.notes.clear();
        self.appointments.clear();
        self.goals.clear();
        self.last_synced_at = None;
        debug!("event=store_clear module=store status=ok");
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn set_loading(&mut self, value: bool) {
        self.is_loading = value;
    }

    pub fn is_saving(&self) -> bool {
        self.is_saving
    }

    pub fn set_saving(&mut self, value: bool) {
        self.is_saving = value;
    }

    pub fn last_synced_at(&self) -> Option<&str> {
        self.last_synced_at.as_deref()
    }

    pub fn mark_synced(&mut self, timestamp: impl Into<String>) {
        self.last_synced_at = Some(timestamp.into());
    }
}

fn clamp_goals(mut goals: Vec<Goal>) -> Vec<Goal> {
    for goal in &mut goals {
        goal.progress = clamp_progress(goal.progress);
    }
    goals
}

fn remove_by_id<T>(items: &mut Vec<T>, id: &str, id_of: impl Fn(&T) -> &str) -> usize {
    let before = items.len();
    items.retain(|item| id_of(item) != id);
    before - items.len()
}
