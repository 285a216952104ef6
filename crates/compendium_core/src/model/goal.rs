//! Progress-tracked goal record.
//!
//! # Invariants
//! - `progress` stays within `0..=100` for goals that go through the store.
//! - Decoding saturates out-of-range progress instead of rejecting the goal.

use super::{new_entity_id, now_timestamp, EntityId};
use serde::{Deserialize, Deserializer, Serialize};

const GOAL_ID_PREFIX: &str = "goal";

/// Upper bound of goal progress, in percent.
pub const MAX_PROGRESS: u8 = 100;

/// Goal with percentage progress and an optional target day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    #[serde(deserialize_with = "deserialize_progress")]
    pub progress: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Coarse progress classification used for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressBand {
    /// Below 30%.
    Low,
    /// 30% up to 69%.
    Medium,
    /// 70% and above.
    High,
}

impl Goal {
    /// Creates a goal at 0% with a generated id and timestamps set to now.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        let now = now_timestamp();
        Self {
            id: new_entity_id(GOAL_ID_PREFIX),
            title: title.into(),
            description: description.into(),
            progress: 0,
            target_date: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    pub fn progress_band(&self) -> ProgressBand {
        match self.progress {
            0..=29 => ProgressBand::Low,
            30..=69 => ProgressBand::Medium,
            _ => ProgressBand::High,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= MAX_PROGRESS
    }

    /// Applies every field present in `patch`, capping progress at
    /// [`MAX_PROGRESS`].
    pub fn apply(&mut self, patch: &GoalPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(progress) = patch.progress {
            self.progress = clamp_progress(progress);
        }
        if let Some(target_date) = &patch.target_date {
            self.target_date = target_date.clone();
        }
        if let Some(created_at) = &patch.created_at {
            self.created_at = created_at.clone();
        }
    }
}

/// Partial update for a [`Goal`].
///
/// `target_date` is doubly optional: `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub progress: Option<u8>,
    pub target_date: Option<Option<String>>,
    pub created_at: Option<String>,
}

impl GoalPatch {
    pub fn progress(value: u8) -> Self {
        Self {
            progress: Some(value),
            ..Self::default()
        }
    }
}

/// Caps progress at [`MAX_PROGRESS`].
pub fn clamp_progress(value: u8) -> u8 {
    value.min(MAX_PROGRESS)
}

// Accepts any JSON number and saturates it into `0..=MAX_PROGRESS`.
fn deserialize_progress<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    Ok(value.clamp(0.0, f64::from(MAX_PROGRESS)).round() as u8)
}
