//! Domain model for notes, appointments and goals.
//!
//! # Responsibility
//! - Define the records held by the compendium store and exchanged as
//!   snapshots with local and remote persistence.
//! - Own entity id generation and timestamp formatting.
//!
//! # Invariants
//! - Ids are unique within one collection by construction, not by check.
//! - Timestamps are ISO-8601 strings in UTC.
//! - JSON field names are camelCase to match the persisted snapshot shape.

pub mod appointment;
pub mod goal;
pub mod note;
pub mod snapshot;

use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

/// Stable identifier for a note, appointment or goal.
pub type EntityId = String;

/// Generates a new entity id of the form `<prefix>_<uuid>`.
pub fn new_entity_id(prefix: &str) -> EntityId {
    format!("{prefix}_{}", Uuid::new_v4().simple())
}

/// Current UTC time as an RFC 3339 timestamp with millisecond precision.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::{new_entity_id, now_timestamp};
    use chrono::DateTime;

    #[test]
    fn entity_ids_carry_prefix_and_are_unique() {
        let first = new_entity_id("note");
        let second = new_entity_id("note");

        assert!(first.starts_with("note_"));
        assert!(second.starts_with("note_"));
        assert_ne!(first, second);
    }

    #[test]
    fn now_timestamp_is_rfc3339() {
        let stamp = now_timestamp();
        assert!(DateTime::parse_from_rfc3339(&stamp).is_ok(), "{stamp}");
        assert!(stamp.ends_with('Z'));
    }
}
