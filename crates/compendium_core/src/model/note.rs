//! Quick note record and its patch shape.

use super::{new_entity_id, now_timestamp, EntityId};
use serde::{Deserialize, Serialize};

const NOTE_ID_PREFIX: &str = "note";
const PREVIEW_ELLIPSIS: &str = "...";

/// Short free-form note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: EntityId,
    pub title: String,
    pub content: String,
    pub created_at: String,
    /// Restamped on every store update.
    pub updated_at: String,
}

impl Note {
    /// Creates a note with a generated id and both timestamps set to now.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        let now = now_timestamp();
        Self {
            id: new_entity_id(NOTE_ID_PREFIX),
            title: title.into(),
            content: content.into(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Returns content cut to `max_chars` characters, with `...` appended
    /// when anything was cut.
    pub fn preview(&self, max_chars: usize) -> String {
        if self.content.chars().count() <= max_chars {
            return self.content.clone();
        }
        let mut truncated = self.content.chars().take(max_chars).collect::<String>();
        truncated.push_str(PREVIEW_ELLIPSIS);
        truncated
    }

    /// Applies every field present in `patch`; absent fields stay unchanged.
    pub fn apply(&mut self, patch: &NotePatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(content) = &patch.content {
            self.content = content.clone();
        }
        if let Some(created_at) = &patch.created_at {
            self.created_at = created_at.clone();
        }
    }
}

/// Partial update for a [`Note`]. `id` and `updated_at` are owned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub created_at: Option<String>,
}

impl NotePatch {
    pub fn title(value: impl Into<String>) -> Self {
        Self {
            title: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn content(value: impl Into<String>) -> Self {
        Self {
            content: Some(value.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Note, NotePatch};

    fn fixture(content: &str) -> Note {
        Note {
            id: "note-1".to_string(),
            title: "Test Note".to_string(),
            content: content.to_string(),
            created_at: "2026-01-01T00:00:00Z".to_string(),
            updated_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn preview_truncates_long_content() {
        let note = fixture("This is a very long text that should be truncated");
        let preview = note.preview(20);
        assert_eq!(preview, "This is a very long ...");
        assert_eq!(preview.chars().count(), 23);
    }

    #[test]
    fn preview_keeps_short_and_empty_content() {
        assert_eq!(fixture("Short").preview(20), "Short");
        assert_eq!(fixture("").preview(20), "");
    }

    #[test]
    fn apply_only_touches_present_fields() {
        let mut note = fixture("Test content");
        note.apply(&NotePatch::title("Updated Title"));

        assert_eq!(note.title, "Updated Title");
        assert_eq!(note.content, "Test content");
        assert_eq!(note.created_at, "2026-01-01T00:00:00Z");
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let json = serde_json::to_value(fixture("body")).unwrap();
        assert_eq!(json["createdAt"], "2026-01-01T00:00:00Z");
        assert_eq!(json["updatedAt"], "2026-01-01T00:00:00Z");
        assert!(json.get("created_at").is_none());
    }
}
