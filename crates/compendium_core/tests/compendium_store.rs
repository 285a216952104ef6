use chrono::{Duration, NaiveDate};
use compendium_core::{
    Appointment, AppointmentPatch, CompendiumStore, Goal, GoalPatch, Note, NotePatch,
    PartialSnapshot, Snapshot,
};

const STAMP: &str = "2026-01-01T00:00:00Z";

fn note(id: &str) -> Note {
    Note {
        id: id.to_string(),
        title: "Test Note".to_string(),
        content: "Test content".to_string(),
        created_at: STAMP.to_string(),
        updated_at: STAMP.to_string(),
    }
}

fn appointment(id: &str, title: &str, date: &str) -> Appointment {
    Appointment {
        id: id.to_string(),
        title: title.to_string(),
        date: date.to_string(),
        time: "10:00".to_string(),
        description: None,
        created_at: STAMP.to_string(),
    }
}

fn goal(id: &str, progress: u8) -> Goal {
    Goal {
        id: id.to_string(),
        title: "Learn Rust".to_string(),
        description: "Ownership and lifetimes".to_string(),
        progress,
        target_date: None,
        created_at: STAMP.to_string(),
        updated_at: STAMP.to_string(),
    }
}

fn day(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

#[test]
fn add_then_get_note_returns_equal_value() {
    let mut store = CompendiumStore::new();
    store.add_note(note("note-1"));

    assert_eq!(store.get_note("note-1"), Some(&note("note-1")));
    assert_eq!(store.get_note("non-existent"), None);
}

#[test]
fn update_note_changes_title_keeps_content_and_restamps() {
    let mut store = CompendiumStore::new();
    store.add_note(note("note-1"));

    assert!(store.update_note("note-1", &NotePatch::title("Updated Title")));

    let updated = store.get_note("note-1").unwrap();
    assert_eq!(updated.title, "Updated Title");
    assert_eq!(updated.content, "Test content");
    assert_eq!(updated.created_at, STAMP);
    assert_ne!(updated.updated_at, STAMP);
}

#[test]
fn update_missing_note_is_noop() {
    let mut store = CompendiumStore::new();
    store.add_note(note("note-1"));

    assert!(!store.update_note("missing", &NotePatch::content("x")));
    assert_eq!(store.all_notes(), &[note("note-1")]);
}

#[test]
fn update_touches_first_match_only() {
    let mut store = CompendiumStore::new();
    store.add_note(note("dup"));
    store.add_note(note("dup"));

    store.update_note("dup", &NotePatch::title("first"));

    assert_eq!(store.all_notes()[0].title, "first");
    assert_eq!(store.all_notes()[1].title, "Test Note");
}

#[test]
fn delete_note_shrinks_by_one_or_leaves_unchanged() {
    let mut store = CompendiumStore::new();
    store.add_note(note("note-1"));
    store.add_note(note("note-2"));

    assert_eq!(store.delete_note("note-1"), 1);
    assert_eq!(store.get_note("note-1"), None);
    assert_eq!(store.all_notes().len(), 1);

    assert_eq!(store.delete_note("note-1"), 0);
    assert_eq!(store.all_notes().len(), 1);
}

#[test]
fn notes_keep_insertion_order() {
    let mut store = CompendiumStore::new();
    for id in ["c", "a", "b"] {
        store.add_note(note(id));
    }

    let ids = store
        .all_notes()
        .iter()
        .map(|note| note.id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["c", "a", "b"]);
}

#[test]
fn appointment_add_update_delete() {
    let mut store = CompendiumStore::new();
    let mut meeting = appointment("apt-1", "Meeting", "2026-01-20");
    meeting.description = Some("Team meeting".to_string());
    store.add_appointment(meeting.clone());
    assert_eq!(store.all_appointments(), &[meeting]);

    assert!(store.update_appointment(
        "apt-1",
        &AppointmentPatch {
            time: Some("11:30".to_string()),
            ..AppointmentPatch::default()
        }
    ));
    let updated = store.get_appointment("apt-1").unwrap();
    assert_eq!(updated.time, "11:30");
    assert_eq!(updated.title, "Meeting");
    assert_eq!(updated.created_at, STAMP);

    assert_eq!(store.delete_appointment("apt-1"), 1);
    assert!(store.all_appointments().is_empty());
}

#[test]
fn upcoming_excludes_past_and_sorts_by_day() {
    let today = day("2026-03-10");
    let mut store = CompendiumStore::new();
    store.add_appointment(appointment("a1", "Later Meeting", "2026-03-12"));
    store.add_appointment(appointment("a2", "Yesterday", "2026-03-09"));
    store.add_appointment(appointment("a3", "Tomorrow Meeting", "2026-03-11"));
    store.add_appointment(appointment("a4", "Today", "2026-03-10"));
    store.add_appointment(appointment("a5", "Broken", "not a date"));

    let titles = store
        .upcoming_appointments_from(today)
        .into_iter()
        .map(|appointment| appointment.title.as_str())
        .collect::<Vec<_>>();

    assert_eq!(titles, vec!["Today", "Tomorrow Meeting", "Later Meeting"]);
}

#[test]
fn upcoming_keeps_insertion_order_for_same_day() {
    let mut store = CompendiumStore::new();
    store.add_appointment(appointment("a1", "first", "2026-05-01"));
    store.add_appointment(appointment("a2", "earlier day", "2026-04-30"));
    store.add_appointment(appointment("a3", "second", "2026-05-01"));

    let ids = store
        .upcoming_appointments_from(day("2026-04-01"))
        .into_iter()
        .map(|appointment| appointment.id.as_str())
        .collect::<Vec<_>>();

    assert_eq!(ids, vec!["a2", "a1", "a3"]);
}

#[test]
fn upcoming_orders_same_day_entries_by_time() {
    let mut store = CompendiumStore::new();
    store.add_appointment(appointment("late", "Afternoon", "2026-05-01T15:00:00Z"));
    store.add_appointment(appointment("early", "Morning", "2026-05-01T09:00:00Z"));
    store.add_appointment(appointment("day", "All day", "2026-05-01"));
    store.add_appointment(appointment("noon", "Lunch", "2026-05-01T12:00"));

    let ids = store
        .upcoming_appointments_from(day("2026-04-01"))
        .into_iter()
        .map(|appointment| appointment.id.as_str())
        .collect::<Vec<_>>();

    assert_eq!(ids, vec!["day", "early", "noon", "late"]);
}

#[test]
fn upcoming_uses_current_local_day() {
    let today = chrono::Local::now().date_naive();
    let mut store = CompendiumStore::new();
    let later = (today + Duration::days(2)).format("%Y-%m-%d").to_string();
    let tomorrow = (today + Duration::days(1)).format("%Y-%m-%d").to_string();
    let past = (today - Duration::days(3)).format("%Y-%m-%d").to_string();
    store.add_appointment(appointment("apt-2", "Later Meeting", &later));
    store.add_appointment(appointment("apt-1", "Tomorrow Meeting", &tomorrow));
    store.add_appointment(appointment("apt-0", "Past Meeting", &past));

    let upcoming = store.upcoming_appointments();

    assert_eq!(upcoming.len(), 2);
    assert_eq!(upcoming[0].title, "Tomorrow Meeting");
    assert_eq!(upcoming[1].title, "Later Meeting");
}

#[test]
fn goal_progress_update_and_delete() {
    let mut store = CompendiumStore::new();
    store.add_goal(goal("goal-1", 50));

    assert!(store.update_goal("goal-1", &GoalPatch::progress(75)));
    let updated = store.get_goal("goal-1").unwrap();
    assert_eq!(updated.progress, 75);
    assert_eq!(updated.title, "Learn Rust");
    assert_ne!(updated.updated_at, STAMP);

    assert_eq!(store.delete_goal("goal-1"), 1);
    assert!(store.all_goals().is_empty());
}

#[test]
fn load_from_data_replaces_only_present_collections() {
    let mut store = CompendiumStore::new();
    store.add_note(note("old-note"));
    store.add_appointment(appointment("a1", "Kept", "2026-01-20"));
    store.add_goal(goal("g1", 10));

    store.load_from_data(PartialSnapshot {
        notes: Some(vec![note("new-note")]),
        ..PartialSnapshot::default()
    });

    assert_eq!(store.all_notes(), &[note("new-note")]);
    assert_eq!(store.all_appointments().len(), 1);
    assert_eq!(store.all_goals(), &[goal("g1", 10)]);
    assert!(store.last_synced_at().is_some());
}

#[test]
fn load_from_data_with_all_collections() {
    let mut store = CompendiumStore::new();
    store.load_from_data(PartialSnapshot::from(Snapshot {
        notes: vec![note("n1")],
        appointments: vec![appointment("a1", "Apt", "2026-01-20")],
        goals: vec![goal("g1", 0)],
    }));

    assert_eq!(store.all_notes().len(), 1);
    assert_eq!(store.all_appointments().len(), 1);
    assert_eq!(store.all_goals().len(), 1);
    assert!(store.last_synced_at().is_some());
}

#[test]
fn restore_local_does_not_stamp_sync_time() {
    let mut store = CompendiumStore::new();
    store.restore_local(Snapshot {
        notes: vec![note("n1")],
        ..Snapshot::default()
    });

    assert_eq!(store.all_notes().len(), 1);
    assert_eq!(store.last_synced_at(), None);
}

#[test]
fn data_for_save_from_single_note() {
    let mut store = CompendiumStore::new();
    let n1 = Note {
        id: "n1".to_string(),
        title: "T".to_string(),
        content: "C".to_string(),
        created_at: "2026-01-01".to_string(),
        updated_at: "2026-01-01".to_string(),
    };
    store.add_note(n1.clone());

    let saved = store.get_data_for_save();
    assert_eq!(
        saved,
        Snapshot {
            notes: vec![n1],
            appointments: vec![],
            goals: vec![],
        }
    );

    let json = serde_json::to_value(&saved).unwrap();
    assert_eq!(json["notes"][0]["createdAt"], "2026-01-01");
    assert_eq!(json["appointments"], serde_json::json!([]));
}

#[test]
fn data_for_save_is_a_copy() {
    let mut store = CompendiumStore::new();
    store.add_note(note("n1"));

    let mut saved = store.get_data_for_save();
    saved.notes.clear();

    assert_eq!(store.all_notes().len(), 1);
}

#[test]
fn clear_all_resets_everything() {
    let mut store = CompendiumStore::new();
    store.add_note(note("n1"));
    store.add_appointment(appointment("a1", "", ""));
    store.add_goal(goal("g1", 0));
    store.mark_synced(STAMP);

    store.clear_all();

    assert!(store.all_notes().is_empty());
    assert!(store.all_appointments().is_empty());
    assert!(store.all_goals().is_empty());
    assert_eq!(store.last_synced_at(), None);
}
