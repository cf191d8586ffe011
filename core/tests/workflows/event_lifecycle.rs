// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end event lifecycle workflow tests.

use std::sync::Arc;

use lunacal_core::{
    Calendar, DeliveryError, EventPatch, InvalidEvent, LeadTime, Pager, ScheduleHandle,
};

use crate::common::{Recorder, TempState, fixed_now, test_config, test_event_draft};

async fn setup(temp: &TempState) -> (Calendar, Arc<Recorder>) {
    let recorder = Arc::new(Recorder::default());
    let mut calendar = Calendar::with_notifier(test_config(&temp.state_dir), recorder.clone())
        .await
        .unwrap();
    calendar.set_now(&fixed_now());
    (calendar, recorder)
}

#[tokio::test]
async fn event_lifecycle_create_flow() {
    // Arrange
    let temp = TempState::new();
    let (calendar, recorder) = setup(&temp).await;
    let draft = test_event_draft("Temple fair", "14:00", "16:00", LeadTime::None);

    // Act
    let saved = calendar.new_event(draft).await.unwrap();

    // Assert
    assert!(saved.reminder_error.is_none());
    assert_eq!(saved.event.title, "Temple fair");
    assert_eq!(saved.event.schedule_handle, None);
    assert!(recorder.log().is_empty(), "no reminder was requested");

    let retrieved = calendar.get_event(saved.event.id).await.unwrap();
    assert_eq!(retrieved, Some(saved.event));
}

#[tokio::test]
async fn event_lifecycle_create_schedules_reminder() {
    let temp = TempState::new();
    let (calendar, recorder) = setup(&temp).await;
    let draft = test_event_draft("Reunion dinner", "18:00", "21:00", LeadTime::Before(30));

    let saved = calendar.new_event(draft).await.unwrap();

    let handle = ScheduleHandle::new("rec:1");
    assert_eq!(saved.event.schedule_handle.as_ref(), Some(&handle));
    assert_eq!(recorder.log(), [format!("schedule {}", saved.event.id)]);

    let stored = calendar.get_event(saved.event.id).await.unwrap().unwrap();
    assert_eq!(stored.schedule_handle, Some(handle));
}

#[tokio::test]
async fn event_lifecycle_rejects_invalid_drafts() {
    // Arrange
    let temp = TempState::new();
    let (calendar, recorder) = setup(&temp).await;
    let blank = test_event_draft("  ", "18:00", "21:00", LeadTime::None);
    let backwards = test_event_draft("Dinner", "21:00", "18:00", LeadTime::None);
    let past = test_event_draft("Breakfast", "08:00", "08:30", LeadTime::None);

    // Act & Assert
    for (draft, expected) in [
        (blank, "title"),
        (backwards, "end time"),
        (past, "in the past"),
    ] {
        let err = calendar.new_event(draft).await.unwrap_err();
        assert!(err.downcast_ref::<InvalidEvent>().is_some(), "{err}");
        assert!(err.to_string().contains(expected), "{err}");
    }

    let day = "2024-02-10".parse().unwrap();
    assert_eq!(calendar.count_events(day, day).await.unwrap(), 0);
    assert!(recorder.log().is_empty());
}

#[tokio::test]
async fn event_lifecycle_update_cancels_before_rescheduling() {
    // Arrange
    let temp = TempState::new();
    let (calendar, recorder) = setup(&temp).await;
    let draft = test_event_draft("Reunion dinner", "18:00", "21:00", LeadTime::Before(30));
    let id = calendar.new_event(draft).await.unwrap().event.id;

    // Act
    let patch = EventPatch {
        start: Some("19:00".parse().unwrap()),
        end: Some("22:00".parse().unwrap()),
        ..Default::default()
    };
    let saved = calendar.update_event(id, patch).await.unwrap();

    // Assert
    assert_eq!(
        recorder.log(),
        [
            format!("schedule {id}"),
            "cancel rec:1".to_string(),
            format!("schedule {id}"),
        ]
    );
    assert_eq!(saved.event.start.to_string(), "19:00");
    let stored = calendar.get_event(id).await.unwrap().unwrap();
    assert_eq!(stored.schedule_handle, Some(ScheduleHandle::new("rec:2")));
}

#[tokio::test]
async fn event_lifecycle_update_turning_reminder_off() {
    let temp = TempState::new();
    let (calendar, recorder) = setup(&temp).await;
    let draft = test_event_draft("Reunion dinner", "18:00", "21:00", LeadTime::Before(30));
    let id = calendar.new_event(draft).await.unwrap().event.id;

    let patch = EventPatch {
        reminder: Some(LeadTime::None),
        ..Default::default()
    };
    let saved = calendar.update_event(id, patch).await.unwrap();

    assert_eq!(recorder.log(), [format!("schedule {id}"), "cancel rec:1".to_string()]);
    assert_eq!(saved.event.schedule_handle, None);
    let stored = calendar.get_event(id).await.unwrap().unwrap();
    assert_eq!(stored.schedule_handle, None);
}

#[tokio::test]
async fn event_lifecycle_update_goes_through_when_cancel_is_refused() {
    // Arrange
    let temp = TempState::new();
    let (calendar, recorder) = setup(&temp).await;
    let draft = test_event_draft("Reunion dinner", "18:00", "21:00", LeadTime::Before(30));
    let id = calendar.new_event(draft).await.unwrap().event.id;
    recorder.fail_cancel_with(Some(DeliveryError::Rejected("unknown ticket".to_string())));

    // Act
    let patch = EventPatch {
        title: Some("Family dinner".to_string()),
        ..Default::default()
    };
    let saved = calendar.update_event(id, patch).await.unwrap();

    // Assert
    assert_eq!(
        recorder.log(),
        [
            format!("schedule {id}"),
            "cancel rec:1".to_string(),
            format!("schedule {id}"),
        ]
    );
    assert!(saved.reminder_error.is_none());
    let stored = calendar.get_event(id).await.unwrap().unwrap();
    assert_eq!(stored.title, "Family dinner");
    assert_eq!(stored.schedule_handle, Some(ScheduleHandle::new("rec:2")));
}

#[tokio::test]
async fn event_lifecycle_delete_goes_through_when_cancel_is_refused() {
    let temp = TempState::new();
    let (calendar, recorder) = setup(&temp).await;
    let draft = test_event_draft("Reunion dinner", "18:00", "21:00", LeadTime::Before(30));
    let id = calendar.new_event(draft).await.unwrap().event.id;
    recorder.fail_cancel_with(Some(DeliveryError::Rejected("unknown ticket".to_string())));

    let deleted = calendar.delete_event(id).await.unwrap();

    assert!(deleted);
    assert_eq!(recorder.log(), [format!("schedule {id}"), "cancel rec:1".to_string()]);
    assert!(calendar.get_event(id).await.unwrap().is_none());
}

#[tokio::test]
async fn event_lifecycle_keeps_event_when_notifier_is_unreachable() {
    // Arrange
    let temp = TempState::new();
    let (calendar, recorder) = setup(&temp).await;
    let draft = test_event_draft("Reunion dinner", "18:00", "21:00", LeadTime::Before(30));
    let original = calendar.new_event(draft).await.unwrap().event;
    recorder.fail_cancel_with(Some(DeliveryError::Unavailable("offline".to_string())));

    // Act
    let patch = EventPatch {
        title: Some("Family dinner".to_string()),
        ..Default::default()
    };
    let updated = calendar.update_event(original.id, patch).await;
    let deleted = calendar.delete_event(original.id).await;

    // Assert
    assert!(updated.is_err());
    assert!(deleted.is_err());
    let stored = calendar.get_event(original.id).await.unwrap().unwrap();
    assert_eq!(stored, original);
    assert_eq!(recorder.log().len(), 3, "no replacement was scheduled");
}

#[tokio::test]
async fn event_lifecycle_update_missing_event() {
    let temp = TempState::new();
    let (calendar, _) = setup(&temp).await;

    let result = calendar.update_event(404, EventPatch::default()).await;

    assert!(result.unwrap_err().to_string().contains("not found"));
}

#[tokio::test]
async fn event_lifecycle_delete_cancels_reminder() {
    // Arrange
    let temp = TempState::new();
    let (calendar, recorder) = setup(&temp).await;
    let draft = test_event_draft("Reunion dinner", "18:00", "21:00", LeadTime::AtStart);
    let id = calendar.new_event(draft).await.unwrap().event.id;

    // Act
    let deleted = calendar.delete_event(id).await.unwrap();
    let deleted_again = calendar.delete_event(id).await.unwrap();

    // Assert
    assert!(deleted);
    assert!(!deleted_again);
    assert_eq!(recorder.log(), [format!("schedule {id}"), "cancel rec:1".to_string()]);
    assert!(calendar.get_event(id).await.unwrap().is_none());
}

#[tokio::test]
async fn event_lifecycle_list_by_range() {
    // Arrange
    let temp = TempState::new();
    let (calendar, _) = setup(&temp).await;
    for (title, date, start) in [
        ("Lantern riddles", "2024-02-24", "19:00"),
        ("Dumplings", "2024-02-10", "12:00"),
        ("Fireworks", "2024-02-10", "10:00"),
        ("Back to work", "2024-02-18", "09:00"),
    ] {
        let mut draft = test_event_draft(title, start, "23:00", LeadTime::None);
        draft.date = date.parse().unwrap();
        calendar.new_event(draft).await.unwrap();
    }

    // Act
    let events = calendar
        .list_events(
            "2024-02-10".parse().unwrap(),
            "2024-02-18".parse().unwrap(),
            &Pager::from((10, 0)),
        )
        .await
        .unwrap();

    // Assert
    let titles: Vec<_> = events.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, ["Fireworks", "Dumplings", "Back to work"]);
}

#[tokio::test]
async fn event_lifecycle_persists_across_sessions() {
    let temp = TempState::new();
    let id = {
        let (calendar, _) = setup(&temp).await;
        let draft = test_event_draft("Temple fair", "14:00", "16:00", LeadTime::None);
        let id = calendar.new_event(draft).await.unwrap().event.id;
        calendar.close().await.unwrap();
        id
    };

    let (calendar, _) = setup(&temp).await;
    let event = calendar.get_event(id).await.unwrap().unwrap();
    assert_eq!(event.title, "Temple fair");
    assert!(temp.state_dir.join("lunacal.db").exists());
}
