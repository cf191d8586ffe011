// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Reminder delivery through the local outbox and the push relay.

use std::sync::Arc;

use jiff::{SignedDuration, Zoned};
use lunacal_core::{Calendar, DeliveryError, EventPatch, LeadTime, REMINDER_SCREEN};
use lunacal_push::PushConfig;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{Recorder, TempState, fixed_now, test_config, test_event_draft};

fn later(minutes: i64) -> Zoned {
    fixed_now()
        .checked_add(SignedDuration::from_mins(minutes))
        .unwrap()
}

#[tokio::test]
async fn reminders_local_outbox_releases_at_trigger_time() {
    // Arrange
    let temp = TempState::new();
    let mut calendar = Calendar::new(test_config(&temp.state_dir)).await.unwrap();
    calendar.set_now(&fixed_now());
    let draft = test_event_draft("Lion dance", "10:00", "11:00", LeadTime::Before(15));
    let saved = calendar.new_event(draft).await.unwrap();
    let handle = saved.event.schedule_handle.clone().unwrap();
    assert!(handle.as_str().starts_with("local:"));

    // Act & Assert: nothing before 09:45
    calendar.set_now(&later(44));
    assert!(calendar.due_notifications().await.unwrap().is_empty());

    calendar.set_now(&later(45));
    let due = calendar.due_notifications().await.unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].handle, handle);
    assert_eq!(due[0].body, "Lion dance starts in 15 min");
    assert_eq!(due[0].data.event_id, saved.event.id);
    assert_eq!(due[0].data.screen, REMINDER_SCREEN);

    assert!(calendar.mark_delivered(&handle).await.unwrap());
    assert!(calendar.due_notifications().await.unwrap().is_empty());
}

#[tokio::test]
async fn reminders_missed_trigger_is_delivered_immediately() {
    let temp = TempState::new();
    let mut calendar = Calendar::new(test_config(&temp.state_dir)).await.unwrap();
    calendar.set_now(&fixed_now());

    // Starts in ten minutes but asks for an hour of notice.
    let draft = test_event_draft("Lion dance", "09:10", "10:00", LeadTime::Before(60));
    calendar.new_event(draft).await.unwrap();

    let due = calendar.due_notifications().await.unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(
        due[0].body,
        "Reminder time already passed: Lion dance on 2024-02-10 at 09:10"
    );
    assert_eq!(due[0].deliver_at, None);
}

#[tokio::test]
async fn reminders_delete_removes_queued_notification() {
    let temp = TempState::new();
    let mut calendar = Calendar::new(test_config(&temp.state_dir)).await.unwrap();
    calendar.set_now(&fixed_now());
    let draft = test_event_draft("Lion dance", "09:10", "10:00", LeadTime::Before(60));
    let id = calendar.new_event(draft).await.unwrap().event.id;

    calendar.delete_event(id).await.unwrap();

    assert!(calendar.due_notifications().await.unwrap().is_empty());
}

#[tokio::test]
async fn reminders_delivery_failure_keeps_event_without_handle() {
    // Arrange
    let temp = TempState::new();
    let recorder = Arc::new(Recorder::default());
    recorder.fail_schedule_with(Some(DeliveryError::Rejected("quota".to_string())));
    let mut calendar = Calendar::with_notifier(test_config(&temp.state_dir), recorder.clone())
        .await
        .unwrap();
    calendar.set_now(&fixed_now());

    // Act
    let draft = test_event_draft("Lion dance", "10:00", "11:00", LeadTime::Before(15));
    let saved = calendar.new_event(draft).await.unwrap();

    // Assert
    assert_eq!(
        saved.reminder_error,
        Some(DeliveryError::Rejected("quota".to_string()))
    );
    let stored = calendar.get_event(saved.event.id).await.unwrap().unwrap();
    assert_eq!(stored.schedule_handle, None);
}

#[tokio::test]
async fn reminders_go_through_push_relay() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/send"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"status": "ok", "id": "t-9"}})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/cancel"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let temp = TempState::new();
    let mut config = test_config(&temp.state_dir);
    config.push = Some(PushConfig {
        base_url: server.uri(),
        device_token: "device-1".to_string(),
        ..PushConfig::default()
    });
    let mut calendar = Calendar::new(config).await.unwrap();
    calendar.set_now(&fixed_now());

    // Act
    let draft = test_event_draft("Lion dance", "10:00", "11:00", LeadTime::Before(15));
    let saved = calendar.new_event(draft).await.unwrap();
    calendar.delete_event(saved.event.id).await.unwrap();

    // Assert
    assert_eq!(
        saved.event.schedule_handle.unwrap().as_str(),
        "push:t-9"
    );
    assert!(calendar.due_notifications().await.unwrap().is_empty());
}

#[tokio::test]
async fn reminders_fall_back_to_local_outbox_when_relay_is_down() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/send"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let temp = TempState::new();
    let mut config = test_config(&temp.state_dir);
    config.push = Some(PushConfig {
        base_url: server.uri(),
        device_token: "device-1".to_string(),
        ..PushConfig::default()
    });
    let mut calendar = Calendar::new(config).await.unwrap();
    calendar.set_now(&fixed_now());

    // Act
    let draft = test_event_draft("Lion dance", "09:10", "10:00", LeadTime::Before(60));
    let saved = calendar.new_event(draft).await.unwrap();

    // Assert
    assert!(saved.reminder_error.is_none());
    let handle = saved.event.schedule_handle.unwrap();
    assert!(handle.as_str().starts_with("local:"));
    let due = calendar.due_notifications().await.unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].handle, handle);
}

#[tokio::test]
async fn reminders_relay_refusal_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/send"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"data": {"status": "error", "message": "DeviceNotRegistered"}}),
        ))
        .mount(&server)
        .await;

    let temp = TempState::new();
    let mut config = test_config(&temp.state_dir);
    config.push = Some(PushConfig {
        base_url: server.uri(),
        device_token: "device-1".to_string(),
        ..PushConfig::default()
    });
    let mut calendar = Calendar::new(config).await.unwrap();
    calendar.set_now(&fixed_now());

    let draft = test_event_draft("Lion dance", "10:00", "11:00", LeadTime::Before(15));
    let saved = calendar.new_event(draft).await.unwrap();

    assert!(matches!(saved.reminder_error, Some(DeliveryError::Rejected(_))));
    assert_eq!(saved.event.schedule_handle, None);
    assert!(calendar.due_notifications().await.unwrap().is_empty());
}

#[tokio::test]
async fn reminders_relay_forgetting_a_ticket_does_not_block_changes() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/send"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"status": "ok", "id": "t-1"}})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/cancel"))
        .respond_with(ResponseTemplate::new(404).set_body_string("unknown ticket"))
        .expect(2)
        .mount(&server)
        .await;

    let temp = TempState::new();
    let mut config = test_config(&temp.state_dir);
    config.push = Some(PushConfig {
        base_url: server.uri(),
        device_token: "device-1".to_string(),
        ..PushConfig::default()
    });
    let mut calendar = Calendar::new(config).await.unwrap();
    calendar.set_now(&fixed_now());
    let draft = test_event_draft("Lion dance", "10:00", "11:00", LeadTime::Before(15));
    let id = calendar.new_event(draft).await.unwrap().event.id;

    // Act
    let patch = EventPatch {
        title: Some("Dragon dance".to_string()),
        ..Default::default()
    };
    let updated = calendar.update_event(id, patch).await.unwrap();
    let deleted = calendar.delete_event(id).await.unwrap();

    // Assert
    assert_eq!(updated.event.title, "Dragon dance");
    assert_eq!(updated.event.schedule_handle.unwrap().as_str(), "push:t-1");
    assert!(deleted);
    assert!(calendar.get_event(id).await.unwrap().is_none());
}
