// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Day and month overviews combining lunar dates, holidays and events.

use lunacal_core::{Calendar, LeadTime};
use lunacal_lunar::{Holiday, SolarTerm};

use crate::common::{TempState, fixed_now, test_config, test_event_draft};

async fn setup(temp: &TempState) -> Calendar {
    let mut calendar = Calendar::new(test_config(&temp.state_dir)).await.unwrap();
    calendar.set_now(&fixed_now());
    calendar
}

#[tokio::test]
async fn days_spring_festival_overview() {
    // Arrange
    let temp = TempState::new();
    let calendar = setup(&temp).await;
    let draft = test_event_draft("Visit grandparents", "10:00", "12:00", LeadTime::None);
    calendar.new_event(draft).await.unwrap();

    // Act
    let info = calendar
        .day_info("2024-02-10".parse().unwrap())
        .await
        .unwrap();

    // Assert
    let lunar = info.lunar.unwrap();
    assert_eq!((lunar.month(), lunar.day()), (1, 1));
    assert_eq!(lunar.full_label(), "甲辰龙年 正月初一");
    assert_eq!(info.holiday, Some(Holiday::SpringFestival));
    assert_eq!(info.solar_term, None);
    assert_eq!(info.events.len(), 1);
    assert_eq!(info.events[0].title, "Visit grandparents");
}

#[tokio::test]
async fn days_outside_lunar_range_keep_gregorian_holidays() {
    let temp = TempState::new();
    let calendar = setup(&temp).await;

    let info = calendar
        .day_info("2101-01-01".parse().unwrap())
        .await
        .unwrap();

    assert!(info.lunar.is_none());
    assert_eq!(info.holiday, Some(Holiday::NewYearsDay));
}

#[tokio::test]
async fn days_month_overview() {
    // Arrange
    let temp = TempState::new();
    let calendar = setup(&temp).await;
    let mut draft = test_event_draft("Lantern riddles", "19:00", "21:00", LeadTime::None);
    draft.date = "2024-02-24".parse().unwrap();
    calendar.new_event(draft).await.unwrap();

    // Act
    let days = calendar
        .month_info("2024-02-17".parse().unwrap())
        .await
        .unwrap();

    // Assert
    assert_eq!(days.len(), 29);
    assert_eq!(days[0].date.to_string(), "2024-02-01");
    assert_eq!(days[28].date.to_string(), "2024-02-29");

    let start_of_spring = &days[3];
    assert_eq!(start_of_spring.solar_term, Some(SolarTerm::StartOfSpring));

    let eve = &days[8];
    assert_eq!(eve.holiday, Some(Holiday::NewYearsEve));

    let lantern = &days[23];
    assert_eq!(lantern.holiday, Some(Holiday::LanternFestival));
    assert_eq!(lantern.events.len(), 1);

    let with_events = days.iter().filter(|d| !d.events.is_empty()).count();
    assert_eq!(with_events, 1);
}
