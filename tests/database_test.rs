// ABOUTME: Integration tests for the SQLite persistence layer
// ABOUTME: Covers babies, food intakes, and activities managers on in-memory and file databases
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use babycare_server::database::{ActivityFilter, Database, FoodIntakeFilter};
use babycare_server::models::{
    Activity, ActivityType, Baby, FoodIntake, FoodType, Gender, IntakeUnit, NutritionalInfo,
};
use chrono::{DateTime, TimeZone, Utc};
use helpers::test_utils::create_test_database;
use std::collections::BTreeMap;
use tempfile::TempDir;
use uuid::Uuid;

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).single().unwrap()
}

fn baby(parent_id: &str, name: &str, created_at: DateTime<Utc>) -> Baby {
    Baby {
        id: Uuid::new_v4(),
        parent_id: parent_id.to_owned(),
        name: name.to_owned(),
        birth_date: at(1, 0),
        gender: Gender::Male,
        weight: None,
        height: Some(51.0),
        created_at,
    }
}

fn intake(baby_id: Uuid, consumed_at: DateTime<Utc>) -> FoodIntake {
    FoodIntake {
        id: Uuid::new_v4(),
        baby_id,
        food_name: "Breast milk".to_owned(),
        food_type: FoodType::BreastMilk,
        amount: 90.0,
        unit: IntakeUnit::Ml,
        consumed_at,
        nutritional_info: NutritionalInfo {
            calories: 62.0,
            vitamins: BTreeMap::from([("D".to_owned(), 0.1)]),
            ..NutritionalInfo::default()
        },
        notes: String::new(),
        created_at: Utc::now(),
    }
}

fn activity(baby_id: Uuid, activity_type: ActivityType, start_time: DateTime<Utc>) -> Activity {
    Activity {
        id: Uuid::new_v4(),
        baby_id,
        activity_type,
        details: BTreeMap::from([("consistency".to_owned(), "soft".to_owned())]),
        start_time,
        end_time: None,
        notes: "ok".to_owned(),
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_baby_round_trip_and_ownership() {
    let db = create_test_database().await;
    let stored = baby("parent-1", "Leo", at(1, 9));
    db.babies().create(&stored).await.unwrap();

    let found = db.babies().get_for_parent(stored.id, "parent-1").await.unwrap();
    assert_eq!(found, Some(stored.clone()));

    let hidden = db.babies().get_for_parent(stored.id, "parent-2").await.unwrap();
    assert!(hidden.is_none());
}

#[tokio::test]
async fn test_babies_listed_newest_first() {
    let db = create_test_database().await;
    db.babies().create(&baby("parent-1", "Older", at(1, 9))).await.unwrap();
    db.babies().create(&baby("parent-1", "Newer", at(2, 9))).await.unwrap();
    db.babies().create(&baby("parent-2", "Other", at(3, 9))).await.unwrap();

    let names: Vec<String> = db
        .babies()
        .list_for_parent("parent-1")
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.name)
        .collect();
    assert_eq!(names, vec!["Newer", "Older"]);
}

#[tokio::test]
async fn test_food_intake_filters_are_inclusive() {
    let db = create_test_database().await;
    let owner = baby("parent-1", "Leo", at(1, 9));
    db.babies().create(&owner).await.unwrap();
    for day in 1..=4 {
        db.food_intake().create(&intake(owner.id, at(day, 8))).await.unwrap();
    }

    let filter = FoodIntakeFilter {
        start: Some(at(2, 8)),
        end: Some(at(3, 8)),
    };
    let intakes = db.food_intake().list(owner.id, &filter).await.unwrap();

    assert_eq!(intakes.len(), 2);
    assert_eq!(intakes[0].consumed_at, at(3, 8));
    assert_eq!(intakes[1].consumed_at, at(2, 8));
    assert_eq!(intakes[0].nutritional_info.calories, 62.0);
    assert_eq!(intakes[0].nutritional_info.vitamins.get("D"), Some(&0.1));
}

#[tokio::test]
async fn test_food_intake_scoped_to_baby() {
    let db = create_test_database().await;
    let first = baby("parent-1", "Leo", at(1, 9));
    let second = baby("parent-1", "Mia", at(1, 10));
    db.babies().create(&first).await.unwrap();
    db.babies().create(&second).await.unwrap();
    db.food_intake().create(&intake(first.id, at(1, 8))).await.unwrap();

    let none = db
        .food_intake()
        .list(second.id, &FoodIntakeFilter::default())
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_activities_filter_by_type_and_window() {
    let db = create_test_database().await;
    let owner = baby("parent-1", "Leo", at(1, 9));
    db.babies().create(&owner).await.unwrap();
    db.activities().create(&activity(owner.id, ActivityType::Poop, at(1, 7))).await.unwrap();
    db.activities().create(&activity(owner.id, ActivityType::Sleep, at(1, 12))).await.unwrap();
    db.activities().create(&activity(owner.id, ActivityType::Poop, at(2, 7))).await.unwrap();

    let poops = db
        .activities()
        .list(
            owner.id,
            &ActivityFilter {
                activity_type: Some(ActivityType::Poop),
                ..ActivityFilter::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(poops.len(), 2);
    assert_eq!(poops[0].start_time, at(2, 7));
    assert_eq!(poops[0].details.get("consistency").map(String::as_str), Some("soft"));

    let first_day = db
        .activities()
        .list(
            owner.id,
            &ActivityFilter {
                activity_type: None,
                start: Some(at(1, 0)),
                end: Some(at(1, 12)),
            },
        )
        .await
        .unwrap();
    assert_eq!(first_day.len(), 2);
    assert_eq!(first_day[0].activity_type, ActivityType::Sleep);
}

#[tokio::test]
async fn test_file_database_persists_across_connections() {
    let dir = TempDir::new().unwrap();
    let url = format!("sqlite:{}", dir.path().join("nested/babycare.db").display());
    let stored = baby("parent-1", "Leo", at(1, 9));

    {
        let db = Database::new(&url).await.unwrap();
        db.babies().create(&stored).await.unwrap();
    }

    let reopened = Database::new(&url).await.unwrap();
    let babies = reopened.babies().list_for_parent("parent-1").await.unwrap();
    assert_eq!(babies.len(), 1);
    assert_eq!(babies[0].id, stored.id);
    reopened.ping().await.unwrap();
}
