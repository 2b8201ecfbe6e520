mod common;

use muncon_entities::queries::{
    query_reference_snapshot, query_user_by_email, ReferenceProvider,
};
use sea_orm::{prelude::*, ActiveValue, IntoActiveModel};

#[tokio::test]
async fn test_snapshot_contains_seeded_committees() {
    let db = common::set_up_db(true).await.unwrap();

    let snapshot = query_reference_snapshot(&db).await.unwrap();

    assert_eq!(snapshot.committee_ids(), vec![1, 2, 3]);
    assert!(snapshot.has_committee(2));
    assert!(!snapshot.has_committee(17));
}

#[tokio::test]
async fn test_snapshot_countries_are_scoped_and_sorted() {
    let db = common::set_up_db(true).await.unwrap();

    let snapshot = query_reference_snapshot(&db).await.unwrap();

    assert_eq!(
        snapshot.countries_for(1),
        vec!["CN", "FR", "GB", "RU", "US"]
    );
    assert_eq!(snapshot.countries_for(3), vec!["AR", "DE", "JP", "ZA"]);
    assert!(snapshot.countries_for(99).is_empty());
}

#[tokio::test]
async fn test_cached_provider_matches_live_provider() {
    let db = common::set_up_db(true).await.unwrap();

    let live = db.reference_snapshot().await.unwrap();
    let cached = live.reference_snapshot().await.unwrap();

    assert_eq!(live, cached);
}

#[tokio::test]
async fn test_query_user_by_email() {
    let db = common::set_up_db(false).await.unwrap();

    let user = muncon_entities::schema::user::Model {
        uuid: Uuid::from_u128(1),
        email: "anna@example.com".to_string(),
        password_hash: "hash".to_string(),
        phone: None,
        birthdate: chrono::NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
        nationality: "DE".to_string(),
        dietary_preference: None,
        created_at: chrono::NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap(),
    };
    user.into_active_model().insert(&db).await.unwrap();

    let found = query_user_by_email(&db, "anna@example.com").await.unwrap();
    assert_eq!(found.map(|u| u.uuid), Some(Uuid::from_u128(1)));

    let missing = query_user_by_email(&db, "nobody@example.com").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_second_application_for_user_is_rejected() {
    let db = common::set_up_db(true).await.unwrap();

    let user = muncon_entities::schema::user::Model {
        uuid: Uuid::from_u128(7),
        email: "chair@example.com".to_string(),
        password_hash: "hash".to_string(),
        phone: None,
        birthdate: chrono::NaiveDate::from_ymd_opt(1999, 3, 14).unwrap(),
        nationality: "FR".to_string(),
        dietary_preference: None,
        created_at: chrono::NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap(),
    };
    user.into_active_model().insert(&db).await.unwrap();

    let application = muncon_entities::schema::application::ActiveModel {
        user_id: ActiveValue::Set(Uuid::from_u128(7)),
        role: ActiveValue::Set("chair".to_string()),
        motivation: ActiveValue::Set("I want to chair a committee.".to_string()),
        experience: ActiveValue::Set("Three conferences as a delegate.".to_string()),
        delegation_id: ActiveValue::Set(None),
        shirt_size: ActiveValue::Set(None),
        choice1_committee: ActiveValue::Set(1),
        choice1_country: ActiveValue::Set(None),
        choice2_committee: ActiveValue::Set(2),
        choice2_country: ActiveValue::Set(None),
        choice3_committee: ActiveValue::Set(3),
        choice3_country: ActiveValue::Set(None),
        created_at: ActiveValue::Set(
            chrono::NaiveDate::from_ymd_opt(2024, 6, 2)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
        ),
        ..Default::default()
    };
    application.clone().insert(&db).await.unwrap();

    let second = application.insert(&db).await;
    assert!(second.is_err());
}
