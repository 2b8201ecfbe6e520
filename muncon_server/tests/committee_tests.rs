mod common;

use muncon_server::{
    committees::CommitteeInfo,
    validate::{RequestPart, ValidationRejection},
};
use tracing_test::traced_test;

use crate::common::FixtureOptions;

async fn seeded_fixture() -> common::Fixture {
    common::Fixture::new(FixtureOptions {
        seed_reference_data: true,
    })
    .await
}

#[tokio::test]
#[traced_test]
async fn test_list_committees() {
    let mut fixture = seeded_fixture().await;

    let mut response = fixture.get("/api/committees").await;
    assert_eq!(response.status(), 200);

    let committees: Vec<CommitteeInfo> = response.json().await;
    assert_eq!(committees.len(), 3);
    assert_eq!(committees[0].id, 1);
    assert_eq!(committees[0].name, "Security Council");
    assert_eq!(committees[0].difficulty, "Advanced");
}

#[tokio::test]
#[traced_test]
async fn test_filter_committees_by_difficulty() {
    let mut fixture = seeded_fixture().await;

    let mut response = fixture.get("/api/committees?difficulty=Beginner").await;
    assert_eq!(response.status(), 200);

    let committees: Vec<CommitteeInfo> = response.json().await;
    assert_eq!(committees.len(), 1);
    assert_eq!(committees[0].name, "World Health Organization");
}

#[tokio::test]
#[traced_test]
async fn test_unknown_difficulty_is_rejected_with_the_options() {
    let mut fixture = seeded_fixture().await;

    let mut response = fixture.get("/api/committees?difficulty=Impossible").await;
    assert_eq!(response.status(), 422);

    let rejection: ValidationRejection = response.json().await;
    // Only the query failed, so only the query is reported.
    assert_eq!(rejection.description.len(), 1);
    assert_eq!(rejection.description[0].part, RequestPart::Query);

    let errors = &rejection.description[0].errors;
    assert_eq!(errors[0].field, "difficulty");
    assert_eq!(
        errors[0].options,
        Some(vec![
            "Beginner".to_string(),
            "Intermediate".to_string(),
            "Advanced".to_string()
        ])
    );
}

#[tokio::test]
#[traced_test]
async fn test_committee_country_list_is_sorted() {
    let mut fixture = seeded_fixture().await;

    let mut response = fixture.get("/api/committees/1/countries").await;
    assert_eq!(response.status(), 200);

    let countries: Vec<String> = response.json().await;
    assert_eq!(countries, vec!["CN", "FR", "GB", "RU", "US"]);
}

#[tokio::test]
#[traced_test]
async fn test_unknown_committee_countries_is_not_found() {
    let mut fixture = seeded_fixture().await;

    let response = fixture.get("/api/committees/99/countries").await;
    assert_eq!(response.status(), 404);
}
