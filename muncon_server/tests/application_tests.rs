mod common;

use assert_matches::assert_matches;
use muncon_server::{
    applications::{ApplicationInfo, CreateApplicationResponse},
    validate::{ErrorKind, RequestPart, ValidationRejection},
};
use tracing_test::traced_test;

use crate::common::FixtureOptions;

fn delegate_body() -> serde_json::Value {
    serde_json::json!({
        "motivation": "I have wanted to attend this conference for years.",
        "experience": "Two previous conferences as a delegate.",
        "delegation_id": -1,
        "shirt_size": "M",
        "choice1_committee": 1,
        "choice1_country": "US",
        "choice2_committee": 2,
        "choice2_country": "FR",
        "choice3_committee": 3,
        "choice3_country": "DE",
    })
}

fn chair_body() -> serde_json::Value {
    serde_json::json!({
        "motivation": "I would like to chair a committee this year.",
        "experience": "Chaired twice at other conferences.",
        "choice1_committee": 1,
        "choice2_committee": 2,
        "choice3_committee": 3,
    })
}

async fn seeded_fixture_with_user() -> common::Fixture {
    let mut fixture = common::Fixture::new(FixtureOptions {
        seed_reference_data: true,
    })
    .await;
    fixture.create_user_and_token().await;
    fixture
}

#[tokio::test]
#[traced_test]
async fn test_delegate_application_round_trip() {
    let mut fixture = seeded_fixture_with_user().await;

    let mut response = fixture
        .post_json("/api/applications/delegate", delegate_body())
        .await;
    assert_eq!(response.status(), 200);
    response.json::<CreateApplicationResponse>().await;

    let mut response = fixture.get("/api/application").await;
    assert_eq!(response.status(), 200);

    let info: ApplicationInfo = response.json().await;
    assert_eq!(info.role, "delegate");
    assert_eq!(info.delegation_id, None);
    assert_eq!(info.shirt_size, Some("M".to_string()));
    assert_eq!(info.choices.len(), 3);
    assert_eq!(info.choices[0].committee, 1);
    assert_eq!(info.choices[0].country, Some("US".to_string()));
}

#[tokio::test]
#[traced_test]
async fn test_applications_require_authentication() {
    let mut fixture = common::Fixture::new(FixtureOptions {
        seed_reference_data: true,
    })
    .await;

    let response = fixture
        .post_json("/api/applications/delegate", delegate_body())
        .await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[traced_test]
async fn test_unknown_committee_is_a_reference_error_without_country_noise() {
    let mut fixture = seeded_fixture_with_user().await;

    let mut body = delegate_body();
    body["choice1_committee"] = 5.into();
    body["choice1_country"] = "ZZ".into();

    let mut response = fixture
        .post_json("/api/applications/delegate", body)
        .await;
    assert_eq!(response.status(), 422);

    let rejection: ValidationRejection = response.json().await;
    assert_eq!(rejection.description.len(), 1);
    assert_eq!(rejection.description[0].part, RequestPart::Body);

    let errors = &rejection.description[0].errors;
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "choice1_committee");
    assert_matches!(errors[0].kind, ErrorKind::Reference);
    assert_eq!(
        errors[0].options,
        Some(vec!["1".to_string(), "2".to_string(), "3".to_string()])
    );
}

#[tokio::test]
#[traced_test]
async fn test_unknown_country_lists_the_committees_countries() {
    let mut fixture = seeded_fixture_with_user().await;

    let mut body = delegate_body();
    body["choice1_country"] = "ZZ".into();

    let mut response = fixture
        .post_json("/api/applications/delegate", body)
        .await;
    assert_eq!(response.status(), 422);

    let rejection: ValidationRejection = response.json().await;
    let errors = &rejection.description[0].errors;
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "choice1_country");
    assert_matches!(errors[0].kind, ErrorKind::Reference);
    assert_eq!(
        errors[0].options,
        Some(vec![
            "CN".to_string(),
            "FR".to_string(),
            "GB".to_string(),
            "RU".to_string(),
            "US".to_string()
        ])
    );
}

#[tokio::test]
#[traced_test]
async fn test_missing_fields_are_reported_per_field() {
    let mut fixture = seeded_fixture_with_user().await;

    let mut body = delegate_body();
    body.as_object_mut().unwrap().remove("motivation");

    let mut response = fixture
        .post_json("/api/applications/delegate", body)
        .await;
    assert_eq!(response.status(), 422);

    let rejection: ValidationRejection = response.json().await;
    let errors = &rejection.description[0].errors;
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "motivation");
}

#[tokio::test]
#[traced_test]
async fn test_second_application_is_a_conflict() {
    let mut fixture = seeded_fixture_with_user().await;

    let response = fixture
        .post_json("/api/applications/delegate", delegate_body())
        .await;
    assert_eq!(response.status(), 200);

    let response = fixture
        .post_json("/api/applications/chair", chair_body())
        .await;
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[traced_test]
async fn test_chair_application_round_trip() {
    let mut fixture = seeded_fixture_with_user().await;

    let response = fixture
        .post_json("/api/applications/chair", chair_body())
        .await;
    assert_eq!(response.status(), 200);

    let mut response = fixture.get("/api/application").await;
    assert_eq!(response.status(), 200);

    let info: ApplicationInfo = response.json().await;
    assert_eq!(info.role, "chair");
    assert_eq!(info.choices[1].committee, 2);
    assert_eq!(info.choices[1].country, None);
}

#[tokio::test]
#[traced_test]
async fn test_chair_application_checks_committee_existence() {
    let mut fixture = seeded_fixture_with_user().await;

    let mut body = chair_body();
    body["choice3_committee"] = 42.into();

    let mut response = fixture.post_json("/api/applications/chair", body).await;
    assert_eq!(response.status(), 422);

    let rejection: ValidationRejection = response.json().await;
    let errors = &rejection.description[0].errors;
    assert_eq!(errors[0].field, "choice3_committee");
}

#[tokio::test]
#[traced_test]
async fn test_claiming_an_unknown_delegation_is_a_bad_request() {
    let mut fixture = seeded_fixture_with_user().await;

    let mut body = delegate_body();
    body["delegation_id"] = 99.into();

    let response = fixture
        .post_json("/api/applications/delegate", body)
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[traced_test]
async fn test_claiming_a_seeded_delegation_is_persisted() {
    let mut fixture = seeded_fixture_with_user().await;

    let mut body = delegate_body();
    body["delegation_id"] = 1.into();

    let response = fixture
        .post_json("/api/applications/delegate", body)
        .await;
    assert_eq!(response.status(), 200);

    let mut response = fixture.get("/api/application").await;
    let info: ApplicationInfo = response.json().await;
    assert_eq!(info.delegation_id, Some(1));
}

#[tokio::test]
#[traced_test]
async fn test_no_application_is_not_found() {
    let mut fixture = seeded_fixture_with_user().await;

    let response = fixture.get("/api/application").await;
    assert_eq!(response.status(), 404);
}
