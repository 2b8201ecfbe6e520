use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use muncon_entities::{
    domain::application::ApplicationRole,
    queries::query_application_for_user,
    schema::{application, delegation},
};
use sea_orm::{prelude::*, ActiveValue, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::{
    auth::ExtractAuthenticatedUser,
    forms::{ChairApplicationForm, DelegateApplicationForm},
    response::{handle_error, APIError},
    state::AppState,
    validate::ValidatedJson,
};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateApplicationResponse {
    pub id: i32,
}

async fn ensure_first_application(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<(), APIError> {
    if query_application_for_user(db, user_id)
        .await
        .map_err(handle_error)?
        .is_some()
    {
        return Err((
            StatusCode::CONFLICT,
            "An application has already been submitted for this account",
        )
            .into());
    }
    Ok(())
}

// Delegation membership is a claim against a row the validation pipeline
// deliberately does not cross-check; resolve it here instead.
async fn ensure_delegation_exists(
    db: &DatabaseConnection,
    delegation_id: Option<i32>,
) -> Result<(), APIError> {
    if let Some(delegation_id) = delegation_id {
        delegation::Entity::find_by_id(delegation_id)
            .one(db)
            .await
            .map_err(handle_error)?
            .ok_or((StatusCode::BAD_REQUEST, "Delegation does not exist"))?;
    }
    Ok(())
}

pub async fn create_delegate_application_handler(
    State(db): State<DatabaseConnection>,
    ExtractAuthenticatedUser(user): ExtractAuthenticatedUser,
    ValidatedJson(form): ValidatedJson<DelegateApplicationForm>,
) -> Result<Json<CreateApplicationResponse>, APIError> {
    ensure_first_application(&db, user.uuid).await?;
    ensure_delegation_exists(&db, form.delegation_id).await?;

    let [choice1, choice2, choice3] = form.choices;
    let model = application::ActiveModel {
        user_id: ActiveValue::Set(user.uuid),
        role: ActiveValue::Set(ApplicationRole::Delegate.as_str().to_string()),
        motivation: ActiveValue::Set(form.motivation),
        experience: ActiveValue::Set(form.experience),
        delegation_id: ActiveValue::Set(form.delegation_id),
        shirt_size: ActiveValue::Set(form.shirt_size.map(|s| s.as_str().to_string())),
        choice1_committee: ActiveValue::Set(choice1.committee),
        choice1_country: ActiveValue::Set(Some(choice1.country)),
        choice2_committee: ActiveValue::Set(choice2.committee),
        choice2_country: ActiveValue::Set(Some(choice2.country)),
        choice3_committee: ActiveValue::Set(choice3.committee),
        choice3_country: ActiveValue::Set(Some(choice3.country)),
        created_at: ActiveValue::Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };

    let inserted = model.insert(&db).await.map_err(handle_error)?;

    Ok(Json(CreateApplicationResponse { id: inserted.id }))
}

pub async fn create_chair_application_handler(
    State(db): State<DatabaseConnection>,
    ExtractAuthenticatedUser(user): ExtractAuthenticatedUser,
    ValidatedJson(form): ValidatedJson<ChairApplicationForm>,
) -> Result<Json<CreateApplicationResponse>, APIError> {
    ensure_first_application(&db, user.uuid).await?;
    ensure_delegation_exists(&db, form.delegation_id).await?;

    let [choice1, choice2, choice3] = form.choices;
    let model = application::ActiveModel {
        user_id: ActiveValue::Set(user.uuid),
        role: ActiveValue::Set(ApplicationRole::Chair.as_str().to_string()),
        motivation: ActiveValue::Set(form.motivation),
        experience: ActiveValue::Set(form.experience),
        delegation_id: ActiveValue::Set(form.delegation_id),
        shirt_size: ActiveValue::Set(form.shirt_size.map(|s| s.as_str().to_string())),
        choice1_committee: ActiveValue::Set(choice1),
        choice1_country: ActiveValue::Set(None),
        choice2_committee: ActiveValue::Set(choice2),
        choice2_country: ActiveValue::Set(None),
        choice3_committee: ActiveValue::Set(choice3),
        choice3_country: ActiveValue::Set(None),
        created_at: ActiveValue::Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };

    let inserted = model.insert(&db).await.map_err(handle_error)?;

    Ok(Json(CreateApplicationResponse { id: inserted.id }))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationChoiceInfo {
    pub committee: i32,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationInfo {
    pub role: String,
    pub motivation: String,
    pub experience: String,
    pub delegation_id: Option<i32>,
    pub shirt_size: Option<String>,
    pub choices: Vec<ApplicationChoiceInfo>,
}

impl From<application::Model> for ApplicationInfo {
    fn from(model: application::Model) -> ApplicationInfo {
        ApplicationInfo {
            role: model.role,
            motivation: model.motivation,
            experience: model.experience,
            delegation_id: model.delegation_id,
            shirt_size: model.shirt_size,
            choices: vec![
                ApplicationChoiceInfo {
                    committee: model.choice1_committee,
                    country: model.choice1_country,
                },
                ApplicationChoiceInfo {
                    committee: model.choice2_committee,
                    country: model.choice2_country,
                },
                ApplicationChoiceInfo {
                    committee: model.choice3_committee,
                    country: model.choice3_country,
                },
            ],
        }
    }
}

pub async fn get_own_application_handler(
    State(db): State<DatabaseConnection>,
    ExtractAuthenticatedUser(user): ExtractAuthenticatedUser,
) -> Result<Json<ApplicationInfo>, APIError> {
    let application = query_application_for_user(&db, user.uuid)
        .await
        .map_err(handle_error)?;
    let application = application.ok_or((StatusCode::NOT_FOUND, "No application submitted"))?;

    Ok(Json(application.into()))
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/applications/delegate",
            post(create_delegate_application_handler),
        )
        .route(
            "/applications/chair",
            post(create_chair_application_handler),
        )
        .route("/application", get(get_own_application_handler))
}
