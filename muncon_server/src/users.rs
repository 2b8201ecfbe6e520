use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use muncon_entities::{queries::query_user_by_email, schema::user};
use sea_orm::{prelude::*, DatabaseConnection, IntoActiveModel};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{hash_password, ExtractAuthenticatedUser},
    forms::SignupForm,
    response::{handle_error, APIError},
    state::AppState,
    validate::ValidatedJson,
};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub uuid: Uuid,
}

pub async fn create_user_handler(
    State(db): State<DatabaseConnection>,
    ValidatedJson(form): ValidatedJson<SignupForm>,
) -> Result<Json<CreateUserResponse>, APIError> {
    if query_user_by_email(&db, &form.email)
        .await
        .map_err(handle_error)?
        .is_some()
    {
        return Err((
            StatusCode::CONFLICT,
            "An account with this email already exists",
        )
            .into());
    }

    let new_user_uuid = Uuid::new_v4();
    let password_hash = hash_password(&form.password).map_err(handle_error)?;

    let model = user::Model {
        uuid: new_user_uuid,
        email: form.email,
        password_hash,
        phone: form.phone,
        birthdate: form.birthdate,
        nationality: form.nationality,
        dietary_preference: form.dietary_preference.map(|p| p.as_str().to_string()),
        created_at: chrono::Utc::now().naive_utc(),
    };

    model
        .into_active_model()
        .insert(&db)
        .await
        .map_err(handle_error)?;

    Ok(Json(CreateUserResponse {
        uuid: new_user_uuid,
    }))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub email: String,
    pub nationality: String,
}

pub async fn get_user_info(
    State(db): State<DatabaseConnection>,
    ExtractAuthenticatedUser(user): ExtractAuthenticatedUser,
) -> Result<Json<UserInfo>, APIError> {
    let user = user::Entity::find_by_id(user.uuid)
        .one(&db)
        .await
        .map_err(handle_error)?;
    let user = user.ok_or((StatusCode::NOT_FOUND, "User not found"))?;

    Ok(Json(UserInfo {
        email: user.email,
        nationality: user.nationality,
    }))
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user_handler))
        .route("/user", get(get_user_info))
}
