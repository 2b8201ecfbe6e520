use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use muncon_entities::schema::delegation;
use sea_orm::{prelude::*, ActiveValue, DatabaseConnection, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::{
    auth::ExtractAuthenticatedUser,
    forms::DelegationForm,
    response::{handle_error, APIError},
    state::AppState,
    validate::ValidatedJson,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelegationInfo {
    pub id: i32,
    pub name: String,
    pub country: String,
    pub estimated_delegates: i32,
}

impl From<delegation::Model> for DelegationInfo {
    fn from(model: delegation::Model) -> DelegationInfo {
        DelegationInfo {
            id: model.id,
            name: model.name,
            country: model.country,
            estimated_delegates: model.estimated_delegates,
        }
    }
}

pub async fn list_delegations_handler(
    State(db): State<DatabaseConnection>,
) -> Result<Json<Vec<DelegationInfo>>, APIError> {
    let delegations = delegation::Entity::find()
        .order_by_asc(delegation::Column::Name)
        .all(&db)
        .await
        .map_err(handle_error)?;

    Ok(Json(delegations.into_iter().map(Into::into).collect()))
}

pub async fn create_delegation_handler(
    State(db): State<DatabaseConnection>,
    ExtractAuthenticatedUser(_user): ExtractAuthenticatedUser,
    ValidatedJson(form): ValidatedJson<DelegationForm>,
) -> Result<Json<DelegationInfo>, APIError> {
    let existing = delegation::Entity::find()
        .filter(delegation::Column::Name.eq(&form.name))
        .one(&db)
        .await
        .map_err(handle_error)?;
    if existing.is_some() {
        return Err((
            StatusCode::CONFLICT,
            "A delegation with this name is already registered",
        )
            .into());
    }

    let model = delegation::ActiveModel {
        name: ActiveValue::Set(form.name),
        country: ActiveValue::Set(form.country),
        estimated_delegates: ActiveValue::Set(form.estimated_delegates),
        ..Default::default()
    };
    let inserted = model.insert(&db).await.map_err(handle_error)?;

    Ok(Json(inserted.into()))
}

pub(crate) fn router() -> Router<AppState> {
    Router::new().route(
        "/delegations",
        get(list_delegations_handler).post(create_delegation_handler),
    )
}
