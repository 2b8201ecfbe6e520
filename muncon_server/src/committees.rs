use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use muncon_entities::schema::{committee, committee_country};
use sea_orm::{prelude::*, DatabaseConnection, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::{
    forms::CommitteeFilter,
    response::{handle_error, APIError},
    state::AppState,
    validate::ValidatedQuery,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitteeInfo {
    pub id: i32,
    pub name: String,
    pub difficulty: String,
}

pub async fn list_committees_handler(
    State(db): State<DatabaseConnection>,
    ValidatedQuery(filter): ValidatedQuery<CommitteeFilter>,
) -> Result<Json<Vec<CommitteeInfo>>, APIError> {
    let mut query = committee::Entity::find();
    if let Some(difficulty) = filter.difficulty {
        query = query.filter(committee::Column::Difficulty.eq(difficulty.as_str()));
    }

    let committees = query
        .order_by_asc(committee::Column::Id)
        .all(&db)
        .await
        .map_err(handle_error)?;

    Ok(Json(
        committees
            .into_iter()
            .map(|c| CommitteeInfo {
                id: c.id,
                name: c.name,
                difficulty: c.difficulty,
            })
            .collect(),
    ))
}

pub async fn get_committee_countries_handler(
    State(db): State<DatabaseConnection>,
    Path(committee_id): Path<i32>,
) -> Result<Json<Vec<String>>, APIError> {
    committee::Entity::find_by_id(committee_id)
        .one(&db)
        .await
        .map_err(handle_error)?
        .ok_or((StatusCode::NOT_FOUND, "Committee not found"))?;

    let countries = committee_country::Entity::find()
        .filter(committee_country::Column::CommitteeId.eq(committee_id))
        .order_by_asc(committee_country::Column::Country)
        .all(&db)
        .await
        .map_err(handle_error)?;

    Ok(Json(countries.into_iter().map(|c| c.country).collect()))
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/committees", get(list_committees_handler))
        .route(
            "/committees/:committee_id/countries",
            get(get_committee_countries_handler),
        )
}
