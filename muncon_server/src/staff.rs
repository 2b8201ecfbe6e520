use axum::{extract::State, routing::get, Json, Router};
use itertools::Itertools;
use muncon_entities::schema::staff_member;
use sea_orm::{prelude::*, DatabaseConnection, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::{
    response::{handle_error, APIError},
    state::AppState,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffMemberInfo {
    pub name: String,
    pub position: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffTeam {
    pub team: String,
    pub members: Vec<StaffMemberInfo>,
}

pub async fn get_staff_directory_handler(
    State(db): State<DatabaseConnection>,
) -> Result<Json<Vec<StaffTeam>>, APIError> {
    let members = staff_member::Entity::find()
        .order_by_asc(staff_member::Column::Id)
        .all(&db)
        .await
        .map_err(handle_error)?;

    let teams = members
        .into_iter()
        .into_group_map_by(|m| m.team.clone())
        .into_iter()
        .sorted_by(|a, b| a.0.cmp(&b.0))
        .map(|(team, members)| StaffTeam {
            team,
            members: members
                .into_iter()
                .map(|m| StaffMemberInfo {
                    name: m.name,
                    position: m.position,
                    email: m.email,
                })
                .collect(),
        })
        .collect();

    Ok(Json(teams))
}

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/staff", get(get_staff_directory_handler))
}
