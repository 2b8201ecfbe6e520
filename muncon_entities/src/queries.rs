use async_trait::async_trait;
use itertools::Itertools;
use sea_orm::{prelude::*, ConnectionTrait, DatabaseConnection};
use uuid::Uuid;

use crate::schema;

/// Point-in-time read of the lookup tables the application forms are
/// cross-checked against. Taken once per validation, never written to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceSnapshot {
    pub committees: Vec<schema::committee::Model>,
    pub committee_countries: Vec<schema::committee_country::Model>,
}

impl ReferenceSnapshot {
    pub fn has_committee(&self, committee_id: i32) -> bool {
        self.committees.iter().any(|c| c.id == committee_id)
    }

    pub fn committee_ids(&self) -> Vec<i32> {
        self.committees.iter().map(|c| c.id).sorted().collect()
    }

    /// Country codes available in the given committee, sorted.
    pub fn countries_for(&self, committee_id: i32) -> Vec<String> {
        self.committee_countries
            .iter()
            .filter(|cc| cc.committee_id == committee_id)
            .map(|cc| cc.country.clone())
            .sorted()
            .collect()
    }
}

pub async fn query_reference_snapshot<C>(db: &C) -> Result<ReferenceSnapshot, DbErr>
where
    C: ConnectionTrait,
{
    let committees = schema::committee::Entity::find().all(db).await?;
    let committee_countries = schema::committee_country::Entity::find().all(db).await?;
    Ok(ReferenceSnapshot {
        committees,
        committee_countries,
    })
}

/// Source of reference snapshots. Callers inject either a live database
/// connection or an already-fetched snapshot, so the same validation code
/// runs in a server context and against pre-fetched data.
#[async_trait]
pub trait ReferenceProvider: Send + Sync {
    async fn reference_snapshot(&self) -> Result<ReferenceSnapshot, DbErr>;
}

#[async_trait]
impl ReferenceProvider for DatabaseConnection {
    async fn reference_snapshot(&self) -> Result<ReferenceSnapshot, DbErr> {
        query_reference_snapshot(self).await
    }
}

#[async_trait]
impl ReferenceProvider for ReferenceSnapshot {
    async fn reference_snapshot(&self) -> Result<ReferenceSnapshot, DbErr> {
        Ok(self.clone())
    }
}

pub async fn query_user_by_email<C>(
    db: &C,
    email: &str,
) -> Result<Option<schema::user::Model>, DbErr>
where
    C: ConnectionTrait,
{
    schema::user::Entity::find()
        .filter(schema::user::Column::Email.eq(email))
        .one(db)
        .await
}

pub async fn query_application_for_user<C>(
    db: &C,
    user_id: Uuid,
) -> Result<Option<schema::application::Model>, DbErr>
where
    C: ConnectionTrait,
{
    schema::application::Entity::find()
        .filter(schema::application::Column::UserId.eq(user_id))
        .one(db)
        .await
}
