use faker_rand::en_us::names::FullName;
use rand::Rng;
use sea_orm::{prelude::*, ActiveValue, ConnectionTrait};

use crate::schema;

#[derive(Debug)]
pub struct MockOption {
    /// Replace the fixed staff names with generated ones.
    pub use_random_names: bool,
}

impl Default for MockOption {
    fn default() -> Self {
        Self {
            use_random_names: false,
        }
    }
}

/// Committee ids are fixed (1..=3) so tests can reference them directly.
pub async fn seed_mock_conference<C>(db: &C) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    seed_mock_conference_with_options(db, Default::default()).await
}

pub async fn seed_mock_conference_with_options<C>(
    db: &C,
    options: MockOption,
) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    let committees = vec![
        (1, "Security Council", "Advanced"),
        (2, "World Health Organization", "Beginner"),
        (3, "Human Rights Council", "Intermediate"),
    ];

    schema::committee::Entity::insert_many(committees.into_iter().map(
        |(id, name, difficulty)| schema::committee::ActiveModel {
            id: ActiveValue::Set(id),
            name: ActiveValue::Set(name.into()),
            difficulty: ActiveValue::Set(difficulty.into()),
        },
    ))
    .exec(db)
    .await?;

    let countries: Vec<(i32, &str)> = vec![
        (1, "CN"),
        (1, "FR"),
        (1, "GB"),
        (1, "RU"),
        (1, "US"),
        (2, "BR"),
        (2, "DE"),
        (2, "FR"),
        (2, "IN"),
        (2, "US"),
        (3, "AR"),
        (3, "DE"),
        (3, "JP"),
        (3, "ZA"),
    ];

    schema::committee_country::Entity::insert_many(countries.into_iter().enumerate().map(
        |(idx, (committee_id, country))| schema::committee_country::ActiveModel {
            id: ActiveValue::Set(idx as i32 + 1),
            committee_id: ActiveValue::Set(committee_id),
            country: ActiveValue::Set(country.into()),
        },
    ))
    .exec(db)
    .await?;

    schema::delegation::Entity::insert_many(vec![
        schema::delegation::ActiveModel {
            id: ActiveValue::Set(1),
            name: ActiveValue::Set("Rotterdam International Model UN".into()),
            country: ActiveValue::Set("NL".into()),
            estimated_delegates: ActiveValue::Set(12),
        },
        schema::delegation::ActiveModel {
            id: ActiveValue::Set(2),
            name: ActiveValue::Set("Geneva Academy Delegation".into()),
            country: ActiveValue::Set("CH".into()),
            estimated_delegates: ActiveValue::Set(8),
        },
    ])
    .exec(db)
    .await?;

    let staff = vec![
        ("Mara Jensen", "Secretary-General", "Secretariat"),
        ("Tomás Ribeiro", "Deputy Secretary-General", "Secretariat"),
        ("Lena Fischer", "Head of Logistics", "Organization"),
        ("Noah Okafor", "Head of Outreach", "Organization"),
        ("Sofia Marchetti", "Head of Media", "Media"),
    ];

    let mut rng = rand::thread_rng();
    schema::staff_member::Entity::insert_many(staff.into_iter().enumerate().map(
        |(idx, (name, position, team))| {
            let name = if options.use_random_names {
                rng.gen::<FullName>().to_string()
            } else {
                name.to_string()
            };
            schema::staff_member::ActiveModel {
                id: ActiveValue::Set(idx as i32 + 1),
                name: ActiveValue::Set(name),
                position: ActiveValue::Set(position.into()),
                team: ActiveValue::Set(team.into()),
                email: ActiveValue::Set(None),
            }
        },
    ))
    .exec(db)
    .await?;

    Ok(())
}
