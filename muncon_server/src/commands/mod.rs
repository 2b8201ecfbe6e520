use std::path::Path;
use std::str::FromStr;

use csv::ReaderBuilder;
use muncon_entities::{domain::committee::Difficulty, schema};
use sea_orm::{ActiveModelTrait, ActiveValue, EntityTrait};

use crate::state::AppState;

#[derive(clap::Subcommand)]
pub enum Command {
    /// Load committees and their country lists from <path>/committees.csv.
    /// Rows: name, difficulty, semicolon-separated alpha-2 country codes.
    SeedReference { path: String },
    /// Load the staff directory from <path>/staff.csv.
    /// Rows: name, position, team, optional email.
    SeedStaff { path: String },
}

impl Command {
    pub async fn run(&self, app_state: AppState) -> anyhow::Result<()> {
        match self {
            Command::SeedReference { path } => {
                let csv_path = Path::new(path).join("committees.csv");
                let mut reader = ReaderBuilder::new().from_path(&csv_path)?;

                for record in reader.records() {
                    let record = record?;
                    let (name, difficulty, countries) =
                        match (record.get(0), record.get(1), record.get(2)) {
                            (Some(name), Some(difficulty), Some(countries)) => {
                                (name.trim(), difficulty.trim(), countries)
                            }
                            _ => anyhow::bail!(
                                "committees.csv rows need a name, a difficulty and a country list"
                            ),
                        };

                    let difficulty = Difficulty::from_str(difficulty).map_err(|e| {
                        anyhow::anyhow!("committee \"{}\": {}", name, e)
                    })?;

                    let committee = schema::committee::ActiveModel {
                        name: ActiveValue::Set(name.to_string()),
                        difficulty: ActiveValue::Set(difficulty.as_str().to_string()),
                        ..Default::default()
                    }
                    .insert(&app_state.db)
                    .await?;

                    let mut rows = Vec::new();
                    for country in countries.split(';') {
                        let country = country.trim().to_uppercase();
                        if country.is_empty() {
                            continue;
                        }
                        isocountry::CountryCode::for_alpha2(&country).map_err(|_| {
                            anyhow::anyhow!(
                                "committee \"{}\": \"{}\" is not an alpha-2 country code",
                                name,
                                country
                            )
                        })?;
                        rows.push(schema::committee_country::ActiveModel {
                            committee_id: ActiveValue::Set(committee.id),
                            country: ActiveValue::Set(country),
                            ..Default::default()
                        });
                    }
                    if !rows.is_empty() {
                        schema::committee_country::Entity::insert_many(rows)
                            .exec(&app_state.db)
                            .await?;
                    }

                    tracing::info!("Seeded committee {}", name);
                }

                Ok(())
            }
            Command::SeedStaff { path } => {
                let csv_path = Path::new(path).join("staff.csv");
                let mut reader = ReaderBuilder::new().from_path(&csv_path)?;

                let mut rows = Vec::new();
                for record in reader.records() {
                    let record = record?;
                    let (name, position, team) =
                        match (record.get(0), record.get(1), record.get(2)) {
                            (Some(name), Some(position), Some(team)) => {
                                (name.trim(), position.trim(), team.trim())
                            }
                            _ => anyhow::bail!("staff.csv rows need a name, a position and a team"),
                        };
                    let email = record
                        .get(3)
                        .map(|e| e.trim())
                        .filter(|e| !e.is_empty())
                        .map(|e| e.to_string());

                    rows.push(schema::staff_member::ActiveModel {
                        name: ActiveValue::Set(name.to_string()),
                        position: ActiveValue::Set(position.to_string()),
                        team: ActiveValue::Set(team.to_string()),
                        email: ActiveValue::Set(email),
                        ..Default::default()
                    });
                }

                if !rows.is_empty() {
                    schema::staff_member::Entity::insert_many(rows)
                        .exec(&app_state.db)
                        .await?;
                }

                Ok(())
            }
        }
    }
}
