use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum User {
    Table,
    Uuid,
    Email,
    PasswordHash,
    Phone,
    Birthdate,
    Nationality,
    DietaryPreference,
    CreatedAt,
}

#[derive(Iden)]
enum UserAccessKey {
    Table,
    KeyHash,
    UserId,
}

#[derive(Iden)]
enum Committee {
    Table,
    Id,
    Name,
    Difficulty,
}

#[derive(Iden)]
enum CommitteeCountry {
    Table,
    Id,
    CommitteeId,
    Country,
}

#[derive(Iden)]
enum Delegation {
    Table,
    Id,
    Name,
    Country,
    EstimatedDelegates,
}

#[derive(Iden)]
enum StaffMember {
    Table,
    Id,
    Name,
    Position,
    Team,
    Email,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(User::Uuid)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(User::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(User::PasswordHash)
                            .string_len(120)
                            .not_null(),
                    )
                    .col(ColumnDef::new(User::Phone).string())
                    .col(ColumnDef::new(User::Birthdate).date().not_null())
                    .col(
                        ColumnDef::new(User::Nationality)
                            .string_len(2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(User::DietaryPreference).string())
                    .col(ColumnDef::new(User::CreatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserAccessKey::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserAccessKey::KeyHash)
                            .string_len(120)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserAccessKey::UserId).uuid().not_null())
                    .foreign_key(
                        ForeignKeyCreateStatement::new()
                            .name("fk-user_access_key-user")
                            .from_tbl(UserAccessKey::Table)
                            .from_col(UserAccessKey::UserId)
                            .to_tbl(User::Table)
                            .to_col(User::Uuid),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Committee::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Committee::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Committee::Name).string().not_null())
                    .col(
                        ColumnDef::new(Committee::Difficulty)
                            .string_len(16)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CommitteeCountry::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CommitteeCountry::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CommitteeCountry::CommitteeId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CommitteeCountry::Country)
                            .string_len(2)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKeyCreateStatement::new()
                            .name("fk-committee_country-committee")
                            .from_tbl(CommitteeCountry::Table)
                            .from_col(CommitteeCountry::CommitteeId)
                            .to_tbl(Committee::Table)
                            .to_col(Committee::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-committee_country-unique-pair")
                    .table(CommitteeCountry::Table)
                    .col(CommitteeCountry::CommitteeId)
                    .col(CommitteeCountry::Country)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Delegation::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Delegation::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Delegation::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Delegation::Country)
                            .string_len(2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Delegation::EstimatedDelegates)
                            .integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StaffMember::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StaffMember::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StaffMember::Name).string().not_null())
                    .col(ColumnDef::new(StaffMember::Position).string().not_null())
                    .col(ColumnDef::new(StaffMember::Team).string().not_null())
                    .col(ColumnDef::new(StaffMember::Email).string())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StaffMember::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Delegation::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CommitteeCountry::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Committee::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserAccessKey::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;
        Ok(())
    }
}
