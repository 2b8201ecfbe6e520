use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum User {
    Table,
    Uuid,
}

#[derive(Iden)]
enum Committee {
    Table,
    Id,
}

#[derive(Iden)]
enum Delegation {
    Table,
    Id,
}

#[derive(Iden)]
enum Application {
    Table,
    Id,
    UserId,
    Role,
    Motivation,
    Experience,
    DelegationId,
    ShirtSize,
    Choice1Committee,
    Choice1Country,
    Choice2Committee,
    Choice2Country,
    Choice3Committee,
    Choice3Country,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Application::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Application::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Application::UserId)
                            .uuid()
                            .not_null()
                            // One application per user.
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Application::Role)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Application::Motivation).text().not_null())
                    .col(ColumnDef::new(Application::Experience).text().not_null())
                    .col(ColumnDef::new(Application::DelegationId).integer())
                    .col(ColumnDef::new(Application::ShirtSize).string_len(4))
                    .col(
                        ColumnDef::new(Application::Choice1Committee)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Application::Choice1Country).string_len(2))
                    .col(
                        ColumnDef::new(Application::Choice2Committee)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Application::Choice2Country).string_len(2))
                    .col(
                        ColumnDef::new(Application::Choice3Committee)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Application::Choice3Country).string_len(2))
                    .col(
                        ColumnDef::new(Application::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKeyCreateStatement::new()
                            .name("fk-application-user")
                            .from_tbl(Application::Table)
                            .from_col(Application::UserId)
                            .to_tbl(User::Table)
                            .to_col(User::Uuid),
                    )
                    .foreign_key(
                        ForeignKeyCreateStatement::new()
                            .name("fk-application-delegation")
                            .from_tbl(Application::Table)
                            .from_col(Application::DelegationId)
                            .to_tbl(Delegation::Table)
                            .to_col(Delegation::Id),
                    )
                    .foreign_key(
                        ForeignKeyCreateStatement::new()
                            .name("fk-application-choice1")
                            .from_tbl(Application::Table)
                            .from_col(Application::Choice1Committee)
                            .to_tbl(Committee::Table)
                            .to_col(Committee::Id),
                    )
                    .foreign_key(
                        ForeignKeyCreateStatement::new()
                            .name("fk-application-choice2")
                            .from_tbl(Application::Table)
                            .from_col(Application::Choice2Committee)
                            .to_tbl(Committee::Table)
                            .to_col(Committee::Id),
                    )
                    .foreign_key(
                        ForeignKeyCreateStatement::new()
                            .name("fk-application-choice3")
                            .from_tbl(Application::Table)
                            .from_col(Application::Choice3Committee)
                            .to_tbl(Committee::Table)
                            .to_col(Committee::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Application::Table).to_owned())
            .await
    }
}
