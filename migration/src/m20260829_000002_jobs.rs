use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260829_000001_users::Users;

static FK_JOB_USER_ID: &str = "fk_jobs_user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Jobs::Table)
                    .if_not_exists()
                    .col(pk_auto(Jobs::Id))
                    .col(integer(Jobs::UserId))
                    .col(string(Jobs::Title))
                    .col(text(Jobs::Description))
                    .col(decimal_len(Jobs::SalaryFrom, 10, 2))
                    .col(decimal_len(Jobs::SalaryTo, 10, 2))
                    .col(boolean(Jobs::IsActive).default(true))
                    .col(timestamp(Jobs::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_JOB_USER_ID)
                    .from_tbl(Jobs::Table)
                    .from_col(Jobs::UserId)
                    .to_tbl(Users::Table)
                    .to_col(Users::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_JOB_USER_ID)
                    .table(Jobs::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Jobs::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Jobs {
    Table,
    Id,
    UserId,
    Title,
    Description,
    SalaryFrom,
    SalaryTo,
    IsActive,
    CreatedAt,
}
