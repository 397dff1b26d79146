use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20260829_000001_users::Users, m20260829_000002_jobs::Jobs};

static FK_RESPONSE_USER_ID: &str = "fk_responses_user_id";
static FK_RESPONSE_JOB_ID: &str = "fk_responses_job_id";
static UQ_RESPONSE_USER_JOB: &str = "uq_responses_user_id_job_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Responses::Table)
                    .if_not_exists()
                    .col(pk_auto(Responses::Id))
                    .col(integer(Responses::UserId))
                    .col(integer(Responses::JobId))
                    .col(text_null(Responses::Message))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_RESPONSE_USER_ID)
                    .from_tbl(Responses::Table)
                    .from_col(Responses::UserId)
                    .to_tbl(Users::Table)
                    .to_col(Users::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_RESPONSE_JOB_ID)
                    .from_tbl(Responses::Table)
                    .from_col(Responses::JobId)
                    .to_tbl(Jobs::Table)
                    .to_col(Jobs::Id)
                    .to_owned(),
            )
            .await?;

        // One response per user per job.
        manager
            .create_index(
                Index::create()
                    .name(UQ_RESPONSE_USER_JOB)
                    .table(Responses::Table)
                    .col(Responses::UserId)
                    .col(Responses::JobId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(UQ_RESPONSE_USER_JOB)
                    .table(Responses::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_RESPONSE_JOB_ID)
                    .table(Responses::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_RESPONSE_USER_ID)
                    .table(Responses::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Responses::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Responses {
    Table,
    Id,
    UserId,
    JobId,
    Message,
}
