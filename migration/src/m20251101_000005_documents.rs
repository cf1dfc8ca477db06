use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000001_users::Users;

static FK_DOCUMENTS_USER_ID: &str = "fk_documents_user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Documents::Table)
                    .if_not_exists()
                    .col(pk_auto(Documents::Id))
                    .col(integer(Documents::UserId))
                    .col(string(Documents::DocumentType))
                    .col(text(Documents::Purpose))
                    .col(string(Documents::Status))
                    .col(text_null(Documents::Remarks))
                    .col(timestamp(Documents::CreatedAt))
                    .col(timestamp(Documents::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_DOCUMENTS_USER_ID)
                    .from_tbl(Documents::Table)
                    .from_col(Documents::UserId)
                    .to_tbl(Users::Table)
                    .to_col(Users::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_DOCUMENTS_USER_ID)
                    .table(Documents::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Documents::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Documents {
    Table,
    Id,
    UserId,
    DocumentType,
    Purpose,
    Status,
    Remarks,
    CreatedAt,
    UpdatedAt,
}
