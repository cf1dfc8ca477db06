use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000001_users::Users;

static IDX_SECURITY_INCIDENTS_STATUS: &str = "idx_security_incidents_status";
static FK_SECURITY_INCIDENTS_REPORTED_BY: &str = "fk_security_incidents_reported_by";
static FK_SECURITY_INCIDENTS_ASSIGNED_TO: &str = "fk_security_incidents_assigned_to";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SecurityIncidents::Table)
                    .if_not_exists()
                    .col(pk_auto(SecurityIncidents::Id))
                    .col(string(SecurityIncidents::Title))
                    .col(text(SecurityIncidents::Description))
                    .col(string(SecurityIncidents::IncidentType))
                    .col(string(SecurityIncidents::Status))
                    .col(string(SecurityIncidents::Priority))
                    .col(string(SecurityIncidents::Location))
                    .col(timestamp(SecurityIncidents::IncidentDate))
                    .col(integer_null(SecurityIncidents::ReportedBy))
                    .col(integer_null(SecurityIncidents::AssignedTo))
                    .col(json(SecurityIncidents::EvidenceUrls))
                    .col(text_null(SecurityIncidents::ResolutionNotes))
                    .col(timestamp_null(SecurityIncidents::ResolvedAt))
                    .col(timestamp(SecurityIncidents::CreatedAt))
                    .col(timestamp(SecurityIncidents::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_SECURITY_INCIDENTS_STATUS)
                    .table(SecurityIncidents::Table)
                    .col(SecurityIncidents::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_SECURITY_INCIDENTS_REPORTED_BY)
                    .from_tbl(SecurityIncidents::Table)
                    .from_col(SecurityIncidents::ReportedBy)
                    .to_tbl(Users::Table)
                    .to_col(Users::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_SECURITY_INCIDENTS_ASSIGNED_TO)
                    .from_tbl(SecurityIncidents::Table)
                    .from_col(SecurityIncidents::AssignedTo)
                    .to_tbl(Users::Table)
                    .to_col(Users::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_SECURITY_INCIDENTS_ASSIGNED_TO)
                    .table(SecurityIncidents::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_SECURITY_INCIDENTS_REPORTED_BY)
                    .table(SecurityIncidents::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_SECURITY_INCIDENTS_STATUS)
                    .table(SecurityIncidents::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(SecurityIncidents::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum SecurityIncidents {
    Table,
    Id,
    Title,
    Description,
    IncidentType,
    Status,
    Priority,
    Location,
    IncidentDate,
    ReportedBy,
    AssignedTo,
    EvidenceUrls,
    ResolutionNotes,
    ResolvedAt,
    CreatedAt,
    UpdatedAt,
}
