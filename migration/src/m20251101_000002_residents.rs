use sea_orm_migration::{prelude::*, schema::*};

static IDX_RESIDENTS_LAST_NAME: &str = "idx_residents_last_name";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Residents::Table)
                    .if_not_exists()
                    .col(pk_auto(Residents::Id))
                    .col(string(Residents::FirstName))
                    .col(string_null(Residents::MiddleName))
                    .col(string(Residents::LastName))
                    .col(string_null(Residents::Suffix))
                    .col(string_null(Residents::Email))
                    .col(string_null(Residents::Phone))
                    .col(string(Residents::Address))
                    .col(string_null(Residents::Purok))
                    .col(date_null(Residents::BirthDate))
                    .col(string(Residents::Gender))
                    .col(string(Residents::CivilStatus))
                    .col(string_null(Residents::Occupation))
                    .col(string_null(Residents::EmergencyContactName))
                    .col(string_null(Residents::EmergencyContactPhone))
                    .col(integer_null(Residents::HouseholdId))
                    .col(string_null(Residents::PhilsysNumber))
                    .col(string_null(Residents::VoterId))
                    .col(timestamp(Residents::CreatedAt))
                    .col(timestamp(Residents::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_RESIDENTS_LAST_NAME)
                    .table(Residents::Table)
                    .col(Residents::LastName)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_RESIDENTS_LAST_NAME)
                    .table(Residents::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Residents::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Residents {
    Table,
    Id,
    FirstName,
    MiddleName,
    LastName,
    Suffix,
    Email,
    Phone,
    Address,
    Purok,
    BirthDate,
    Gender,
    CivilStatus,
    Occupation,
    EmergencyContactName,
    EmergencyContactPhone,
    HouseholdId,
    PhilsysNumber,
    VoterId,
    CreatedAt,
    UpdatedAt,
}
