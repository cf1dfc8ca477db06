use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000001_users::Users;

static IDX_APPOINTMENTS_DATE: &str = "idx_appointments_date";
static FK_APPOINTMENTS_USER_ID: &str = "fk_appointments_user_id";
static FK_APPOINTMENTS_ASSIGNED_STAFF: &str = "fk_appointments_assigned_staff";
static UQ_APPOINTMENTS_BOOKED_SLOT: &str = "uq_appointments_booked_slot";

/// Allows at most one appointment per date and time unless it was cancelled.
///
/// Written as raw SQL since the partial index condition is shared by PostgreSQL and SQLite.
pub const APPOINTMENT_SLOT_INDEX_SQL: &str = "CREATE UNIQUE INDEX IF NOT EXISTS \
    uq_appointments_booked_slot ON appointments (appointment_date, appointment_time) \
    WHERE status <> 'cancelled'";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Appointments::Table)
                    .if_not_exists()
                    .col(pk_auto(Appointments::Id))
                    .col(integer(Appointments::UserId))
                    .col(string(Appointments::AppointmentType))
                    .col(string(Appointments::Service))
                    .col(date(Appointments::AppointmentDate))
                    .col(string(Appointments::AppointmentTime))
                    .col(string(Appointments::Status))
                    .col(integer_null(Appointments::AssignedStaff))
                    .col(text_null(Appointments::Notes))
                    .col(timestamp(Appointments::CreatedAt))
                    .col(timestamp(Appointments::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_APPOINTMENTS_DATE)
                    .table(Appointments::Table)
                    .col(Appointments::AppointmentDate)
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(APPOINTMENT_SLOT_INDEX_SQL)
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_APPOINTMENTS_USER_ID)
                    .from_tbl(Appointments::Table)
                    .from_col(Appointments::UserId)
                    .to_tbl(Users::Table)
                    .to_col(Users::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_APPOINTMENTS_ASSIGNED_STAFF)
                    .from_tbl(Appointments::Table)
                    .from_col(Appointments::AssignedStaff)
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
                    .name(FK_APPOINTMENTS_ASSIGNED_STAFF)
                    .table(Appointments::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_APPOINTMENTS_USER_ID)
                    .table(Appointments::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(UQ_APPOINTMENTS_BOOKED_SLOT)
                    .table(Appointments::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_APPOINTMENTS_DATE)
                    .table(Appointments::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Appointments::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Appointments {
    Table,
    Id,
    UserId,
    AppointmentType,
    Service,
    AppointmentDate,
    AppointmentTime,
    Status,
    AssignedStaff,
    Notes,
    CreatedAt,
    UpdatedAt,
}
