use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    model::appointment::{AppointmentStatus, CreateAppointmentDto, UpdateAppointmentDto},
    server::model::db::AppointmentModel,
};

/// Filters for listing appointments, unset fields match everything
#[derive(Clone, Debug, Default)]
pub struct AppointmentFilter {
    pub date: Option<NaiveDate>,
    pub status: Option<AppointmentStatus>,
    pub user_id: Option<i32>,
}

pub struct AppointmentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AppointmentRepository<'a, C> {
    /// Creates a new instance of [`AppointmentRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a new pending appointment for `user_id`
    pub async fn create(
        &self,
        appointment: CreateAppointmentDto,
        user_id: i32,
    ) -> Result<AppointmentModel, DbErr> {
        let now = Utc::now().naive_utc();

        let appointment = entity::appointment::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            appointment_type: ActiveValue::Set(appointment.appointment_type.to_string()),
            service: ActiveValue::Set(appointment.service),
            appointment_date: ActiveValue::Set(appointment.appointment_date),
            appointment_time: ActiveValue::Set(appointment.appointment_time),
            status: ActiveValue::Set(AppointmentStatus::Pending.to_string()),
            assigned_staff: ActiveValue::Set(None),
            notes: ActiveValue::Set(appointment.notes),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        appointment.insert(self.db).await
    }

    pub async fn get_by_id(
        &self,
        appointment_id: i32,
    ) -> Result<Option<AppointmentModel>, DbErr> {
        entity::prelude::Appointment::find_by_id(appointment_id)
            .one(self.db)
            .await
    }

    /// Gets appointments matching `filter` in schedule order
    pub async fn get_all(&self, filter: AppointmentFilter) -> Result<Vec<AppointmentModel>, DbErr> {
        let mut query = entity::prelude::Appointment::find();

        if let Some(date) = filter.date {
            query = query.filter(entity::appointment::Column::AppointmentDate.eq(date));
        }
        if let Some(status) = filter.status {
            query = query.filter(entity::appointment::Column::Status.eq(status.as_str()));
        }
        if let Some(user_id) = filter.user_id {
            query = query.filter(entity::appointment::Column::UserId.eq(user_id));
        }

        query
            .order_by_asc(entity::appointment::Column::AppointmentDate)
            .order_by_asc(entity::appointment::Column::AppointmentTime)
            .order_by_asc(entity::appointment::Column::Id)
            .all(self.db)
            .await
    }

    /// Times booked on `date` by appointments that still hold their slot
    ///
    /// `excluding` leaves out one appointment, used when rescheduling it.
    pub async fn booked_times(
        &self,
        date: NaiveDate,
        excluding: Option<i32>,
    ) -> Result<Vec<String>, DbErr> {
        let mut query = entity::prelude::Appointment::find()
            .select_only()
            .column(entity::appointment::Column::AppointmentTime)
            .filter(entity::appointment::Column::AppointmentDate.eq(date))
            .filter(
                entity::appointment::Column::Status.is_not_in(
                    AppointmentStatus::ALL
                        .iter()
                        .filter(|status| !status.holds_slot())
                        .map(|status| status.as_str()),
                ),
            );

        if let Some(appointment_id) = excluding {
            query = query.filter(entity::appointment::Column::Id.ne(appointment_id));
        }

        query.into_tuple::<String>().all(self.db).await
    }

    /// Applies the fields present in `patch` to an appointment
    ///
    /// Returns `Ok(None)` if the appointment does not exist.
    pub async fn update(
        &self,
        appointment_id: i32,
        patch: UpdateAppointmentDto,
    ) -> Result<Option<AppointmentModel>, DbErr> {
        self.modify(appointment_id, |appointment| {
            if let Some(appointment_type) = patch.appointment_type {
                appointment.appointment_type = ActiveValue::Set(appointment_type.to_string());
            }
            if let Some(service) = patch.service {
                appointment.service = ActiveValue::Set(service);
            }
            if let Some(date) = patch.appointment_date {
                appointment.appointment_date = ActiveValue::Set(date);
            }
            if let Some(time) = patch.appointment_time {
                appointment.appointment_time = ActiveValue::Set(time);
            }
            if let Some(staff_id) = patch.assigned_staff {
                appointment.assigned_staff = ActiveValue::Set(Some(staff_id));
            }
            if let Some(notes) = patch.notes {
                appointment.notes = ActiveValue::Set(Some(notes));
            }
        })
        .await
    }

    /// Sets the status of an appointment, assigning staff when provided
    pub async fn set_status(
        &self,
        appointment_id: i32,
        status: AppointmentStatus,
        assigned_staff: Option<i32>,
    ) -> Result<Option<AppointmentModel>, DbErr> {
        self.modify(appointment_id, |appointment| {
            appointment.status = ActiveValue::Set(status.to_string());

            if let Some(staff_id) = assigned_staff {
                appointment.assigned_staff = ActiveValue::Set(Some(staff_id));
            }
        })
        .await
    }

    pub async fn count_on_date(&self, date: NaiveDate) -> Result<u64, DbErr> {
        entity::prelude::Appointment::find()
            .filter(entity::appointment::Column::AppointmentDate.eq(date))
            .count(self.db)
            .await
    }

    pub async fn count_by_status(&self, status: AppointmentStatus) -> Result<u64, DbErr> {
        entity::prelude::Appointment::find()
            .filter(entity::appointment::Column::Status.eq(status.as_str()))
            .count(self.db)
            .await
    }

    async fn modify<F>(
        &self,
        appointment_id: i32,
        change: F,
    ) -> Result<Option<AppointmentModel>, DbErr>
    where
        F: FnOnce(&mut entity::appointment::ActiveModel),
    {
        let appointment = match entity::prelude::Appointment::find_by_id(appointment_id)
            .one(self.db)
            .await?
        {
            Some(appointment) => appointment,
            None => return Ok(None),
        };

        let mut appointment_am = appointment.into_active_model();
        change(&mut appointment_am);
        appointment_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        let appointment = appointment_am.update(self.db).await?;

        Ok(Some(appointment))
    }
}
