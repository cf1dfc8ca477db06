use std::collections::HashMap;

use chrono::NaiveDate;
use dioxus_logger::tracing;
use sea_orm::{DatabaseConnection, DbErr, SqlErr};

use crate::{
    model::{
        appointment::{
            available_slots, is_valid_slot, AppointmentDto, AppointmentStatus,
            AvailableSlotsDto, ConfirmAppointmentDto, CreateAppointmentDto, UpdateAppointmentDto,
        },
        realtime::{ChangeEvent, ChangeTable},
    },
    server::{
        data::{
            appointment::{AppointmentFilter, AppointmentRepository},
            user::UserRepository,
        },
        error::{workflow::WorkflowError, Error},
        model::db::AppointmentModel,
        realtime::ChangeFeed,
        service::{
            check_transition, notification::notify, retry::RetryContext, user::display_names,
        },
    },
};

/// Service for health center appointments and their daily slots.
pub struct AppointmentService<'a> {
    db: &'a DatabaseConnection,
    feed: &'a ChangeFeed,
}

impl<'a> AppointmentService<'a> {
    /// Creates a new instance of [`AppointmentService`]
    pub fn new(db: &'a DatabaseConnection, feed: &'a ChangeFeed) -> Self {
        Self { db, feed }
    }

    /// Lists appointments matching `filter` in schedule order.
    pub async fn get_appointments(
        &self,
        filter: AppointmentFilter,
    ) -> Result<Vec<AppointmentDto>, Error> {
        let ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry("get appointments", || {
            let db = db.clone();
            let filter = filter.clone();

            Box::pin(async move {
                let appointments = AppointmentRepository::new(&db).get_all(filter).await?;
                let names = display_names(&db, appointments.iter().flat_map(user_ids)).await?;

                appointments
                    .into_iter()
                    .map(|appointment| appointment_dto(appointment, &names))
                    .collect()
            })
        })
        .await
    }

    /// Retrieves one appointment.
    ///
    /// # Returns
    /// - `Ok(AppointmentDto)` - Appointment found
    /// - `Err(WorkflowError::NotFound)` - No appointment with that ID
    pub async fn get_appointment(&self, appointment_id: i32) -> Result<AppointmentDto, Error> {
        let ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry(&format!("get appointment ID {}", appointment_id), || {
            let db = db.clone();

            Box::pin(async move {
                let appointment = AppointmentRepository::new(&db)
                    .get_by_id(appointment_id)
                    .await?
                    .ok_or_else(|| not_found(appointment_id))?;
                let names = display_names(&db, user_ids(&appointment)).await?;

                appointment_dto(appointment, &names)
            })
        })
        .await
    }

    /// The daily slots of `date` not held by any appointment.
    pub async fn get_available_slots(&self, date: NaiveDate) -> Result<AvailableSlotsDto, Error> {
        let ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry(&format!("get available slots on {}", date), || {
            let db = db.clone();

            Box::pin(async move {
                let booked = AppointmentRepository::new(&db)
                    .booked_times(date, None)
                    .await?;

                Ok(AvailableSlotsDto {
                    date,
                    slots: available_slots(booked.iter().map(String::as_str)),
                })
            })
        })
        .await
    }

    /// Books a pending appointment for `user_id` on a free slot.
    ///
    /// # Returns
    /// - `Ok(AppointmentDto)` - The booked appointment
    /// - `Err(WorkflowError::InvalidSlot)` - The time is not one of the daily slots
    /// - `Err(WorkflowError::SlotUnavailable)` - The slot is already booked, including by a
    ///   concurrent booking caught by the booked-slot unique index
    pub async fn create_appointment(
        &self,
        appointment: CreateAppointmentDto,
        user_id: i32,
    ) -> Result<AppointmentDto, Error> {
        appointment.validate()?;
        self.ensure_slot_free(
            appointment.appointment_date,
            &appointment.appointment_time,
            None,
        )
        .await?;

        let date = appointment.appointment_date;
        let time = appointment.appointment_time.clone();
        let model = AppointmentRepository::new(self.db)
            .create(appointment, user_id)
            .await
            .map_err(|err| slot_conflict(err, date, &time))?;
        let appointment = self.to_dto(model).await?;

        self.feed.publish(ChangeEvent::insert(
            ChangeTable::Appointments,
            appointment.id,
            &appointment,
        )?);
        tracing::info!(
            appointment_id = appointment.id,
            date = %appointment.appointment_date,
            time = %appointment.appointment_time,
            "Booked appointment"
        );

        Ok(appointment)
    }

    /// Applies a patch to an appointment.
    ///
    /// Moving the appointment to another date or time checks the target slot, ignoring the
    /// slot the appointment itself holds.
    pub async fn update_appointment(
        &self,
        appointment_id: i32,
        patch: UpdateAppointmentDto,
    ) -> Result<AppointmentDto, Error> {
        patch.validate()?;

        if let Some(staff_id) = patch.assigned_staff {
            self.ensure_staff_exists(staff_id).await?;
        }

        let appointment_repo = AppointmentRepository::new(self.db);
        let mut target_slot = None;

        if patch.reschedules() {
            let current = appointment_repo
                .get_by_id(appointment_id)
                .await?
                .ok_or_else(|| not_found(appointment_id))?;

            let date = patch.appointment_date.unwrap_or(current.appointment_date);
            let time = patch
                .appointment_time
                .as_deref()
                .unwrap_or(&current.appointment_time);

            self.ensure_slot_free(date, time, Some(appointment_id))
                .await?;
            target_slot = Some((date, time.to_string()));
        }

        let model = appointment_repo
            .update(appointment_id, patch)
            .await
            .map_err(|err| match &target_slot {
                Some((date, time)) => slot_conflict(err, *date, time),
                None => err.into(),
            })?
            .ok_or_else(|| not_found(appointment_id))?;
        let appointment = self.to_dto(model).await?;

        self.feed.publish(ChangeEvent::update(
            ChangeTable::Appointments,
            appointment.id,
            &appointment,
        )?);
        tracing::info!(appointment_id = appointment.id, "Updated appointment");

        Ok(appointment)
    }

    /// Confirms a pending appointment, assigning staff when provided.
    pub async fn confirm(
        &self,
        appointment_id: i32,
        confirmation: ConfirmAppointmentDto,
    ) -> Result<AppointmentDto, Error> {
        if let Some(staff_id) = confirmation.assigned_staff {
            self.ensure_staff_exists(staff_id).await?;
        }

        self.set_status(
            appointment_id,
            AppointmentStatus::Confirmed,
            confirmation.assigned_staff,
        )
        .await
    }

    /// Cancels an appointment, releasing its slot.
    pub async fn cancel(&self, appointment_id: i32) -> Result<AppointmentDto, Error> {
        self.set_status(appointment_id, AppointmentStatus::Cancelled, None)
            .await
    }

    pub async fn complete(&self, appointment_id: i32) -> Result<AppointmentDto, Error> {
        self.set_status(appointment_id, AppointmentStatus::Completed, None)
            .await
    }

    pub async fn mark_no_show(&self, appointment_id: i32) -> Result<AppointmentDto, Error> {
        self.set_status(appointment_id, AppointmentStatus::NoShow, None)
            .await
    }

    /// Moves an appointment to `status` and notifies the user it is for.
    ///
    /// Setting the current status again succeeds without writing. A failure to insert the
    /// notification is logged and does not undo the status change.
    async fn set_status(
        &self,
        appointment_id: i32,
        status: AppointmentStatus,
        assigned_staff: Option<i32>,
    ) -> Result<AppointmentDto, Error> {
        let appointment_repo = AppointmentRepository::new(self.db);
        let current = appointment_repo
            .get_by_id(appointment_id)
            .await?
            .ok_or_else(|| not_found(appointment_id))?;

        let from: AppointmentStatus = current.status.parse()?;
        if !check_transition("appointment", from, status)? {
            return self.to_dto(current).await;
        }

        let model = appointment_repo
            .set_status(appointment_id, status, assigned_staff)
            .await?
            .ok_or_else(|| not_found(appointment_id))?;
        let appointment = self.to_dto(model).await?;

        self.feed.publish(ChangeEvent::update(
            ChangeTable::Appointments,
            appointment.id,
            &appointment,
        )?);
        tracing::info!(
            appointment_id = appointment.id,
            status = %appointment.status,
            "Appointment status changed"
        );

        let (title, message) = status_notification(&appointment);
        if let Err(err) = notify(self.db, self.feed, appointment.user_id, title, message).await {
            tracing::warn!(
                appointment_id = appointment.id,
                "Failed to notify user of appointment status change: {}",
                err
            );
        }

        Ok(appointment)
    }

    async fn ensure_slot_free(
        &self,
        date: NaiveDate,
        time: &str,
        excluding: Option<i32>,
    ) -> Result<(), Error> {
        if !is_valid_slot(time) {
            return Err(WorkflowError::InvalidSlot(time.to_string()).into());
        }

        let booked = AppointmentRepository::new(self.db)
            .booked_times(date, excluding)
            .await?;

        if booked.iter().any(|booked| booked == time) {
            return Err(WorkflowError::SlotUnavailable {
                date,
                time: time.to_string(),
            }
            .into());
        }

        Ok(())
    }

    async fn ensure_staff_exists(&self, staff_id: i32) -> Result<(), Error> {
        if UserRepository::new(self.db)
            .get_by_id(staff_id)
            .await?
            .is_none()
        {
            return Err(WorkflowError::NotFound {
                entity: "user",
                id: staff_id,
            }
            .into());
        }

        Ok(())
    }

    async fn to_dto(&self, appointment: AppointmentModel) -> Result<AppointmentDto, Error> {
        let names = display_names(self.db, user_ids(&appointment)).await?;

        appointment_dto(appointment, &names)
    }
}

fn status_notification(appointment: &AppointmentDto) -> (String, String) {
    let outcome = match appointment.status {
        AppointmentStatus::Pending => "is pending",
        AppointmentStatus::Confirmed => "was confirmed",
        AppointmentStatus::Completed => "was completed",
        AppointmentStatus::Cancelled => "was cancelled",
        AppointmentStatus::NoShow => "was marked as missed",
    };

    (
        format!("Appointment {}", appointment.status.as_str().replace('_', " ")),
        format!(
            "Your {} appointment on {} at {} {}",
            appointment.service,
            appointment.appointment_date,
            appointment.appointment_time,
            outcome
        ),
    )
}

/// Maps a write rejected by the booked-slot unique index to a slot conflict.
fn slot_conflict(err: DbErr, date: NaiveDate, time: &str) -> Error {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => WorkflowError::SlotUnavailable {
            date,
            time: time.to_string(),
        }
        .into(),
        _ => err.into(),
    }
}

fn not_found(appointment_id: i32) -> Error {
    WorkflowError::NotFound {
        entity: "appointment",
        id: appointment_id,
    }
    .into()
}

fn user_ids(appointment: &AppointmentModel) -> impl Iterator<Item = i32> {
    [Some(appointment.user_id), appointment.assigned_staff]
        .into_iter()
        .flatten()
}

fn appointment_dto(
    appointment: AppointmentModel,
    names: &HashMap<i32, String>,
) -> Result<AppointmentDto, Error> {
    Ok(AppointmentDto {
        id: appointment.id,
        user_id: appointment.user_id,
        user_name: names.get(&appointment.user_id).cloned(),
        appointment_type: appointment.appointment_type.parse()?,
        service: appointment.service,
        appointment_date: appointment.appointment_date,
        appointment_time: appointment.appointment_time,
        status: appointment.status.parse()?,
        staff_name: appointment
            .assigned_staff
            .and_then(|id| names.get(&id).cloned()),
        assigned_staff: appointment.assigned_staff,
        notes: appointment.notes,
        created_at: appointment.created_at,
        updated_at: appointment.updated_at,
    })
}
