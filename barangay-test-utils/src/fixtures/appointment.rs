use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, model::AppointmentModel, TestContext};

impl TestContext {
    pub fn appointment(&self) -> AppointmentFixtures<'_> {
        AppointmentFixtures { setup: self }
    }
}

pub struct AppointmentFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> AppointmentFixtures<'a> {
    /// Insert a checkup for `user_id` at the given date, time and status.
    ///
    /// The users table must exist and contain `user_id`.
    pub async fn insert_appointment(
        &self,
        user_id: i32,
        date: NaiveDate,
        time: &str,
        status: &str,
    ) -> Result<AppointmentModel, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::Appointment::insert(entity::appointment::ActiveModel {
                user_id: ActiveValue::Set(user_id),
                appointment_type: ActiveValue::Set("checkup".to_string()),
                service: ActiveValue::Set("General checkup".to_string()),
                appointment_date: ActiveValue::Set(date),
                appointment_time: ActiveValue::Set(time.to_string()),
                status: ActiveValue::Set(status.to_string()),
                assigned_staff: ActiveValue::Set(None),
                notes: ActiveValue::Set(None),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
