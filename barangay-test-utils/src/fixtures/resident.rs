use chrono::Utc;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, model::ResidentModel, TestContext};

impl TestContext {
    pub fn resident(&self) -> ResidentFixtures<'_> {
        ResidentFixtures { setup: self }
    }
}

pub struct ResidentFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> ResidentFixtures<'a> {
    pub async fn insert_resident(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<ResidentModel, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::Resident::insert(entity::resident::ActiveModel {
                first_name: ActiveValue::Set(first_name.to_string()),
                middle_name: ActiveValue::Set(None),
                last_name: ActiveValue::Set(last_name.to_string()),
                suffix: ActiveValue::Set(None),
                email: ActiveValue::Set(None),
                phone: ActiveValue::Set(None),
                address: ActiveValue::Set("Purok 1, Barangay San Isidro".to_string()),
                purok: ActiveValue::Set(Some("Purok 1".to_string())),
                birth_date: ActiveValue::Set(None),
                gender: ActiveValue::Set("female".to_string()),
                civil_status: ActiveValue::Set("single".to_string()),
                occupation: ActiveValue::Set(None),
                emergency_contact_name: ActiveValue::Set(None),
                emergency_contact_phone: ActiveValue::Set(None),
                household_id: ActiveValue::Set(None),
                philsys_number: ActiveValue::Set(None),
                voter_id: ActiveValue::Set(None),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
