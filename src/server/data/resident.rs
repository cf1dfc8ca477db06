use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryOrder,
};

use crate::{
    model::resident::{CivilStatus, CreateResidentDto, Gender, UpdateResidentDto},
    server::model::db::ResidentModel,
};

pub struct ResidentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ResidentRepository<'a, C> {
    /// Creates a new instance of [`ResidentRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a new resident
    ///
    /// `gender` and `civil_status` are passed separately as they are optional in the
    /// request body but required by the table.
    pub async fn create(
        &self,
        resident: CreateResidentDto,
        gender: Gender,
        civil_status: CivilStatus,
    ) -> Result<ResidentModel, DbErr> {
        let now = Utc::now().naive_utc();

        let resident = entity::resident::ActiveModel {
            first_name: ActiveValue::Set(resident.first_name),
            middle_name: ActiveValue::Set(resident.middle_name),
            last_name: ActiveValue::Set(resident.last_name),
            suffix: ActiveValue::Set(resident.suffix),
            email: ActiveValue::Set(resident.email),
            phone: ActiveValue::Set(resident.phone),
            address: ActiveValue::Set(resident.address),
            purok: ActiveValue::Set(resident.purok),
            birth_date: ActiveValue::Set(resident.birth_date),
            gender: ActiveValue::Set(gender.to_string()),
            civil_status: ActiveValue::Set(civil_status.to_string()),
            occupation: ActiveValue::Set(resident.occupation),
            emergency_contact_name: ActiveValue::Set(resident.emergency_contact_name),
            emergency_contact_phone: ActiveValue::Set(resident.emergency_contact_phone),
            household_id: ActiveValue::Set(resident.household_id),
            philsys_number: ActiveValue::Set(resident.philsys_number),
            voter_id: ActiveValue::Set(resident.voter_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        resident.insert(self.db).await
    }

    pub async fn get_by_id(&self, resident_id: i32) -> Result<Option<ResidentModel>, DbErr> {
        entity::prelude::Resident::find_by_id(resident_id)
            .one(self.db)
            .await
    }

    /// Gets all residents ordered by last name then first name
    pub async fn get_all(&self) -> Result<Vec<ResidentModel>, DbErr> {
        entity::prelude::Resident::find()
            .order_by_asc(entity::resident::Column::LastName)
            .order_by_asc(entity::resident::Column::FirstName)
            .order_by_asc(entity::resident::Column::Id)
            .all(self.db)
            .await
    }

    /// Applies the fields present in `patch` to a resident
    ///
    /// Returns `Ok(None)` if the resident does not exist.
    pub async fn update(
        &self,
        resident_id: i32,
        patch: UpdateResidentDto,
    ) -> Result<Option<ResidentModel>, DbErr> {
        let resident = match entity::prelude::Resident::find_by_id(resident_id)
            .one(self.db)
            .await?
        {
            Some(resident) => resident,
            None => return Ok(None),
        };

        let mut resident_am = resident.into_active_model();

        if let Some(first_name) = patch.first_name {
            resident_am.first_name = ActiveValue::Set(first_name);
        }
        if let Some(middle_name) = patch.middle_name {
            resident_am.middle_name = ActiveValue::Set(Some(middle_name));
        }
        if let Some(last_name) = patch.last_name {
            resident_am.last_name = ActiveValue::Set(last_name);
        }
        if let Some(suffix) = patch.suffix {
            resident_am.suffix = ActiveValue::Set(Some(suffix));
        }
        if let Some(email) = patch.email {
            resident_am.email = ActiveValue::Set(Some(email));
        }
        if let Some(phone) = patch.phone {
            resident_am.phone = ActiveValue::Set(Some(phone));
        }
        if let Some(address) = patch.address {
            resident_am.address = ActiveValue::Set(address);
        }
        if let Some(purok) = patch.purok {
            resident_am.purok = ActiveValue::Set(Some(purok));
        }
        if let Some(birth_date) = patch.birth_date {
            resident_am.birth_date = ActiveValue::Set(Some(birth_date));
        }
        if let Some(gender) = patch.gender {
            resident_am.gender = ActiveValue::Set(gender.to_string());
        }
        if let Some(civil_status) = patch.civil_status {
            resident_am.civil_status = ActiveValue::Set(civil_status.to_string());
        }
        if let Some(occupation) = patch.occupation {
            resident_am.occupation = ActiveValue::Set(Some(occupation));
        }
        if let Some(name) = patch.emergency_contact_name {
            resident_am.emergency_contact_name = ActiveValue::Set(Some(name));
        }
        if let Some(phone) = patch.emergency_contact_phone {
            resident_am.emergency_contact_phone = ActiveValue::Set(Some(phone));
        }
        if let Some(household_id) = patch.household_id {
            resident_am.household_id = ActiveValue::Set(Some(household_id));
        }
        if let Some(philsys_number) = patch.philsys_number {
            resident_am.philsys_number = ActiveValue::Set(Some(philsys_number));
        }
        if let Some(voter_id) = patch.voter_id {
            resident_am.voter_id = ActiveValue::Set(Some(voter_id));
        }

        resident_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        let resident = resident_am.update(self.db).await?;

        Ok(Some(resident))
    }

    /// Deletes a resident
    ///
    /// Returns OK regardless of resident existing, to confirm the deletion result
    /// check the [`DeleteResult::rows_affected`] field.
    pub async fn delete(&self, resident_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Resident::delete_by_id(resident_id)
            .exec(self.db)
            .await
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Resident::find().count(self.db).await
    }
}
