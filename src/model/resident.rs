use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::model::{require_non_blank, require_non_blank_if_set, ValidationError};

string_enum! {
    pub enum Gender {
        Male => "male",
        Female => "female",
        Other => "other",
    }
}

string_enum! {
    pub enum CivilStatus {
        Single => "single",
        Married => "married",
        Widowed => "widowed",
        Separated => "separated",
        Divorced => "divorced",
    }
}

/// A registered resident of the barangay
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct ResidentDto {
    pub id: i32,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub suffix: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: String,
    /// Zone within the barangay
    pub purok: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub gender: Gender,
    pub civil_status: CivilStatus,
    pub occupation: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    /// Household the resident belongs to, not checked against any table
    pub household_id: Option<i32>,
    /// Philippine Identification System number
    pub philsys_number: Option<String>,
    pub voter_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl ResidentDto {
    /// Full display name, e.g. `Maria L. Santos Jr.`
    pub fn full_name(&self) -> String {
        let mut parts = vec![self.first_name.as_str()];

        let middle_initial = self
            .middle_name
            .as_deref()
            .and_then(|m| m.trim().chars().next())
            .map(|c| format!("{}.", c));
        if let Some(initial) = middle_initial.as_deref() {
            parts.push(initial);
        }

        parts.push(self.last_name.as_str());

        if let Some(suffix) = self.suffix.as_deref().filter(|s| !s.trim().is_empty()) {
            parts.push(suffix);
        }

        parts.join(" ")
    }

    /// Age in whole years on `today`, if the birth date is known.
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        self.birth_date.and_then(|birth| today.years_since(birth))
    }
}

/// Request body for registering a resident
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct CreateResidentDto {
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    pub last_name: String,
    #[serde(default)]
    pub suffix: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub address: String,
    #[serde(default)]
    pub purok: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub civil_status: Option<CivilStatus>,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub emergency_contact_name: Option<String>,
    #[serde(default)]
    pub emergency_contact_phone: Option<String>,
    #[serde(default)]
    pub household_id: Option<i32>,
    #[serde(default)]
    pub philsys_number: Option<String>,
    #[serde(default)]
    pub voter_id: Option<String>,
}

impl CreateResidentDto {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("first_name", &self.first_name)?;
        require_non_blank("last_name", &self.last_name)?;
        require_non_blank("address", &self.address)?;

        if self.gender.is_none() {
            return Err(ValidationError { field: "gender" });
        }
        if self.civil_status.is_none() {
            return Err(ValidationError {
                field: "civil_status",
            });
        }

        Ok(())
    }
}

/// Request body for patching a resident, absent fields are left unchanged
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct UpdateResidentDto {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub suffix: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub purok: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub civil_status: Option<CivilStatus>,
    pub occupation: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub household_id: Option<i32>,
    pub philsys_number: Option<String>,
    pub voter_id: Option<String>,
}

impl UpdateResidentDto {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank_if_set("first_name", self.first_name.as_ref())?;
        require_non_blank_if_set("last_name", self.last_name.as_ref())?;
        require_non_blank_if_set("address", self.address.as_ref())?;

        Ok(())
    }
}
