use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::model::{
    require_non_blank, require_non_blank_if_set, workflow::StatusWorkflow, ValidationError,
};

/// Bookable start times of a single day, in order.
pub const DAILY_SLOTS: [&str; 8] = [
    "08:00", "09:00", "10:00", "11:00", "13:00", "14:00", "15:00", "16:00",
];

string_enum! {
    pub enum AppointmentType {
        Checkup => "checkup",
        Consultation => "consultation",
        Vaccination => "vaccination",
        Prenatal => "prenatal",
        Dental => "dental",
        Other => "other",
    }
}

string_enum! {
    pub enum AppointmentStatus {
        Pending => "pending",
        Confirmed => "confirmed",
        Completed => "completed",
        Cancelled => "cancelled",
        NoShow => "no_show",
    }
}

impl StatusWorkflow for AppointmentStatus {
    fn next_statuses(&self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Confirmed, Self::Cancelled],
            Self::Confirmed => &[Self::Completed, Self::Cancelled, Self::NoShow],
            Self::Completed | Self::Cancelled | Self::NoShow => &[],
        }
    }
}

impl AppointmentStatus {
    /// Whether an appointment in this status keeps its slot booked.
    pub fn holds_slot(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

/// Whether `time` is one of the [`DAILY_SLOTS`].
pub fn is_valid_slot(time: &str) -> bool {
    DAILY_SLOTS.contains(&time)
}

/// The daily slots that are not present in `booked`, in slot order.
pub fn available_slots<'a, I>(booked: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let booked: Vec<&str> = booked.into_iter().collect();

    DAILY_SLOTS
        .iter()
        .filter(|slot| !booked.contains(*slot))
        .map(|slot| slot.to_string())
        .collect()
}

/// A booked appointment
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct AppointmentDto {
    pub id: i32,
    pub user_id: i32,
    /// Display name of the user the appointment is for
    pub user_name: Option<String>,
    pub appointment_type: AppointmentType,
    pub service: String,
    pub appointment_date: NaiveDate,
    /// Start time as `HH:MM`, one of the daily slots
    pub appointment_time: String,
    pub status: AppointmentStatus,
    pub assigned_staff: Option<i32>,
    /// Display name of the assigned staff member
    pub staff_name: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Request body for booking an appointment
#[derive(Clone, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct CreateAppointmentDto {
    /// User the appointment is for, staff may book for others; defaults to the caller
    #[serde(default)]
    pub user_id: Option<i32>,
    pub appointment_type: AppointmentType,
    pub service: String,
    pub appointment_date: NaiveDate,
    pub appointment_time: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CreateAppointmentDto {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("service", &self.service)?;
        require_non_blank("appointment_time", &self.appointment_time)?;

        Ok(())
    }
}

/// Request body for patching an appointment
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct UpdateAppointmentDto {
    pub appointment_type: Option<AppointmentType>,
    pub service: Option<String>,
    pub appointment_date: Option<NaiveDate>,
    pub appointment_time: Option<String>,
    pub assigned_staff: Option<i32>,
    pub notes: Option<String>,
}

impl UpdateAppointmentDto {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank_if_set("service", self.service.as_ref())?;
        require_non_blank_if_set("appointment_time", self.appointment_time.as_ref())?;

        Ok(())
    }

    /// Whether applying this patch moves the appointment to another slot.
    pub fn reschedules(&self) -> bool {
        self.appointment_date.is_some() || self.appointment_time.is_some()
    }
}

/// Request body for confirming an appointment
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct ConfirmAppointmentDto {
    pub assigned_staff: Option<i32>,
}

/// Free slots of one day
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct AvailableSlotsDto {
    pub date: NaiveDate,
    pub slots: Vec<String>,
}
