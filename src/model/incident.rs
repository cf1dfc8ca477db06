use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::{
    require_non_blank, require_non_blank_if_set, workflow::StatusWorkflow, ValidationError,
};

string_enum! {
    pub enum IncidentType {
        Theft => "theft",
        Assault => "assault",
        Vandalism => "vandalism",
        Disturbance => "disturbance",
        Trespassing => "trespassing",
        TrafficAccident => "traffic_accident",
        DomesticDispute => "domestic_dispute",
        Other => "other",
    }
}

string_enum! {
    pub enum IncidentStatus {
        Pending => "pending",
        Investigating => "investigating",
        Resolved => "resolved",
        Closed => "closed",
    }
}

string_enum! {
    pub enum IncidentPriority {
        Low => "low",
        Medium => "medium",
        High => "high",
        Urgent => "urgent",
    }
}

impl StatusWorkflow for IncidentStatus {
    fn next_statuses(&self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Investigating, Self::Resolved, Self::Closed],
            Self::Investigating => &[Self::Resolved, Self::Closed],
            // Reopening a resolved incident sends it back to investigation
            Self::Resolved => &[Self::Investigating, Self::Closed],
            Self::Closed => &[],
        }
    }
}

impl IncidentStatus {
    /// Pending and investigating incidents still need attention.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Pending | Self::Investigating)
    }
}

/// A reported security incident
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct IncidentDto {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub incident_type: IncidentType,
    pub status: IncidentStatus,
    pub priority: IncidentPriority,
    pub location: String,
    pub incident_date: NaiveDateTime,
    pub reported_by: Option<i32>,
    /// Display name of the reporting user
    pub reporter_name: Option<String>,
    pub assigned_to: Option<i32>,
    /// Display name of the assigned officer
    pub assignee_name: Option<String>,
    pub evidence_urls: Vec<String>,
    pub resolution_notes: Option<String>,
    pub resolved_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Request body for reporting an incident
#[derive(Clone, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct CreateIncidentDto {
    pub title: String,
    pub description: String,
    pub incident_type: IncidentType,
    #[serde(default = "default_priority")]
    pub priority: IncidentPriority,
    pub location: String,
    /// When the incident happened, defaults to the time of the report
    #[serde(default)]
    pub incident_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub evidence_urls: Vec<String>,
}

fn default_priority() -> IncidentPriority {
    IncidentPriority::Medium
}

impl CreateIncidentDto {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("title", &self.title)?;
        require_non_blank("description", &self.description)?;
        require_non_blank("location", &self.location)?;

        Ok(())
    }
}

/// Request body for patching an incident
///
/// Status is changed through the status endpoints so that the transition table applies.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct UpdateIncidentDto {
    pub title: Option<String>,
    pub description: Option<String>,
    pub incident_type: Option<IncidentType>,
    pub priority: Option<IncidentPriority>,
    pub location: Option<String>,
    pub incident_date: Option<NaiveDateTime>,
    pub evidence_urls: Option<Vec<String>>,
}

impl UpdateIncidentDto {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank_if_set("title", self.title.as_ref())?;
        require_non_blank_if_set("description", self.description.as_ref())?;
        require_non_blank_if_set("location", self.location.as_ref())?;

        Ok(())
    }
}

/// Request body for moving an incident to another status
#[derive(Clone, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct IncidentStatusDto {
    pub status: IncidentStatus,
}

/// Request body for assigning an incident to an officer
#[derive(Clone, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct AssignIncidentDto {
    pub assignee_id: i32,
}

/// Request body for resolving an incident
#[derive(Clone, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct ResolveIncidentDto {
    pub resolution_notes: String,
}
