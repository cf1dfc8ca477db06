//! Factory functions for generating in-memory database models.
//!
//! These are model instances that don't require database interaction, suitable for unit
//! tests of conversions and other pure logic.

use chrono::{NaiveDate, Utc};

use crate::model::{AppointmentModel, IncidentModel, UserModel};

/// Create a user model with the given ID and role.
pub fn user_model(id: i32, role: &str) -> UserModel {
    let now = Utc::now().naive_utc();

    UserModel {
        id,
        email: format!("user{}@example.com", id),
        first_name: "Juan".to_string(),
        last_name: "Dela Cruz".to_string(),
        role: role.to_string(),
        created_at: now,
        updated_at: now,
    }
}

/// Create an incident model with the given status and priority.
pub fn incident_model(id: i32, status: &str, priority: &str) -> IncidentModel {
    let now = Utc::now().naive_utc();

    IncidentModel {
        id,
        title: "Noise complaint".to_string(),
        description: "Karaoke past curfew".to_string(),
        incident_type: "disturbance".to_string(),
        status: status.to_string(),
        priority: priority.to_string(),
        location: "Purok 2".to_string(),
        incident_date: now,
        reported_by: None,
        assigned_to: None,
        evidence_urls: serde_json::json!(["https://example.com/evidence/1.jpg"]),
        resolution_notes: None,
        resolved_at: None,
        created_at: now,
        updated_at: now,
    }
}

/// Create an appointment model for `user_id` on the given date and time.
pub fn appointment_model(id: i32, user_id: i32, date: NaiveDate, time: &str) -> AppointmentModel {
    let now = Utc::now().naive_utc();

    AppointmentModel {
        id,
        user_id,
        appointment_type: "vaccination".to_string(),
        service: "Flu vaccine".to_string(),
        appointment_date: date,
        appointment_time: time.to_string(),
        status: "pending".to_string(),
        assigned_staff: None,
        notes: None,
        created_at: now,
        updated_at: now,
    }
}
