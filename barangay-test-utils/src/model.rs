//! Database model type aliases for test utilities.
//!
//! These aliases match those in the main barangay crate to keep fixture signatures short.

pub type UserModel = entity::barangay_user::Model;
pub type ResidentModel = entity::resident::Model;
pub type IncidentModel = entity::security_incident::Model;
pub type AppointmentModel = entity::appointment::Model;
pub type DocumentRequestModel = entity::document_request::Model;
pub type NotificationModel = entity::notification::Model;
