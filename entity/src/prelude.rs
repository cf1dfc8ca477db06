pub use super::appointment::Entity as Appointment;
pub use super::barangay_user::Entity as BarangayUser;
pub use super::document_request::Entity as DocumentRequest;
pub use super::notification::Entity as Notification;
pub use super::resident::Entity as Resident;
pub use super::security_incident::Entity as SecurityIncident;
