pub mod prelude;

pub mod appointment;
pub mod barangay_user;
pub mod document_request;
pub mod notification;
pub mod resident;
pub mod security_incident;
