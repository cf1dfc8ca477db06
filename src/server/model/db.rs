//! Database model type aliases.
//!
//! This module provides convenient type aliases for SeaORM database entity models used
//! throughout the application. These aliases simplify type signatures and provide a single
//! point of reference for database model types, making it easier to work with entities
//! without importing from the `entity` crate directly.

/// Type alias for a platform user account.
///
/// # Fields (from `entity::barangay_user::Model`)
/// - `id` - Primary key, unique user identifier
/// - `email` - Unique sign-in email
/// - `first_name`, `last_name` - Display name parts
/// - `role` - Snake case role string, parsed into `UserRole`
/// - `created_at`, `updated_at` - Record timestamps
pub type UserModel = entity::barangay_user::Model;

/// Type alias for a resident registry record.
pub type ResidentModel = entity::resident::Model;

/// Type alias for a security incident report.
///
/// `reported_by` and `assigned_to` reference user IDs without a foreign key so reports
/// survive the removal of staff accounts.
pub type IncidentModel = entity::security_incident::Model;

/// Type alias for a health appointment.
pub type AppointmentModel = entity::appointment::Model;

/// Type alias for a document request.
pub type DocumentRequestModel = entity::document_request::Model;

/// Type alias for a user notification.
pub type NotificationModel = entity::notification::Model;
