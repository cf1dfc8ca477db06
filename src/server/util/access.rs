//! Role-based access policy.
//!
//! Every endpoint resolves the signed-in user first, then checks the user's role against one
//! of the role sets below. Records owned by a user (appointments, document requests,
//! notifications) are additionally visible to their owner.

use crate::{
    model::user::{UserDto, UserRole},
    server::error::{auth::AuthError, Error},
};

/// Roles that may create, edit and delete resident records.
pub const RESIDENT_WRITERS: &[UserRole] = &[UserRole::Admin, UserRole::Superadmin];

/// Roles that may triage, assign and resolve security incidents.
pub const INCIDENT_MANAGERS: &[UserRole] = &[
    UserRole::Tanod,
    UserRole::EmergencyCoordinator,
    UserRole::Admin,
    UserRole::Superadmin,
];

/// Roles that may manage every appointment.
pub const APPOINTMENT_MANAGERS: &[UserRole] = &[
    UserRole::HealthWorker,
    UserRole::Admin,
    UserRole::Superadmin,
];

/// Roles that may process document requests.
pub const DOCUMENT_MANAGERS: &[UserRole] = &[UserRole::Admin, UserRole::Superadmin];

/// Whether the user holds one of `roles`.
pub fn has_role(user: &UserDto, roles: &[UserRole]) -> bool {
    roles.contains(&user.role)
}

/// Fails with [`AuthError::Forbidden`] unless the user holds one of `roles`.
pub fn require_role(user: &UserDto, roles: &[UserRole], action: &'static str) -> Result<(), Error> {
    if has_role(user, roles) {
        Ok(())
    } else {
        Err(AuthError::Forbidden { action }.into())
    }
}

/// Fails with [`AuthError::Forbidden`] unless the user is staff, i.e. not a resident.
pub fn require_staff(user: &UserDto, action: &'static str) -> Result<(), Error> {
    if user.role.is_staff() {
        Ok(())
    } else {
        Err(AuthError::Forbidden { action }.into())
    }
}

/// Whether the user may see a record owned by `owner_id`, either as its owner or as one of
/// the `managers`.
pub fn can_access_owned(user: &UserDto, owner_id: i32, managers: &[UserRole]) -> bool {
    user.id == owner_id || has_role(user, managers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i32, role: UserRole) -> UserDto {
        UserDto {
            id,
            email: format!("user{}@example.com", id),
            first_name: "Ana".to_string(),
            last_name: "Reyes".to_string(),
            role,
            landing_path: role.landing_path().to_string(),
        }
    }

    /// Expect residents to be refused staff-only actions
    #[test]
    fn residents_are_not_staff() {
        let resident = user(1, UserRole::Resident);

        assert!(require_staff(&resident, "view residents").is_err());
        assert!(require_staff(&user(2, UserRole::HealthWorker), "view residents").is_ok());
    }

    /// Expect health workers to manage appointments but not incidents
    #[test]
    fn health_workers_manage_appointments_only() {
        let health_worker = user(1, UserRole::HealthWorker);

        assert!(require_role(&health_worker, APPOINTMENT_MANAGERS, "confirm appointments").is_ok());
        assert!(require_role(&health_worker, INCIDENT_MANAGERS, "assign incidents").is_err());
        assert!(require_role(&health_worker, RESIDENT_WRITERS, "edit residents").is_err());
    }

    /// Expect owners and managers to access owned records
    #[test]
    fn owners_and_managers_access_owned_records() {
        let owner = user(1, UserRole::Resident);
        let stranger = user(2, UserRole::Resident);
        let admin = user(3, UserRole::Admin);

        assert!(can_access_owned(&owner, 1, DOCUMENT_MANAGERS));
        assert!(!can_access_owned(&stranger, 1, DOCUMENT_MANAGERS));
        assert!(can_access_owned(&admin, 1, DOCUMENT_MANAGERS));
    }
}
