use serde::{Deserialize, Serialize};

string_enum! {
    /// Role of a signed-in user, which decides the portal they land on.
    pub enum UserRole {
        Resident => "resident",
        HealthWorker => "health_worker",
        Tanod => "tanod",
        Admin => "admin",
        EmergencyCoordinator => "emergency_coordinator",
        Superadmin => "superadmin",
    }
}

impl UserRole {
    /// Path of the portal a user with this role lands on after signing in.
    ///
    /// This lookup only decides navigation, the API checks roles on its own.
    pub fn landing_path(&self) -> &'static str {
        match self {
            Self::Resident => "/resident-portal",
            Self::HealthWorker => "/health-portal",
            Self::Tanod => "/security-portal",
            Self::Admin => "/admin",
            Self::EmergencyCoordinator => "/net",
            Self::Superadmin => "/superadmin",
        }
    }

    /// Human readable portal title.
    pub fn portal_title(&self) -> &'static str {
        match self {
            Self::Resident => "Resident Portal",
            Self::HealthWorker => "Health Worker Portal",
            Self::Tanod => "Security Portal",
            Self::Admin => "Barangay Management System",
            Self::EmergencyCoordinator => "Emergency Coordination",
            Self::Superadmin => "Superadmin Console",
        }
    }

    /// Resolves a portal path segment (without the leading slash) back to its role.
    pub fn from_portal_segment(segment: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|role| role.landing_path().trim_start_matches('/') == segment)
    }

    /// Every role other than [`UserRole::Resident`] belongs to barangay staff.
    pub fn is_staff(&self) -> bool {
        !matches!(self, Self::Resident)
    }
}

/// The signed-in user
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct UserDto {
    pub id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    /// Portal the client should navigate to for this user
    pub landing_path: String,
}

impl UserDto {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
