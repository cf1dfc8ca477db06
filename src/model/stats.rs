use serde::{Deserialize, Serialize};

/// Counts shown on the dashboard tiles
///
/// Every field defaults to zero when its count could not be computed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct DashboardStatsDto {
    pub total_residents: u64,
    pub pending_incidents: u64,
    pub investigating_incidents: u64,
    pub resolved_incidents: u64,
    pub closed_incidents: u64,
    /// Open incidents with high or urgent priority
    pub high_priority_incidents: u64,
    pub appointments_today: u64,
    pub pending_appointments: u64,
    pub pending_documents: u64,
}
