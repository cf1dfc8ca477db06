use std::future::Future;

use dioxus_logger::tracing;
use sea_orm::{DatabaseConnection, DbErr};

use crate::{
    model::{
        appointment::AppointmentStatus, document::DocumentStatus,
        incident::{IncidentPriority, IncidentStatus},
        stats::DashboardStatsDto,
    },
    server::{
        data::{
            appointment::AppointmentRepository, document::DocumentRepository,
            incident::IncidentRepository, resident::ResidentRepository,
        },
        util::time,
    },
};

/// Service for the count-only aggregates behind the dashboard tiles.
pub struct StatsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StatsService<'a> {
    /// Creates a new instance of [`StatsService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Computes every dashboard count.
    ///
    /// This never fails: a count whose query fails is logged at warn level and reported as
    /// zero so that the rest of the dashboard still renders.
    pub async fn get_dashboard_stats(&self) -> DashboardStatsDto {
        let resident_repo = ResidentRepository::new(self.db);
        let incident_repo = IncidentRepository::new(self.db);
        let appointment_repo = AppointmentRepository::new(self.db);
        let document_repo = DocumentRepository::new(self.db);

        DashboardStatsDto {
            total_residents: count_or_zero("total_residents", resident_repo.count()).await,
            pending_incidents: count_or_zero(
                "pending_incidents",
                incident_repo.count_by_status(IncidentStatus::Pending),
            )
            .await,
            investigating_incidents: count_or_zero(
                "investigating_incidents",
                incident_repo.count_by_status(IncidentStatus::Investigating),
            )
            .await,
            resolved_incidents: count_or_zero(
                "resolved_incidents",
                incident_repo.count_by_status(IncidentStatus::Resolved),
            )
            .await,
            closed_incidents: count_or_zero(
                "closed_incidents",
                incident_repo.count_by_status(IncidentStatus::Closed),
            )
            .await,
            high_priority_incidents: count_or_zero(
                "high_priority_incidents",
                incident_repo
                    .count_open_by_priority(&[IncidentPriority::High, IncidentPriority::Urgent]),
            )
            .await,
            appointments_today: count_or_zero(
                "appointments_today",
                appointment_repo.count_on_date(time::today()),
            )
            .await,
            pending_appointments: count_or_zero(
                "pending_appointments",
                appointment_repo.count_by_status(AppointmentStatus::Pending),
            )
            .await,
            pending_documents: count_or_zero(
                "pending_documents",
                document_repo.count_by_status(DocumentStatus::Pending),
            )
            .await,
        }
    }
}

async fn count_or_zero<F>(stat: &'static str, count: F) -> u64
where
    F: Future<Output = Result<u64, DbErr>>,
{
    match count.await {
        Ok(count) => count,
        Err(err) => {
            tracing::warn!(stat = stat, "Failed to count dashboard stat: {}", err);

            0
        }
    }
}
