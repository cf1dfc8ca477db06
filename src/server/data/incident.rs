use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{
    model::incident::{CreateIncidentDto, IncidentPriority, IncidentStatus, UpdateIncidentDto},
    server::model::db::IncidentModel,
};

pub struct IncidentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> IncidentRepository<'a, C> {
    /// Creates a new instance of [`IncidentRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a new incident report in the pending status
    pub async fn create(
        &self,
        incident: CreateIncidentDto,
        reported_by: Option<i32>,
        incident_date: NaiveDateTime,
    ) -> Result<IncidentModel, DbErr> {
        let now = Utc::now().naive_utc();

        let incident = entity::security_incident::ActiveModel {
            title: ActiveValue::Set(incident.title),
            description: ActiveValue::Set(incident.description),
            incident_type: ActiveValue::Set(incident.incident_type.to_string()),
            status: ActiveValue::Set(IncidentStatus::Pending.to_string()),
            priority: ActiveValue::Set(incident.priority.to_string()),
            location: ActiveValue::Set(incident.location),
            incident_date: ActiveValue::Set(incident_date),
            reported_by: ActiveValue::Set(reported_by),
            assigned_to: ActiveValue::Set(None),
            evidence_urls: ActiveValue::Set(serde_json::json!(incident.evidence_urls)),
            resolution_notes: ActiveValue::Set(None),
            resolved_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        incident.insert(self.db).await
    }

    pub async fn get_by_id(&self, incident_id: i32) -> Result<Option<IncidentModel>, DbErr> {
        entity::prelude::SecurityIncident::find_by_id(incident_id)
            .one(self.db)
            .await
    }

    /// Gets incidents, most recent first, optionally filtered by status and reporter
    pub async fn get_all(
        &self,
        status: Option<IncidentStatus>,
        reported_by: Option<i32>,
    ) -> Result<Vec<IncidentModel>, DbErr> {
        let mut query = entity::prelude::SecurityIncident::find();

        if let Some(status) = status {
            query = query.filter(entity::security_incident::Column::Status.eq(status.as_str()));
        }
        if let Some(user_id) = reported_by {
            query = query.filter(entity::security_incident::Column::ReportedBy.eq(user_id));
        }

        query
            .order_by_desc(entity::security_incident::Column::IncidentDate)
            .order_by_desc(entity::security_incident::Column::Id)
            .all(self.db)
            .await
    }

    /// Applies the fields present in `patch` to an incident
    ///
    /// Returns `Ok(None)` if the incident does not exist.
    pub async fn update(
        &self,
        incident_id: i32,
        patch: UpdateIncidentDto,
    ) -> Result<Option<IncidentModel>, DbErr> {
        self.modify(incident_id, |incident| {
            if let Some(title) = patch.title {
                incident.title = ActiveValue::Set(title);
            }
            if let Some(description) = patch.description {
                incident.description = ActiveValue::Set(description);
            }
            if let Some(incident_type) = patch.incident_type {
                incident.incident_type = ActiveValue::Set(incident_type.to_string());
            }
            if let Some(priority) = patch.priority {
                incident.priority = ActiveValue::Set(priority.to_string());
            }
            if let Some(location) = patch.location {
                incident.location = ActiveValue::Set(location);
            }
            if let Some(incident_date) = patch.incident_date {
                incident.incident_date = ActiveValue::Set(incident_date);
            }
            if let Some(evidence_urls) = patch.evidence_urls {
                incident.evidence_urls = ActiveValue::Set(serde_json::json!(evidence_urls));
            }
        })
        .await
    }

    /// Sets the status of an incident
    ///
    /// Moving to resolved records the resolution time, any other status clears it so that a
    /// reopened incident is not reported as resolved.
    pub async fn set_status(
        &self,
        incident_id: i32,
        status: IncidentStatus,
    ) -> Result<Option<IncidentModel>, DbErr> {
        self.modify(incident_id, |incident| {
            incident.status = ActiveValue::Set(status.to_string());
            incident.resolved_at = ActiveValue::Set(
                (status == IncidentStatus::Resolved).then(|| Utc::now().naive_utc()),
            );
        })
        .await
    }

    /// Assigns an officer to an incident and moves it to `status`
    pub async fn assign(
        &self,
        incident_id: i32,
        assignee_id: i32,
        status: IncidentStatus,
    ) -> Result<Option<IncidentModel>, DbErr> {
        self.modify(incident_id, |incident| {
            incident.assigned_to = ActiveValue::Set(Some(assignee_id));
            incident.status = ActiveValue::Set(status.to_string());
        })
        .await
    }

    /// Marks an incident as resolved with the provided notes
    pub async fn resolve(
        &self,
        incident_id: i32,
        resolution_notes: String,
        resolved_at: NaiveDateTime,
    ) -> Result<Option<IncidentModel>, DbErr> {
        self.modify(incident_id, |incident| {
            incident.status = ActiveValue::Set(IncidentStatus::Resolved.to_string());
            incident.resolution_notes = ActiveValue::Set(Some(resolution_notes));
            incident.resolved_at = ActiveValue::Set(Some(resolved_at));
        })
        .await
    }

    pub async fn count_by_status(&self, status: IncidentStatus) -> Result<u64, DbErr> {
        entity::prelude::SecurityIncident::find()
            .filter(entity::security_incident::Column::Status.eq(status.as_str()))
            .count(self.db)
            .await
    }

    /// Counts open incidents with any of the provided priorities
    pub async fn count_open_by_priority(
        &self,
        priorities: &[IncidentPriority],
    ) -> Result<u64, DbErr> {
        let open_statuses = IncidentStatus::ALL
            .iter()
            .filter(|status| status.is_open())
            .map(|status| status.as_str());

        entity::prelude::SecurityIncident::find()
            .filter(entity::security_incident::Column::Status.is_in(open_statuses))
            .filter(
                entity::security_incident::Column::Priority
                    .is_in(priorities.iter().map(|priority| priority.as_str())),
            )
            .count(self.db)
            .await
    }

    /// Loads an incident, lets `change` edit it and saves it with a fresh `updated_at`
    async fn modify<F>(&self, incident_id: i32, change: F) -> Result<Option<IncidentModel>, DbErr>
    where
        F: FnOnce(&mut entity::security_incident::ActiveModel),
    {
        let incident = match entity::prelude::SecurityIncident::find_by_id(incident_id)
            .one(self.db)
            .await?
        {
            Some(incident) => incident,
            None => return Ok(None),
        };

        let mut incident_am = incident.into_active_model();
        change(&mut incident_am);
        incident_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        let incident = incident_am.update(self.db).await?;

        Ok(Some(incident))
    }
}

#[cfg(test)]
mod tests {
    mod create {
        use barangay_test_utils::prelude::*;
        use chrono::Utc;

        use crate::{
            model::incident::{CreateIncidentDto, IncidentPriority, IncidentType},
            server::data::incident::IncidentRepository,
        };

        /// Expect new incidents to start pending with their evidence stored as JSON
        #[tokio::test]
        async fn creates_pending_incident() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_table(entity::prelude::SecurityIncident)
                .build()
                .await?;

            let incident_repo = IncidentRepository::new(&test.db);
            let incident = incident_repo
                .create(
                    CreateIncidentDto {
                        title: "Broken streetlight".to_string(),
                        description: "Streetlight vandalised overnight".to_string(),
                        incident_type: IncidentType::Vandalism,
                        priority: IncidentPriority::Low,
                        location: "Purok 5".to_string(),
                        incident_date: None,
                        evidence_urls: vec!["https://example.com/1.jpg".to_string()],
                    },
                    Some(3),
                    Utc::now().naive_utc(),
                )
                .await?;

            assert_eq!(incident.status, "pending");
            assert_eq!(incident.reported_by, Some(3));
            assert_eq!(
                incident.evidence_urls,
                serde_json::json!(["https://example.com/1.jpg"])
            );

            Ok(())
        }
    }

    mod get_all {
        use barangay_test_utils::prelude::*;

        use crate::{model::incident::IncidentStatus, server::data::incident::IncidentRepository};

        /// Expect the status filter to only return matching incidents
        #[tokio::test]
        async fn filters_by_status() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_table(entity::prelude::SecurityIncident)
                .build()
                .await?;
            test.incident().insert_incident("pending", "low").await?;
            test.incident().insert_incident("closed", "low").await?;

            let incident_repo = IncidentRepository::new(&test.db);

            assert_eq!(incident_repo.get_all(None, None).await?.len(), 2);
            let pending = incident_repo
                .get_all(Some(IncidentStatus::Pending), None)
                .await?;
            assert_eq!(pending.len(), 1);
            assert_eq!(pending[0].status, "pending");

            Ok(())
        }
    }

    mod resolve {
        use barangay_test_utils::prelude::*;
        use chrono::Utc;

        use crate::{model::incident::IncidentStatus, server::data::incident::IncidentRepository};

        /// Expect resolving to populate the notes and resolution time
        #[tokio::test]
        async fn populates_resolved_at() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_table(entity::prelude::SecurityIncident)
                .build()
                .await?;
            let incident = test.incident().insert_incident("investigating", "high").await?;

            let incident_repo = IncidentRepository::new(&test.db);
            let resolved = incident_repo
                .resolve(incident.id, "Bicycle returned".to_string(), Utc::now().naive_utc())
                .await?
                .expect("incident should exist");

            assert_eq!(resolved.status, "resolved");
            assert!(resolved.resolved_at.is_some());
            assert_eq!(resolved.resolution_notes.as_deref(), Some("Bicycle returned"));

            // Reopening clears the resolution time
            let reopened = incident_repo
                .set_status(incident.id, IncidentStatus::Investigating)
                .await?
                .expect("incident should exist");
            assert_eq!(reopened.resolved_at, None);

            Ok(())
        }

        /// Expect Ok(None) for an incident that does not exist
        #[tokio::test]
        async fn returns_none_for_nonexistent_incident() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_table(entity::prelude::SecurityIncident)
                .build()
                .await?;

            let incident_repo = IncidentRepository::new(&test.db);
            let result = incident_repo
                .resolve(1, "n/a".to_string(), Utc::now().naive_utc())
                .await;

            assert!(matches!(result, Ok(None)));

            Ok(())
        }
    }

    mod count {
        use barangay_test_utils::prelude::*;

        use crate::{
            model::incident::{IncidentPriority, IncidentStatus},
            server::data::incident::IncidentRepository,
        };

        /// Expect only open incidents with a matching priority to be counted
        #[tokio::test]
        async fn counts_open_high_priority_incidents() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_table(entity::prelude::SecurityIncident)
                .build()
                .await?;
            test.incident().insert_incident("pending", "urgent").await?;
            test.incident().insert_incident("investigating", "high").await?;
            test.incident().insert_incident("resolved", "high").await?;
            test.incident().insert_incident("pending", "low").await?;

            let incident_repo = IncidentRepository::new(&test.db);
            let count = incident_repo
                .count_open_by_priority(&[IncidentPriority::High, IncidentPriority::Urgent])
                .await?;

            assert_eq!(count, 2);
            assert_eq!(
                incident_repo.count_by_status(IncidentStatus::Pending).await?,
                2
            );

            Ok(())
        }
    }
}
