use std::collections::HashMap;

use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;

use crate::{
    model::{
        incident::{
            CreateIncidentDto, IncidentDto, IncidentStatus, ResolveIncidentDto, UpdateIncidentDto,
        },
        realtime::{ChangeEvent, ChangeTable},
        require_non_blank,
        workflow::StatusWorkflow,
    },
    server::{
        data::{incident::IncidentRepository, user::UserRepository},
        error::{workflow::WorkflowError, Error},
        model::db::IncidentModel,
        realtime::ChangeFeed,
        service::{check_transition, retry::RetryContext, user::display_names},
        util::time,
    },
};

/// Service for security incident reports and their triage workflow.
pub struct IncidentService<'a> {
    db: &'a DatabaseConnection,
    feed: &'a ChangeFeed,
}

impl<'a> IncidentService<'a> {
    /// Creates a new instance of [`IncidentService`]
    pub fn new(db: &'a DatabaseConnection, feed: &'a ChangeFeed) -> Self {
        Self { db, feed }
    }

    /// Lists incidents, most recent first, with reporter and assignee names.
    ///
    /// # Arguments
    /// - `status` - Only return incidents in this status
    /// - `reported_by` - Only return incidents reported by this user
    pub async fn get_incidents(
        &self,
        status: Option<IncidentStatus>,
        reported_by: Option<i32>,
    ) -> Result<Vec<IncidentDto>, Error> {
        let ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry("get incidents", || {
            let db = db.clone();

            Box::pin(async move {
                let incidents = IncidentRepository::new(&db)
                    .get_all(status, reported_by)
                    .await?;
                let names = display_names(&db, incidents.iter().flat_map(user_ids)).await?;

                incidents
                    .into_iter()
                    .map(|incident| incident_dto(incident, &names))
                    .collect()
            })
        })
        .await
    }

    /// Retrieves one incident.
    ///
    /// # Returns
    /// - `Ok(IncidentDto)` - Incident found
    /// - `Err(WorkflowError::NotFound)` - No incident with that ID
    pub async fn get_incident(&self, incident_id: i32) -> Result<IncidentDto, Error> {
        let ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry(&format!("get incident ID {}", incident_id), || {
            let db = db.clone();

            Box::pin(async move {
                let incident = IncidentRepository::new(&db)
                    .get_by_id(incident_id)
                    .await?
                    .ok_or_else(|| not_found(incident_id))?;
                let names = display_names(&db, user_ids(&incident)).await?;

                incident_dto(incident, &names)
            })
        })
        .await
    }

    /// Files a new pending incident report.
    ///
    /// The incident date defaults to the time of the report.
    pub async fn create_incident(
        &self,
        incident: CreateIncidentDto,
        reported_by: Option<i32>,
    ) -> Result<IncidentDto, Error> {
        incident.validate()?;

        let incident_date = incident.incident_date.unwrap_or_else(time::now);
        let model = IncidentRepository::new(self.db)
            .create(incident, reported_by, incident_date)
            .await?;

        let incident = self.publish(model, Published::Insert).await?;
        tracing::info!(
            incident_id = incident.id,
            priority = %incident.priority,
            "Incident reported"
        );

        Ok(incident)
    }

    /// Applies a patch to the descriptive fields of an incident.
    pub async fn update_incident(
        &self,
        incident_id: i32,
        patch: UpdateIncidentDto,
    ) -> Result<IncidentDto, Error> {
        patch.validate()?;

        let model = IncidentRepository::new(self.db)
            .update(incident_id, patch)
            .await?
            .ok_or_else(|| not_found(incident_id))?;

        let incident = self.publish(model, Published::Update).await?;
        tracing::info!(incident_id = incident.id, "Updated incident");

        Ok(incident)
    }

    /// Moves an incident to `status` if the transition table allows it.
    ///
    /// Setting the current status again succeeds without writing.
    pub async fn set_status(
        &self,
        incident_id: i32,
        status: IncidentStatus,
    ) -> Result<IncidentDto, Error> {
        let incident_repo = IncidentRepository::new(self.db);
        let current = incident_repo
            .get_by_id(incident_id)
            .await?
            .ok_or_else(|| not_found(incident_id))?;

        if !check_transition("incident", current.status.parse::<IncidentStatus>()?, status)? {
            return self.to_dto(current).await;
        }

        let model = incident_repo
            .set_status(incident_id, status)
            .await?
            .ok_or_else(|| not_found(incident_id))?;

        let incident = self.publish(model, Published::Update).await?;
        tracing::info!(
            incident_id = incident.id,
            status = %incident.status,
            "Incident status changed"
        );

        Ok(incident)
    }

    /// Closes an incident, the delete equivalent for incident reports.
    pub async fn close_incident(&self, incident_id: i32) -> Result<IncidentDto, Error> {
        self.set_status(incident_id, IncidentStatus::Closed).await
    }

    /// Assigns an officer to an incident.
    ///
    /// A pending incident moves to investigating, incidents already under investigation or
    /// resolved keep their status. Closed incidents cannot be assigned.
    pub async fn assign(&self, incident_id: i32, assignee_id: i32) -> Result<IncidentDto, Error> {
        let incident_repo = IncidentRepository::new(self.db);
        let current = incident_repo
            .get_by_id(incident_id)
            .await?
            .ok_or_else(|| not_found(incident_id))?;

        if UserRepository::new(self.db)
            .get_by_id(assignee_id)
            .await?
            .is_none()
        {
            return Err(WorkflowError::NotFound {
                entity: "user",
                id: assignee_id,
            }
            .into());
        }

        let current_status: IncidentStatus = current.status.parse()?;
        let status = match current_status {
            IncidentStatus::Pending => IncidentStatus::Investigating,
            status if status.is_terminal() => {
                return Err(WorkflowError::InvalidTransition {
                    entity: "incident",
                    from: status.to_string(),
                    to: IncidentStatus::Investigating.to_string(),
                }
                .into())
            }
            status => status,
        };

        let model = incident_repo
            .assign(incident_id, assignee_id, status)
            .await?
            .ok_or_else(|| not_found(incident_id))?;

        let incident = self.publish(model, Published::Update).await?;
        tracing::info!(
            incident_id = incident.id,
            assignee_id = assignee_id,
            "Incident assigned"
        );

        Ok(incident)
    }

    /// Resolves an incident with resolution notes, recording the resolution time.
    ///
    /// Resolving an incident that is already resolved replaces its notes.
    pub async fn resolve(
        &self,
        incident_id: i32,
        resolution: ResolveIncidentDto,
    ) -> Result<IncidentDto, Error> {
        require_non_blank("resolution_notes", &resolution.resolution_notes)?;

        let incident_repo = IncidentRepository::new(self.db);
        let current = incident_repo
            .get_by_id(incident_id)
            .await?
            .ok_or_else(|| not_found(incident_id))?;

        let from: IncidentStatus = current.status.parse()?;
        // Resolving again only replaces the notes, the original resolution time is kept
        let resolved_at = if check_transition("incident", from, IncidentStatus::Resolved)? {
            time::now()
        } else {
            current.resolved_at.unwrap_or_else(time::now)
        };

        let model = incident_repo
            .resolve(incident_id, resolution.resolution_notes, resolved_at)
            .await?
            .ok_or_else(|| not_found(incident_id))?;

        let incident = self.publish(model, Published::Update).await?;
        tracing::info!(incident_id = incident.id, "Incident resolved");

        Ok(incident)
    }

    async fn to_dto(&self, incident: IncidentModel) -> Result<IncidentDto, Error> {
        let names = display_names(self.db, user_ids(&incident)).await?;

        incident_dto(incident, &names)
    }

    async fn publish(
        &self,
        incident: IncidentModel,
        published: Published,
    ) -> Result<IncidentDto, Error> {
        let incident = self.to_dto(incident).await?;

        let event = match published {
            Published::Insert => {
                ChangeEvent::insert(ChangeTable::SecurityIncidents, incident.id, &incident)?
            }
            Published::Update => {
                ChangeEvent::update(ChangeTable::SecurityIncidents, incident.id, &incident)?
            }
        };
        self.feed.publish(event);

        Ok(incident)
    }
}

enum Published {
    Insert,
    Update,
}

fn not_found(incident_id: i32) -> Error {
    WorkflowError::NotFound {
        entity: "incident",
        id: incident_id,
    }
    .into()
}

fn user_ids(incident: &IncidentModel) -> impl Iterator<Item = i32> {
    [incident.reported_by, incident.assigned_to].into_iter().flatten()
}

fn incident_dto(
    incident: IncidentModel,
    names: &HashMap<i32, String>,
) -> Result<IncidentDto, Error> {
    let name_of = |id: Option<i32>| id.and_then(|id| names.get(&id).cloned());

    Ok(IncidentDto {
        id: incident.id,
        title: incident.title,
        description: incident.description,
        incident_type: incident.incident_type.parse()?,
        status: incident.status.parse()?,
        priority: incident.priority.parse()?,
        location: incident.location,
        incident_date: incident.incident_date,
        reporter_name: name_of(incident.reported_by),
        reported_by: incident.reported_by,
        assignee_name: name_of(incident.assigned_to),
        assigned_to: incident.assigned_to,
        evidence_urls: serde_json::from_value(incident.evidence_urls)?,
        resolution_notes: incident.resolution_notes,
        resolved_at: incident.resolved_at,
        created_at: incident.created_at,
        updated_at: incident.updated_at,
    })
}

#[cfg(test)]
mod tests {
    use barangay_test_utils::prelude::*;

    use crate::server::realtime::ChangeFeed;

    async fn setup() -> Result<(TestContext, ChangeFeed), TestError> {
        let test = TestBuilder::new()
            .with_user_tables()
            .with_table(entity::prelude::SecurityIncident)
            .build()
            .await?;

        Ok((test, ChangeFeed::new(16)))
    }

    mod get_incidents {
        use barangay_test_utils::prelude::*;

        use crate::server::service::incident::IncidentService;

        use super::setup;

        /// Expect reporter names to be joined and the reporter filter applied
        #[tokio::test]
        async fn joins_reporter_names() -> Result<(), TestError> {
            let (test, feed) = setup().await?;
            let reporter = test.user().insert_user("resident").await?;
            test.incident()
                .insert_incident_reported_by("pending", "medium", Some(reporter.id))
                .await?;
            test.incident().insert_incident("pending", "low").await?;

            let incident_service = IncidentService::new(&test.db, &feed);
            let all = incident_service.get_incidents(None, None).await.unwrap();
            let own = incident_service
                .get_incidents(None, Some(reporter.id))
                .await
                .unwrap();

            assert_eq!(all.len(), 2);
            assert_eq!(own.len(), 1);
            assert_eq!(own[0].reporter_name.as_deref(), Some("Test Resident"));

            Ok(())
        }
    }

    mod create_incident {
        use barangay_test_utils::prelude::*;

        use crate::{
            model::incident::{CreateIncidentDto, IncidentPriority, IncidentStatus, IncidentType},
            server::service::incident::IncidentService,
        };

        use super::setup;

        /// Expect the report to be pending and dated at the time of the report
        #[tokio::test]
        async fn creates_pending_report() -> Result<(), TestError> {
            let (test, feed) = setup().await?;

            let incident_service = IncidentService::new(&test.db, &feed);
            let incident = incident_service
                .create_incident(
                    CreateIncidentDto {
                        title: "Fight at the basketball court".to_string(),
                        description: "Two groups fighting after a game".to_string(),
                        incident_type: IncidentType::Assault,
                        priority: IncidentPriority::Urgent,
                        location: "Covered court".to_string(),
                        incident_date: None,
                        evidence_urls: Vec::new(),
                    },
                    None,
                )
                .await
                .unwrap();

            assert_eq!(incident.status, IncidentStatus::Pending);
            assert_eq!(incident.priority, IncidentPriority::Urgent);
            assert!(incident.evidence_urls.is_empty());

            Ok(())
        }
    }

    mod set_status {
        use barangay_test_utils::prelude::*;

        use crate::{
            model::incident::IncidentStatus,
            server::{
                error::{workflow::WorkflowError, Error},
                service::incident::IncidentService,
            },
        };

        use super::setup;

        /// Expect closed incidents to refuse any other status
        #[tokio::test]
        async fn rejects_reopening_closed_incident() -> Result<(), TestError> {
            let (test, feed) = setup().await?;
            let incident = test.incident().insert_incident("closed", "low").await?;

            let incident_service = IncidentService::new(&test.db, &feed);
            let result = incident_service
                .set_status(incident.id, IncidentStatus::Investigating)
                .await;

            assert!(matches!(
                result,
                Err(Error::WorkflowError(WorkflowError::InvalidTransition { .. }))
            ));

            Ok(())
        }

        /// Expect the current status to succeed without publishing
        #[tokio::test]
        async fn same_status_is_a_no_op() -> Result<(), TestError> {
            let (test, feed) = setup().await?;
            let incident = test.incident().insert_incident("investigating", "low").await?;

            let incident_service = IncidentService::new(&test.db, &feed);
            let result = incident_service
                .set_status(incident.id, IncidentStatus::Investigating)
                .await
                .unwrap();

            assert_eq!(result.status, IncidentStatus::Investigating);
            assert_eq!(result.updated_at, incident.updated_at);

            Ok(())
        }

        /// Expect closing to be the delete equivalent
        #[tokio::test]
        async fn close_sets_closed_status() -> Result<(), TestError> {
            let (test, feed) = setup().await?;
            let incident = test.incident().insert_incident("pending", "low").await?;

            let incident_service = IncidentService::new(&test.db, &feed);
            let closed = incident_service.close_incident(incident.id).await.unwrap();

            assert_eq!(closed.status, IncidentStatus::Closed);

            Ok(())
        }
    }

    mod assign {
        use barangay_test_utils::prelude::*;

        use crate::{
            model::incident::IncidentStatus,
            server::{
                error::{workflow::WorkflowError, Error},
                service::incident::IncidentService,
            },
        };

        use super::setup;

        /// Expect assigning a pending incident to start the investigation
        #[tokio::test]
        async fn pending_incident_moves_to_investigating() -> Result<(), TestError> {
            let (test, feed) = setup().await?;
            let tanod = test.user().insert_user("tanod").await?;
            let incident = test.incident().insert_incident("pending", "high").await?;

            let incident_service = IncidentService::new(&test.db, &feed);
            let assigned = incident_service.assign(incident.id, tanod.id).await.unwrap();

            assert_eq!(assigned.status, IncidentStatus::Investigating);
            assert_eq!(assigned.assigned_to, Some(tanod.id));
            assert_eq!(assigned.assignee_name.as_deref(), Some("Test Tanod"));

            Ok(())
        }

        /// Expect NotFound when the assignee does not exist
        #[tokio::test]
        async fn fails_for_nonexistent_assignee() -> Result<(), TestError> {
            let (test, feed) = setup().await?;
            let incident = test.incident().insert_incident("pending", "high").await?;

            let incident_service = IncidentService::new(&test.db, &feed);
            let result = incident_service.assign(incident.id, 404).await;

            assert!(matches!(
                result,
                Err(Error::WorkflowError(WorkflowError::NotFound { entity: "user", .. }))
            ));

            Ok(())
        }
    }

    mod resolve {
        use barangay_test_utils::prelude::*;

        use crate::{
            model::incident::{IncidentStatus, ResolveIncidentDto},
            server::{error::Error, service::incident::IncidentService},
        };

        use super::setup;

        /// Expect resolving to populate resolved_at and the notes
        #[tokio::test]
        async fn populates_resolved_at() -> Result<(), TestError> {
            let (test, feed) = setup().await?;
            let incident = test.incident().insert_incident("investigating", "high").await?;

            let incident_service = IncidentService::new(&test.db, &feed);
            let resolved = incident_service
                .resolve(
                    incident.id,
                    ResolveIncidentDto {
                        resolution_notes: "Parties settled at the barangay hall".to_string(),
                    },
                )
                .await
                .unwrap();

            assert_eq!(resolved.status, IncidentStatus::Resolved);
            assert!(resolved.resolved_at.is_some());

            Ok(())
        }

        /// Expect resolving again to replace the notes and keep the resolution time
        #[tokio::test]
        async fn re_resolving_replaces_notes() -> Result<(), TestError> {
            let (test, feed) = setup().await?;
            let incident = test.incident().insert_incident("investigating", "medium").await?;

            let incident_service = IncidentService::new(&test.db, &feed);
            let first = incident_service
                .resolve(
                    incident.id,
                    ResolveIncidentDto {
                        resolution_notes: "Bicycle returned".to_string(),
                    },
                )
                .await
                .unwrap();
            let second = incident_service
                .resolve(
                    incident.id,
                    ResolveIncidentDto {
                        resolution_notes: "Bicycle returned, owner filed no complaint".to_string(),
                    },
                )
                .await
                .unwrap();

            assert_eq!(second.status, IncidentStatus::Resolved);
            assert_eq!(
                second.resolution_notes.as_deref(),
                Some("Bicycle returned, owner filed no complaint")
            );
            assert_eq!(second.resolved_at, first.resolved_at);

            Ok(())
        }

        /// Expect blank notes to be rejected
        #[tokio::test]
        async fn rejects_blank_notes() -> Result<(), TestError> {
            let (test, feed) = setup().await?;
            let incident = test.incident().insert_incident("investigating", "high").await?;

            let incident_service = IncidentService::new(&test.db, &feed);
            let result = incident_service
                .resolve(
                    incident.id,
                    ResolveIncidentDto {
                        resolution_notes: String::new(),
                    },
                )
                .await;

            assert!(matches!(result, Err(Error::ValidationError(_))));

            Ok(())
        }
    }

    mod incident_dto {
        use std::collections::HashMap;

        use barangay_test_utils::prelude::*;

        use crate::{
            model::incident::{IncidentPriority, IncidentStatus},
            server::{error::Error, service::incident::incident_dto},
        };

        /// Expect names to be joined and evidence URLs decoded
        #[test]
        fn joins_names_and_evidence() {
            let mut incident = factory::incident_model(1, "investigating", "urgent");
            incident.reported_by = Some(3);
            incident.assigned_to = Some(4);
            let names = HashMap::from([(3, "Ana Reyes".to_string())]);

            let dto = incident_dto(incident, &names).unwrap();

            assert_eq!(dto.status, IncidentStatus::Investigating);
            assert_eq!(dto.priority, IncidentPriority::Urgent);
            assert_eq!(dto.reporter_name.as_deref(), Some("Ana Reyes"));
            assert_eq!(dto.assignee_name, None);
            assert_eq!(dto.evidence_urls.len(), 1);
        }

        /// Expect a stored status outside the workflow to fail conversion
        #[test]
        fn fails_for_unknown_status() {
            let incident = factory::incident_model(1, "archived", "low");

            let result = incident_dto(incident, &HashMap::new());

            assert!(matches!(result, Err(Error::StoredValueError(_))));
        }
    }
}
