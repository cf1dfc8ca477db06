use chrono::Utc;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, model::IncidentModel, TestContext};

impl TestContext {
    pub fn incident(&self) -> IncidentFixtures<'_> {
        IncidentFixtures { setup: self }
    }
}

pub struct IncidentFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> IncidentFixtures<'a> {
    /// Insert a theft report with the given status and priority.
    pub async fn insert_incident(
        &self,
        status: &str,
        priority: &str,
    ) -> Result<IncidentModel, TestError> {
        self.insert_incident_reported_by(status, priority, None)
            .await
    }

    pub async fn insert_incident_reported_by(
        &self,
        status: &str,
        priority: &str,
        reported_by: Option<i32>,
    ) -> Result<IncidentModel, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::SecurityIncident::insert(entity::security_incident::ActiveModel {
                title: ActiveValue::Set("Stolen bicycle".to_string()),
                description: ActiveValue::Set("Bicycle taken from the chapel gate".to_string()),
                incident_type: ActiveValue::Set("theft".to_string()),
                status: ActiveValue::Set(status.to_string()),
                priority: ActiveValue::Set(priority.to_string()),
                location: ActiveValue::Set("Purok 3 chapel".to_string()),
                incident_date: ActiveValue::Set(now),
                reported_by: ActiveValue::Set(reported_by),
                assigned_to: ActiveValue::Set(None),
                evidence_urls: ActiveValue::Set(serde_json::json!([])),
                resolution_notes: ActiveValue::Set(None),
                resolved_at: ActiveValue::Set(None),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
