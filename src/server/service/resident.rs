use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;

use crate::{
    model::{
        realtime::{ChangeEvent, ChangeTable},
        resident::{CreateResidentDto, ResidentDto, UpdateResidentDto},
        ValidationError,
    },
    server::{
        data::resident::ResidentRepository,
        error::{workflow::WorkflowError, Error},
        model::db::ResidentModel,
        realtime::ChangeFeed,
        service::retry::RetryContext,
    },
    store::Record,
};

/// Service for the resident registry.
pub struct ResidentService<'a> {
    db: &'a DatabaseConnection,
    feed: &'a ChangeFeed,
}

impl<'a> ResidentService<'a> {
    /// Creates a new instance of [`ResidentService`]
    pub fn new(db: &'a DatabaseConnection, feed: &'a ChangeFeed) -> Self {
        Self { db, feed }
    }

    /// Lists residents, keeping only those matching `search` when provided.
    ///
    /// The search uses the same case-insensitive matching as the client-side resource store.
    pub async fn get_residents(&self, search: Option<&str>) -> Result<Vec<ResidentDto>, Error> {
        let ctx = RetryContext::new();
        let db = self.db.clone();

        let residents = ctx
            .execute_with_retry("get residents", || {
                let db = db.clone();

                Box::pin(async move {
                    let residents = ResidentRepository::new(&db).get_all().await?;

                    residents
                        .into_iter()
                        .map(resident_dto)
                        .collect::<Result<Vec<_>, _>>()
                })
            })
            .await?;

        Ok(match search {
            Some(query) => residents
                .into_iter()
                .filter(|resident| resident.matches(query))
                .collect(),
            None => residents,
        })
    }

    /// Retrieves one resident.
    ///
    /// # Returns
    /// - `Ok(ResidentDto)` - Resident found
    /// - `Err(WorkflowError::NotFound)` - No resident with that ID
    pub async fn get_resident(&self, resident_id: i32) -> Result<ResidentDto, Error> {
        let ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry(&format!("get resident ID {}", resident_id), || {
            let db = db.clone();

            Box::pin(async move {
                match ResidentRepository::new(&db).get_by_id(resident_id).await? {
                    Some(resident) => resident_dto(resident),
                    None => Err(not_found(resident_id)),
                }
            })
        })
        .await
    }

    /// Registers a resident and publishes the insert.
    pub async fn create_resident(&self, resident: CreateResidentDto) -> Result<ResidentDto, Error> {
        resident.validate()?;

        let gender = resident
            .gender
            .ok_or(ValidationError { field: "gender" })?;
        let civil_status = resident.civil_status.ok_or(ValidationError {
            field: "civil_status",
        })?;

        let model = ResidentRepository::new(self.db)
            .create(resident, gender, civil_status)
            .await?;
        let resident = resident_dto(model)?;

        self.feed.publish(ChangeEvent::insert(
            ChangeTable::Residents,
            resident.id,
            &resident,
        )?);
        tracing::info!(resident_id = resident.id, "Registered resident");

        Ok(resident)
    }

    /// Applies a patch to a resident and publishes the update.
    pub async fn update_resident(
        &self,
        resident_id: i32,
        patch: UpdateResidentDto,
    ) -> Result<ResidentDto, Error> {
        patch.validate()?;

        let model = ResidentRepository::new(self.db)
            .update(resident_id, patch)
            .await?
            .ok_or_else(|| not_found(resident_id))?;
        let resident = resident_dto(model)?;

        self.feed.publish(ChangeEvent::update(
            ChangeTable::Residents,
            resident.id,
            &resident,
        )?);
        tracing::info!(resident_id = resident.id, "Updated resident");

        Ok(resident)
    }

    /// Deletes a resident and publishes the delete.
    pub async fn delete_resident(&self, resident_id: i32) -> Result<(), Error> {
        let result = ResidentRepository::new(self.db).delete(resident_id).await?;

        if result.rows_affected == 0 {
            return Err(not_found(resident_id));
        }

        self.feed
            .publish(ChangeEvent::delete(ChangeTable::Residents, resident_id));
        tracing::info!(resident_id = resident_id, "Deleted resident");

        Ok(())
    }
}

fn not_found(resident_id: i32) -> Error {
    WorkflowError::NotFound {
        entity: "resident",
        id: resident_id,
    }
    .into()
}

pub(crate) fn resident_dto(resident: ResidentModel) -> Result<ResidentDto, Error> {
    Ok(ResidentDto {
        id: resident.id,
        first_name: resident.first_name,
        middle_name: resident.middle_name,
        last_name: resident.last_name,
        suffix: resident.suffix,
        email: resident.email,
        phone: resident.phone,
        address: resident.address,
        purok: resident.purok,
        birth_date: resident.birth_date,
        gender: resident.gender.parse()?,
        civil_status: resident.civil_status.parse()?,
        occupation: resident.occupation,
        emergency_contact_name: resident.emergency_contact_name,
        emergency_contact_phone: resident.emergency_contact_phone,
        household_id: resident.household_id,
        philsys_number: resident.philsys_number,
        voter_id: resident.voter_id,
        created_at: resident.created_at,
        updated_at: resident.updated_at,
    })
}

#[cfg(test)]
mod tests {
    use barangay_test_utils::prelude::*;

    use crate::{
        model::resident::{CivilStatus, CreateResidentDto, Gender},
        server::realtime::ChangeFeed,
    };

    async fn setup() -> Result<(TestContext, ChangeFeed), TestError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::Resident)
            .build()
            .await?;

        Ok((test, ChangeFeed::new(16)))
    }

    fn create_dto(first_name: &str, last_name: &str) -> CreateResidentDto {
        CreateResidentDto {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            address: "Purok 2, Barangay San Isidro".to_string(),
            gender: Some(Gender::Male),
            civil_status: Some(CivilStatus::Single),
            ..Default::default()
        }
    }

    mod get_residents {
        use barangay_test_utils::prelude::*;

        use crate::server::service::resident::ResidentService;

        use super::setup;

        /// Expect the search to keep only case-insensitive matches
        #[tokio::test]
        async fn filters_by_search_query() -> Result<(), TestError> {
            let (test, feed) = setup().await?;
            test.resident().insert_resident("Maria", "Santos").await?;
            test.resident().insert_resident("Juan", "Dela Cruz").await?;

            let resident_service = ResidentService::new(&test.db, &feed);
            let residents = resident_service.get_residents(Some("santos")).await.unwrap();

            assert_eq!(residents.len(), 1);
            assert_eq!(residents[0].full_name(), "Maria Santos");

            let everyone = resident_service.get_residents(Some("  ")).await.unwrap();
            assert_eq!(everyone.len(), 2);

            Ok(())
        }
    }

    mod create_resident {
        use barangay_test_utils::prelude::*;

        use crate::{
            model::realtime::{ChangeKind, ChangeTable},
            server::{
                error::Error,
                realtime::FeedMessage,
                service::resident::ResidentService,
            },
        };

        use super::{create_dto, setup};

        /// Expect the created resident to be published as an insert
        #[tokio::test]
        async fn publishes_insert() -> Result<(), TestError> {
            let (test, feed) = setup().await?;
            let mut subscription = feed.subscribe(ChangeTable::Residents);

            let resident_service = ResidentService::new(&test.db, &feed);
            let resident = resident_service
                .create_resident(create_dto("Jose", "Rizal"))
                .await
                .unwrap();

            match subscription.recv().await {
                Some(FeedMessage::Change(event)) => {
                    assert_eq!(event.kind, ChangeKind::Insert);
                    assert_eq!(event.id, resident.id);
                    assert!(event.record.is_some());
                }
                other => panic!("unexpected message: {:?}", other),
            }

            Ok(())
        }

        /// Expect a blank first name to fail validation without writing
        #[tokio::test]
        async fn rejects_blank_required_field() -> Result<(), TestError> {
            let (test, feed) = setup().await?;

            let resident_service = ResidentService::new(&test.db, &feed);
            let result = resident_service
                .create_resident(create_dto("   ", "Rizal"))
                .await;

            assert!(matches!(result, Err(Error::ValidationError(_))));
            assert!(resident_service.get_residents(None).await.unwrap().is_empty());

            Ok(())
        }

        /// Expect a missing gender to fail validation
        #[tokio::test]
        async fn rejects_missing_gender() -> Result<(), TestError> {
            let (test, feed) = setup().await?;

            let mut resident = create_dto("Jose", "Rizal");
            resident.gender = None;

            let resident_service = ResidentService::new(&test.db, &feed);
            let result = resident_service.create_resident(resident).await;

            assert!(matches!(result, Err(Error::ValidationError(_))));

            Ok(())
        }
    }

    mod update_resident {
        use barangay_test_utils::prelude::*;

        use crate::{
            model::resident::UpdateResidentDto,
            server::{
                error::{workflow::WorkflowError, Error},
                service::resident::ResidentService,
            },
        };

        use super::setup;

        /// Expect the patched resident to be returned
        #[tokio::test]
        async fn updates_resident() -> Result<(), TestError> {
            let (test, feed) = setup().await?;
            let resident = test.resident().insert_resident("Maria", "Santos").await?;

            let resident_service = ResidentService::new(&test.db, &feed);
            let updated = resident_service
                .update_resident(
                    resident.id,
                    UpdateResidentDto {
                        purok: Some("Purok 7".to_string()),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();

            assert_eq!(updated.purok.as_deref(), Some("Purok 7"));

            Ok(())
        }

        /// Expect NotFound for a resident that does not exist
        #[tokio::test]
        async fn fails_for_nonexistent_resident() -> Result<(), TestError> {
            let (test, feed) = setup().await?;

            let resident_service = ResidentService::new(&test.db, &feed);
            let result = resident_service
                .update_resident(1, UpdateResidentDto::default())
                .await;

            assert!(matches!(
                result,
                Err(Error::WorkflowError(WorkflowError::NotFound { .. }))
            ));

            Ok(())
        }
    }

    mod delete_resident {
        use barangay_test_utils::prelude::*;

        use crate::{
            model::realtime::{ChangeKind, ChangeTable},
            server::{
                error::{workflow::WorkflowError, Error},
                realtime::FeedMessage,
                service::resident::ResidentService,
            },
        };

        use super::setup;

        /// Expect the delete to be published without a record
        #[tokio::test]
        async fn publishes_delete() -> Result<(), TestError> {
            let (test, feed) = setup().await?;
            let resident = test.resident().insert_resident("Maria", "Santos").await?;
            let mut subscription = feed.subscribe(ChangeTable::Residents);

            let resident_service = ResidentService::new(&test.db, &feed);
            resident_service.delete_resident(resident.id).await.unwrap();

            match subscription.recv().await {
                Some(FeedMessage::Change(event)) => {
                    assert_eq!(event.kind, ChangeKind::Delete);
                    assert_eq!(event.id, resident.id);
                    assert!(event.record.is_none());
                }
                other => panic!("unexpected message: {:?}", other),
            }

            Ok(())
        }

        /// Expect NotFound when deleting twice
        #[tokio::test]
        async fn fails_for_deleted_resident() -> Result<(), TestError> {
            let (test, feed) = setup().await?;
            let resident = test.resident().insert_resident("Maria", "Santos").await?;

            let resident_service = ResidentService::new(&test.db, &feed);
            resident_service.delete_resident(resident.id).await.unwrap();
            let result = resident_service.delete_resident(resident.id).await;

            assert!(matches!(
                result,
                Err(Error::WorkflowError(WorkflowError::NotFound { .. }))
            ));

            Ok(())
        }
    }

    mod resource_store {
        use barangay_test_utils::prelude::*;

        use crate::{
            model::{
                realtime::ChangeTable,
                resident::{ResidentDto, UpdateResidentDto},
            },
            server::service::resident::ResidentService,
            store::{ApplyOutcome, ResourceStore},
        };

        use super::{create_dto, setup};

        /// Expect a store fed from the change subscription to match a fresh reload
        #[tokio::test]
        async fn subscription_keeps_store_equal_to_reload() -> Result<(), TestError> {
            let (test, feed) = setup().await?;
            let maria = test.resident().insert_resident("Maria", "Santos").await?;
            let juan = test.resident().insert_resident("Juan", "Dela Cruz").await?;
            let mut subscription = feed.subscribe(ChangeTable::Residents);

            let resident_service = ResidentService::new(&test.db, &feed);
            let mut store = ResourceStore::<ResidentDto>::new();
            let ticket = store.begin_load();
            store.finish_load(ticket, Ok(resident_service.get_residents(None).await.unwrap()));

            resident_service
                .create_resident(create_dto("Jose", "Rizal"))
                .await
                .unwrap();
            resident_service
                .update_resident(
                    maria.id,
                    UpdateResidentDto {
                        occupation: Some("Midwife".to_string()),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();
            resident_service.delete_resident(juan.id).await.unwrap();

            for _ in 0..3 {
                let message = subscription.recv().await.unwrap();
                assert_eq!(store.receive(&message), ApplyOutcome::Applied);
            }

            let mut reloaded = resident_service.get_residents(None).await.unwrap();
            let mut patched = store.rows().to_vec();
            reloaded.sort_by_key(|resident| resident.id);
            patched.sort_by_key(|resident| resident.id);

            assert_eq!(patched, reloaded);
            assert_eq!(
                store.get(maria.id).and_then(|r| r.occupation.as_deref()),
                Some("Midwife")
            );

            Ok(())
        }
    }
}
