pub use sea_orm_migration::prelude::*;

pub use m20251101_000004_appointments::APPOINTMENT_SLOT_INDEX_SQL;

mod m20251101_000001_users;
mod m20251101_000002_residents;
mod m20251101_000003_security_incidents;
mod m20251101_000004_appointments;
mod m20251101_000005_documents;
mod m20251101_000006_notifications;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251101_000001_users::Migration),
            Box::new(m20251101_000002_residents::Migration),
            Box::new(m20251101_000003_security_incidents::Migration),
            Box::new(m20251101_000004_appointments::Migration),
            Box::new(m20251101_000005_documents::Migration),
            Box::new(m20251101_000006_notifications::Migration),
        ]
    }
}
