pub use sea_orm_migration::prelude::*;

mod m20260829_000001_users;
mod m20260829_000002_jobs;
mod m20260829_000003_responses;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260829_000001_users::Migration),
            Box::new(m20260829_000002_jobs::Migration),
            Box::new(m20260829_000003_responses::Migration),
        ]
    }
}
