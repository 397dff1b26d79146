use sea_orm::DatabaseConnection;

use crate::{
    config::Config,
    error::Error,
    mapper::{registry::MapperRegistry, wiring::register_job_board_mappers},
};

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Build the registry holding the mappers the repositories resolve at
/// construction time. Called once at startup; the result is shared.
pub fn build_mapper_registry() -> MapperRegistry {
    let mut registry = MapperRegistry::new();

    register_job_board_mappers(&mut registry);

    registry
}
