use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbBackend, Schema};

/// Opens an in-memory SQLite database with the full jobboard schema.
///
/// Tables are created from the entity definitions; the composite unique
/// index on `responses` lives in the migration crate and is recreated here
/// by hand since SQLite cannot add constraints to an existing table.
pub async fn test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    let schema = Schema::new(DbBackend::Sqlite);

    let stmts = vec![
        schema.create_table_from_entity(entity::prelude::User),
        schema.create_table_from_entity(entity::prelude::Job),
        schema.create_table_from_entity(entity::prelude::Response),
    ];

    for stmt in stmts {
        db.execute(&stmt).await.expect("Failed to create table");
    }

    db.execute_unprepared(
        "CREATE UNIQUE INDEX uq_responses_user_id_job_id ON responses (user_id, job_id)",
    )
    .await
    .expect("Failed to create unique index on responses");

    db
}
