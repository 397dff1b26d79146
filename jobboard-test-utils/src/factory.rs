use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection};

/// Inserts a user row. Emails are unique; pass a distinct one per user.
pub async fn create_user(
    db: &DatabaseConnection,
    email: &str,
    is_company: bool,
) -> entity::user::Model {
    let user = entity::user::ActiveModel {
        name: ActiveValue::Set("Test User".to_string()),
        email: ActiveValue::Set(email.to_string()),
        hashed_password: ActiveValue::Set("$argon2id$test-hash".to_string()),
        is_company: ActiveValue::Set(is_company),
        ..Default::default()
    };

    user.insert(db).await.expect("Failed to insert user")
}

/// Inserts an active job owned by `user_id` with a 100k-150k salary range.
pub async fn create_job(db: &DatabaseConnection, user_id: i32, title: &str) -> entity::job::Model {
    let job = entity::job::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        title: ActiveValue::Set(title.to_string()),
        description: ActiveValue::Set("Builds and maintains backend services".to_string()),
        salary_from: ActiveValue::Set(Decimal::new(100_000, 0)),
        salary_to: ActiveValue::Set(Decimal::new(150_000, 0)),
        is_active: ActiveValue::Set(true),
        created_at: ActiveValue::Set(Utc::now().naive_utc()),
        ..Default::default()
    };

    job.insert(db).await.expect("Failed to insert job")
}

/// Inserts a response from `user_id` to `job_id`.
pub async fn create_response(
    db: &DatabaseConnection,
    user_id: i32,
    job_id: i32,
    message: Option<&str>,
) -> entity::response::Model {
    let response = entity::response::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        job_id: ActiveValue::Set(job_id),
        message: ActiveValue::Set(message.map(str::to_string)),
        ..Default::default()
    };

    response.insert(db).await.expect("Failed to insert response")
}
