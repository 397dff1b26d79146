use sea_orm::DatabaseConnection;

use crate::{
    data::{UserFilter, UserRepository},
    error::Error,
    mapper::registry::MapperRegistry,
    model::{User, UserCreateDto, UserUpdateDto},
};

/// Account management. Password hashing is the web layer's concern; this
/// service receives the finished hash.
pub struct UserService<'a> {
    db: &'a DatabaseConnection,
    registry: &'a MapperRegistry,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection, registry: &'a MapperRegistry) -> Self {
        Self { db, registry }
    }

    pub async fn register(
        &self,
        dto: &UserCreateDto,
        hashed_password: String,
    ) -> Result<User, Error> {
        let repo = UserRepository::new(self.db, self.registry)?;
        let user = repo.create(dto, hashed_password).await?;

        tracing::debug!(user_id = user.id, "registered user");

        Ok(user)
    }

    pub async fn get_by_id(&self, user_id: i32) -> Result<User, Error> {
        let repo = UserRepository::new(self.db, self.registry)?;

        repo.retrieve(&UserFilter::by_id(user_id), false).await
    }

    pub async fn get_users(&self, limit: u64, offset: u64) -> Result<Vec<User>, Error> {
        let repo = UserRepository::new(self.db, self.registry)?;

        repo.retrieve_many(limit, offset, false, &UserFilter::default())
            .await
    }

    /// Updates the acting user's own profile.
    pub async fn update_profile(&self, actor: &User, dto: &UserUpdateDto) -> Result<User, Error> {
        let repo = UserRepository::new(self.db, self.registry)?;
        let user = repo.update(actor.id, dto).await?;

        tracing::debug!(user_id = user.id, "updated profile");

        Ok(user)
    }

    /// Deletes the acting user's own account and returns its last known
    /// field values.
    pub async fn delete_account(&self, actor: &User) -> Result<User, Error> {
        let repo = UserRepository::new(self.db, self.registry)?;
        let user = repo.delete(actor.id).await?;

        tracing::debug!(user_id = user.id, "deleted account");

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::DatabaseConnection;

    use crate::startup;

    use super::*;

    async fn setup() -> (DatabaseConnection, MapperRegistry) {
        let db = jobboard_test_utils::setup::test_db().await;
        let registry = startup::build_mapper_registry();

        (db, registry)
    }

    fn create_dto() -> UserCreateDto {
        UserCreateDto {
            name: "Worker".to_string(),
            email: "worker@example.com".to_string(),
            is_company: false,
        }
    }

    #[tokio::test]
    async fn register_and_get_round_trip() {
        let (db, registry) = setup().await;
        let service = UserService::new(&db, &registry);

        let registered = service
            .register(&create_dto(), "hash".to_string())
            .await
            .unwrap();

        let fetched = service.get_by_id(registered.id).await.unwrap();

        assert_eq!(fetched.id, registered.id);
        assert_eq!(fetched.email, "worker@example.com");
        assert!(!fetched.is_company);
    }

    #[tokio::test]
    async fn update_profile_is_partial() {
        let (db, registry) = setup().await;
        let service = UserService::new(&db, &registry);

        let registered = service
            .register(&create_dto(), "hash".to_string())
            .await
            .unwrap();

        let updated = service
            .update_profile(
                &registered,
                &UserUpdateDto {
                    name: Some("Worker Bee".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Worker Bee");
        assert_eq!(updated.email, registered.email);
    }

    #[tokio::test]
    async fn delete_account_removes_user() {
        let (db, registry) = setup().await;
        let service = UserService::new(&db, &registry);

        let registered = service
            .register(&create_dto(), "hash".to_string())
            .await
            .unwrap();

        let deleted = service.delete_account(&registered).await.unwrap();
        assert_eq!(deleted.id, registered.id);

        let result = service.get_by_id(registered.id).await;
        assert!(matches!(result, Err(Error::EntityNotFound(_))));
    }

    #[tokio::test]
    async fn get_users_pages() {
        let (db, registry) = setup().await;
        let service = UserService::new(&db, &registry);

        for i in 0..3 {
            jobboard_test_utils::factory::create_user(&db, &format!("u{i}@example.com"), false)
                .await;
        }

        let first_page = service.get_users(2, 0).await.unwrap();
        let second_page = service.get_users(2, 2).await.unwrap();

        assert_eq!(first_page.len(), 2);
        assert_eq!(second_page.len(), 1);
    }
}
