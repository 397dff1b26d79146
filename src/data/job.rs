use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection,
    DatabaseTransaction, EntityTrait, LoaderTrait, ModelTrait, QueryFilter, QuerySelect,
    TransactionTrait,
};

use crate::{
    data::record::{JobRecord, ResponseRecord, UserRecord},
    error::Error,
    mapper::{registry::MapperRegistry, DynamicMapper, Loaded},
    model::{Job, JobCreateDto, JobUpdateDto},
};

/// Exact-match filter for job queries; unset fields do not constrain.
#[derive(Clone, Debug, Default)]
pub struct JobFilter {
    pub id: Option<i32>,
    pub user_id: Option<i32>,
    pub is_active: Option<bool>,
}

impl JobFilter {
    pub fn by_id(id: i32) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    pub fn by_user(user_id: i32) -> Self {
        Self {
            user_id: Some(user_id),
            ..Default::default()
        }
    }

    fn condition(&self) -> Condition {
        let mut condition = Condition::all();

        if let Some(id) = self.id {
            condition = condition.add(entity::job::Column::Id.eq(id));
        }
        if let Some(user_id) = self.user_id {
            condition = condition.add(entity::job::Column::UserId.eq(user_id));
        }
        if let Some(is_active) = self.is_active {
            condition = condition.add(entity::job::Column::IsActive.eq(is_active));
        }

        condition
    }
}

pub struct JobRepository<'a> {
    db: &'a DatabaseConnection,
    mapper: Arc<DynamicMapper<JobRecord, Job>>,
}

impl<'a> JobRepository<'a> {
    /// Creates a new instance of [`JobRepository`]. The registry must
    /// already hold the job mapper.
    pub fn new(db: &'a DatabaseConnection, registry: &MapperRegistry) -> Result<Self, Error> {
        let mapper = registry
            .get_mapper::<JobRecord, Job>()
            .ok_or(Error::MapperNotRegistered("job"))?;

        Ok(Self { db, mapper })
    }

    /// Creates a new job owned by `user_id`. `is_active` defaults to true
    /// when the DTO leaves it unset; `created_at` is set here and is
    /// immutable afterwards.
    ///
    /// The salary range is stored as given; validating it is the service
    /// layer's job.
    pub async fn create(&self, dto: &JobCreateDto, user_id: i32) -> Result<Job, Error> {
        let txn = self.db.begin().await?;

        let job = entity::job::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            title: ActiveValue::Set(dto.title.clone()),
            description: ActiveValue::Set(dto.description.clone()),
            salary_from: ActiveValue::Set(dto.salary_from),
            salary_to: ActiveValue::Set(dto.salary_to),
            is_active: ActiveValue::Set(dto.is_active.unwrap_or(true)),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        let row = job.insert(&txn).await?;

        txn.commit().await?;

        self.map_record(&JobRecord::flat(row), false)
    }

    /// Retrieves the first job matching the filter.
    pub async fn retrieve(
        &self,
        filter: &JobFilter,
        include_relations: bool,
    ) -> Result<Job, Error> {
        let txn = self.db.begin().await?;

        let row = entity::prelude::Job::find()
            .filter(filter.condition())
            .one(&txn)
            .await?
            .ok_or_else(|| Error::EntityNotFound("Job not found".to_string()))?;

        let record = if include_relations {
            Self::load_relations(&txn, vec![row])
                .await?
                .pop()
                .ok_or_else(|| {
                    Error::InternalError("Eager load dropped a fetched row".to_string())
                })?
        } else {
            JobRecord::flat(row)
        };

        txn.commit().await?;

        self.map_record(&record, include_relations)
    }

    /// Retrieves matching jobs in the storage engine's natural order.
    pub async fn retrieve_many(
        &self,
        limit: u64,
        offset: u64,
        include_relations: bool,
        filter: &JobFilter,
    ) -> Result<Vec<Job>, Error> {
        let txn = self.db.begin().await?;

        let rows = entity::prelude::Job::find()
            .filter(filter.condition())
            .limit(limit)
            .offset(offset)
            .all(&txn)
            .await?;

        let records = if include_relations {
            Self::load_relations(&txn, rows).await?
        } else {
            rows.into_iter().map(JobRecord::flat).collect()
        };

        txn.commit().await?;

        records
            .iter()
            .map(|record| self.map_record(record, include_relations))
            .collect()
    }

    /// Applies the provided fields of the DTO; absent fields leave the
    /// stored values unchanged. The repository accepts any salary values,
    /// including an inverted range (layering boundary: range validation
    /// belongs to the service).
    pub async fn update(&self, id: i32, dto: &JobUpdateDto) -> Result<Job, Error> {
        let txn = self.db.begin().await?;

        let row = entity::prelude::Job::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| Error::EntityNotFound("Job not found".to_string()))?;

        let mut job: entity::job::ActiveModel = row.clone().into();
        let mut changed = false;

        if let Some(title) = &dto.title {
            job.title = ActiveValue::Set(title.clone());
            changed = true;
        }
        if let Some(description) = &dto.description {
            job.description = ActiveValue::Set(description.clone());
            changed = true;
        }
        if let Some(salary_from) = dto.salary_from {
            job.salary_from = ActiveValue::Set(salary_from);
            changed = true;
        }
        if let Some(salary_to) = dto.salary_to {
            job.salary_to = ActiveValue::Set(salary_to);
            changed = true;
        }
        if let Some(is_active) = dto.is_active {
            job.is_active = ActiveValue::Set(is_active);
            changed = true;
        }

        let row = if changed { job.update(&txn).await? } else { row };

        txn.commit().await?;

        self.map_record(&JobRecord::flat(row), false)
    }

    /// Deletes the job and returns a tombstone entity mapped from the
    /// row's last known field values.
    pub async fn delete(&self, id: i32) -> Result<Job, Error> {
        let txn = self.db.begin().await?;

        let row = entity::prelude::Job::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| Error::EntityNotFound("Job not found".to_string()))?;

        row.clone().delete(&txn).await?;

        txn.commit().await?;

        self.map_record(&JobRecord::flat(row), false)
    }

    async fn load_relations(
        txn: &DatabaseTransaction,
        rows: Vec<entity::job::Model>,
    ) -> Result<Vec<JobRecord>, Error> {
        let users = rows.load_one(entity::prelude::User, txn).await?;
        let responses = rows.load_many(entity::prelude::Response, txn).await?;

        Ok(rows
            .into_iter()
            .zip(users)
            .zip(responses)
            .map(|((row, user), responses)| JobRecord {
                row,
                user: Loaded::fetched(user.map(|user| Box::new(UserRecord::flat(user)))),
                responses: Loaded::Present(
                    responses.into_iter().map(ResponseRecord::flat).collect(),
                ),
            })
            .collect())
    }

    fn map_record(&self, record: &JobRecord, include_relations: bool) -> Result<Job, Error> {
        self.mapper
            .map(Some(record), include_relations)
            .ok_or_else(|| {
                Error::InternalError("Mapper returned no entity for a present record".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use sea_orm::DatabaseConnection;

    use crate::startup;

    use super::*;

    async fn setup() -> (DatabaseConnection, entity::user::Model, MapperRegistry) {
        let db = jobboard_test_utils::setup::test_db().await;
        let registry = startup::build_mapper_registry();
        let company = jobboard_test_utils::factory::create_user(&db, "acme@example.com", true).await;

        (db, company, registry)
    }

    fn create_dto() -> JobCreateDto {
        JobCreateDto {
            title: "Backend Engineer".to_string(),
            description: "Builds backend services".to_string(),
            salary_from: Decimal::new(100_000, 0),
            salary_to: Decimal::new(150_000, 0),
            is_active: None,
        }
    }

    /// Create then retrieve returns the DTO's fields; `is_active`
    /// defaults to true when the DTO leaves it unset.
    #[tokio::test]
    async fn create_and_retrieve_round_trip() {
        let (db, company, registry) = setup().await;
        let repo = JobRepository::new(&db, &registry).unwrap();

        let created = repo.create(&create_dto(), company.id).await.unwrap();
        assert!(created.is_active);
        assert_eq!(created.user_id, company.id);

        let retrieved = repo.retrieve(&JobFilter::by_id(created.id), false).await.unwrap();

        assert_eq!(retrieved.id, created.id);
        assert_eq!(retrieved.title, "Backend Engineer");
        assert_eq!(retrieved.salary_from, Decimal::new(100_000, 0));
        assert_eq!(retrieved.salary_to, Decimal::new(150_000, 0));
        assert_eq!(retrieved.created_at, created.created_at);
    }

    /// Eager-loaded relations stop at depth one: the job's owner is
    /// populated, the owner's own jobs are not.
    #[tokio::test]
    async fn retrieve_with_relations_populates_owner() {
        let (db, company, registry) = setup().await;
        let repo = JobRepository::new(&db, &registry).unwrap();

        let created = repo.create(&create_dto(), company.id).await.unwrap();

        let applicant =
            jobboard_test_utils::factory::create_user(&db, "worker@example.com", false).await;
        jobboard_test_utils::factory::create_response(&db, applicant.id, created.id, Some("hi"))
            .await;

        let job = repo.retrieve(&JobFilter::by_id(created.id), true).await.unwrap();

        let owner = job.user.expect("owner should be populated");
        assert_eq!(owner.id, company.id);
        assert!(owner.jobs.is_empty());

        assert_eq!(job.responses.len(), 1);
        assert!(job.responses[0].job.is_none());
    }

    #[tokio::test]
    async fn retrieve_many_filters_by_owner() {
        let (db, company, registry) = setup().await;
        let repo = JobRepository::new(&db, &registry).unwrap();

        let other = jobboard_test_utils::factory::create_user(&db, "other@example.com", true).await;
        repo.create(&create_dto(), company.id).await.unwrap();
        repo.create(&create_dto(), other.id).await.unwrap();

        let jobs = repo
            .retrieve_many(100, 0, false, &JobFilter::by_user(company.id))
            .await
            .unwrap();

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].user_id, company.id);
    }

    /// A one-field DTO changes exactly that field.
    #[tokio::test]
    async fn update_is_partial() {
        let (db, company, registry) = setup().await;
        let repo = JobRepository::new(&db, &registry).unwrap();

        let created = repo.create(&create_dto(), company.id).await.unwrap();

        let updated = repo
            .update(
                created.id,
                &JobUpdateDto {
                    salary_from: Some(Decimal::new(120_000, 0)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.salary_from, Decimal::new(120_000, 0));
        assert_eq!(updated.salary_to, created.salary_to);
        assert_eq!(updated.title, created.title);
        assert_eq!(updated.is_active, created.is_active);
    }

    /// The repository stores an inverted salary range without complaint;
    /// range validation is the service layer's concern.
    #[tokio::test]
    async fn update_accepts_inverted_salary_range() {
        let (db, company, registry) = setup().await;
        let repo = JobRepository::new(&db, &registry).unwrap();

        let created = repo.create(&create_dto(), company.id).await.unwrap();

        let updated = repo
            .update(
                created.id,
                &JobUpdateDto {
                    salary_from: Some(Decimal::new(200_000, 0)),
                    salary_to: Some(Decimal::new(150_000, 0)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.salary_from, Decimal::new(200_000, 0));
        assert_eq!(updated.salary_to, Decimal::new(150_000, 0));
    }

    #[tokio::test]
    async fn delete_returns_tombstone() {
        let (db, company, registry) = setup().await;
        let repo = JobRepository::new(&db, &registry).unwrap();

        let created = repo.create(&create_dto(), company.id).await.unwrap();

        let tombstone = repo.delete(created.id).await.unwrap();
        assert_eq!(tombstone.id, created.id);
        assert_eq!(tombstone.title, created.title);

        let result = repo.retrieve(&JobFilter::by_id(created.id), false).await;
        assert!(matches!(result, Err(Error::EntityNotFound(_))));
    }
}
