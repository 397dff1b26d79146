use sea_orm::DatabaseConnection;

use crate::{
    data::{JobFilter, JobRepository},
    error::Error,
    mapper::registry::MapperRegistry,
    model::{Job, JobCreateDto, JobUpdateDto, User},
};

/// Job postings: listing is public, mutation is restricted to company
/// accounts and the posting's owner.
pub struct JobService<'a> {
    db: &'a DatabaseConnection,
    registry: &'a MapperRegistry,
}

impl<'a> JobService<'a> {
    pub fn new(db: &'a DatabaseConnection, registry: &'a MapperRegistry) -> Self {
        Self { db, registry }
    }

    pub async fn get_all_jobs(&self, limit: u64, offset: u64) -> Result<Vec<Job>, Error> {
        let repo = JobRepository::new(self.db, self.registry)?;

        repo.retrieve_many(limit, offset, false, &JobFilter::default())
            .await
    }

    pub async fn get_by_id(&self, job_id: i32) -> Result<Job, Error> {
        let repo = JobRepository::new(self.db, self.registry)?;

        repo.retrieve(&JobFilter::by_id(job_id), false).await
    }

    /// Posts a new job owned by the acting user. Company accounts only.
    pub async fn create(&self, actor: &User, dto: &JobCreateDto) -> Result<Job, Error> {
        if !actor.is_company {
            return Err(Error::PermissionDenied(
                "Only company accounts can post jobs".to_string(),
            ));
        }

        if dto.salary_from > dto.salary_to {
            return Err(Error::InvalidSalaryRange {
                salary_from: dto.salary_from,
                salary_to: dto.salary_to,
            });
        }

        let repo = JobRepository::new(self.db, self.registry)?;
        let job = repo.create(dto, actor.id).await?;

        tracing::debug!(job_id = job.id, user_id = actor.id, "created job");

        Ok(job)
    }

    /// Edits a job. Owner only; the salary range that would result from
    /// merging the DTO with the stored values must be valid.
    pub async fn update(
        &self,
        actor: &User,
        job_id: i32,
        dto: &JobUpdateDto,
    ) -> Result<Job, Error> {
        let repo = JobRepository::new(self.db, self.registry)?;
        let existing = repo.retrieve(&JobFilter::by_id(job_id), false).await?;

        if existing.user_id != actor.id {
            return Err(Error::PermissionDenied(
                "Only the job owner can edit a job".to_string(),
            ));
        }

        let salary_from = dto.salary_from.unwrap_or(existing.salary_from);
        let salary_to = dto.salary_to.unwrap_or(existing.salary_to);
        if salary_from > salary_to {
            return Err(Error::InvalidSalaryRange {
                salary_from,
                salary_to,
            });
        }

        let job = repo.update(existing.id, dto).await?;

        tracing::debug!(job_id = job.id, user_id = actor.id, "updated job");

        Ok(job)
    }

    /// Removes a job. Owner only.
    pub async fn delete(&self, actor: &User, job_id: i32) -> Result<Job, Error> {
        let repo = JobRepository::new(self.db, self.registry)?;
        let existing = repo.retrieve(&JobFilter::by_id(job_id), false).await?;

        if existing.user_id != actor.id {
            return Err(Error::PermissionDenied(
                "Only the job owner can delete a job".to_string(),
            ));
        }

        let job = repo.delete(existing.id).await?;

        tracing::debug!(job_id = job.id, user_id = actor.id, "deleted job");

        Ok(job)
    }
}
