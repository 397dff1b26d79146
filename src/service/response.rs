use sea_orm::{DatabaseConnection, SqlErr};

use crate::{
    data::{JobFilter, JobRepository, ResponseFilter, ResponseRepository},
    error::Error,
    mapper::registry::MapperRegistry,
    model::{Response, ResponseCreateDto, User},
};

/// Job applications: applicants respond to active jobs, companies read
/// the responses to their own postings.
pub struct ResponseService<'a> {
    db: &'a DatabaseConnection,
    registry: &'a MapperRegistry,
}

impl<'a> ResponseService<'a> {
    pub fn new(db: &'a DatabaseConnection, registry: &'a MapperRegistry) -> Self {
        Self { db, registry }
    }

    /// Lists responses whose target job is still active, with relations
    /// populated. Applicant accounts only.
    pub async fn get_all_active_responses(
        &self,
        actor: &User,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Response>, Error> {
        if actor.is_company {
            return Err(Error::PermissionDenied(
                "Only applicant accounts can browse responses".to_string(),
            ));
        }

        let repo = ResponseRepository::new(self.db, self.registry)?;
        let responses = repo
            .retrieve_many(limit, offset, true, &ResponseFilter::default())
            .await?;

        Ok(responses
            .into_iter()
            .filter(|response| response.job.as_ref().is_some_and(|job| job.is_active))
            .collect())
    }

    /// Lists the responses to one job. Company accounts only; the job
    /// must exist.
    pub async fn get_by_job_id(
        &self,
        actor: &User,
        job_id: i32,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Response>, Error> {
        if !actor.is_company {
            return Err(Error::PermissionDenied(
                "Only company accounts can view responses to a job".to_string(),
            ));
        }

        let job_repo = JobRepository::new(self.db, self.registry)?;
        let job = job_repo.retrieve(&JobFilter::by_id(job_id), false).await?;

        let repo = ResponseRepository::new(self.db, self.registry)?;
        repo.retrieve_many(limit, offset, true, &ResponseFilter::by_job(job.id))
            .await
    }

    /// Responds to a job on behalf of the acting user. Applicants only,
    /// the job must be active, and one response per user per job.
    pub async fn create(
        &self,
        actor: &User,
        job_id: i32,
        dto: &ResponseCreateDto,
    ) -> Result<Response, Error> {
        if actor.is_company {
            return Err(Error::PermissionDenied(
                "Company accounts cannot respond to jobs".to_string(),
            ));
        }

        let job_repo = JobRepository::new(self.db, self.registry)?;
        let job = job_repo.retrieve(&JobFilter::by_id(job_id), false).await?;

        if !job.is_active {
            return Err(Error::InactiveJob);
        }

        let repo = ResponseRepository::new(self.db, self.registry)?;

        // Advisory pre-check for a friendly error; the unique index on
        // (user_id, job_id) is what actually guarantees it.
        let existing = repo
            .retrieve_many(1, 0, false, &ResponseFilter::by_user_and_job(actor.id, job.id))
            .await?;
        if !existing.is_empty() {
            return Err(Error::DuplicateResponse);
        }

        let response = match repo.create(dto, job.id, actor.id).await {
            Ok(response) => response,
            Err(Error::DbErr(err))
                if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) =>
            {
                return Err(Error::DuplicateResponse);
            }
            Err(err) => return Err(err),
        };

        tracing::debug!(
            response_id = response.id,
            job_id = job.id,
            user_id = actor.id,
            "created response"
        );

        Ok(response)
    }
}
