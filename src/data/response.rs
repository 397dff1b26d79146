use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection,
    DatabaseTransaction, EntityTrait, LoaderTrait, ModelTrait, QueryFilter, QuerySelect,
    TransactionTrait,
};

use crate::{
    data::record::{JobRecord, ResponseRecord, UserRecord},
    error::Error,
    mapper::{registry::MapperRegistry, DynamicMapper, Loaded},
    model::{Response, ResponseCreateDto, ResponseUpdateDto},
};

/// Exact-match filter for response queries; unset fields do not constrain.
#[derive(Clone, Debug, Default)]
pub struct ResponseFilter {
    pub id: Option<i32>,
    pub user_id: Option<i32>,
    pub job_id: Option<i32>,
}

impl ResponseFilter {
    pub fn by_id(id: i32) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    pub fn by_job(job_id: i32) -> Self {
        Self {
            job_id: Some(job_id),
            ..Default::default()
        }
    }

    pub fn by_user_and_job(user_id: i32, job_id: i32) -> Self {
        Self {
            id: None,
            user_id: Some(user_id),
            job_id: Some(job_id),
        }
    }

    fn condition(&self) -> Condition {
        let mut condition = Condition::all();

        if let Some(id) = self.id {
            condition = condition.add(entity::response::Column::Id.eq(id));
        }
        if let Some(user_id) = self.user_id {
            condition = condition.add(entity::response::Column::UserId.eq(user_id));
        }
        if let Some(job_id) = self.job_id {
            condition = condition.add(entity::response::Column::JobId.eq(job_id));
        }

        condition
    }
}

pub struct ResponseRepository<'a> {
    db: &'a DatabaseConnection,
    mapper: Arc<DynamicMapper<ResponseRecord, Response>>,
}

impl<'a> ResponseRepository<'a> {
    /// Creates a new instance of [`ResponseRepository`]. The registry must
    /// already hold the response mapper.
    pub fn new(db: &'a DatabaseConnection, registry: &MapperRegistry) -> Result<Self, Error> {
        let mapper = registry
            .get_mapper::<ResponseRecord, Response>()
            .ok_or(Error::MapperNotRegistered("response"))?;

        Ok(Self { db, mapper })
    }

    /// Creates a response from `user_id` to `job_id`.
    ///
    /// The `(user_id, job_id)` unique index rejects a duplicate; the
    /// violation surfaces as a plain database error here and is
    /// translated to a domain error by the service layer.
    pub async fn create(
        &self,
        dto: &ResponseCreateDto,
        job_id: i32,
        user_id: i32,
    ) -> Result<Response, Error> {
        let txn = self.db.begin().await?;

        let response = entity::response::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            job_id: ActiveValue::Set(job_id),
            message: ActiveValue::Set(dto.message.clone()),
            ..Default::default()
        };

        let row = response.insert(&txn).await?;

        txn.commit().await?;

        self.map_record(&ResponseRecord::flat(row), false)
    }

    /// Retrieves the first response matching the filter.
    pub async fn retrieve(
        &self,
        filter: &ResponseFilter,
        include_relations: bool,
    ) -> Result<Response, Error> {
        let txn = self.db.begin().await?;

        let row = entity::prelude::Response::find()
            .filter(filter.condition())
            .one(&txn)
            .await?
            .ok_or_else(|| Error::EntityNotFound("Response not found".to_string()))?;

        let record = if include_relations {
            Self::load_relations(&txn, vec![row])
                .await?
                .pop()
                .ok_or_else(|| {
                    Error::InternalError("Eager load dropped a fetched row".to_string())
                })?
        } else {
            ResponseRecord::flat(row)
        };

        txn.commit().await?;

        self.map_record(&record, include_relations)
    }

    /// Retrieves matching responses in the storage engine's natural order.
    pub async fn retrieve_many(
        &self,
        limit: u64,
        offset: u64,
        include_relations: bool,
        filter: &ResponseFilter,
    ) -> Result<Vec<Response>, Error> {
        let txn = self.db.begin().await?;

        let rows = entity::prelude::Response::find()
            .filter(filter.condition())
            .limit(limit)
            .offset(offset)
            .all(&txn)
            .await?;

        let records = if include_relations {
            Self::load_relations(&txn, rows).await?
        } else {
            rows.into_iter().map(ResponseRecord::flat).collect()
        };

        txn.commit().await?;

        records
            .iter()
            .map(|record| self.map_record(record, include_relations))
            .collect()
    }

    /// Applies the provided fields of the DTO; an absent message leaves
    /// the stored one unchanged.
    pub async fn update(&self, id: i32, dto: &ResponseUpdateDto) -> Result<Response, Error> {
        let txn = self.db.begin().await?;

        let row = entity::prelude::Response::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| Error::EntityNotFound("Response not found".to_string()))?;

        let mut response: entity::response::ActiveModel = row.clone().into();
        let mut changed = false;

        if let Some(message) = &dto.message {
            response.message = ActiveValue::Set(Some(message.clone()));
            changed = true;
        }

        let row = if changed {
            response.update(&txn).await?
        } else {
            row
        };

        txn.commit().await?;

        self.map_record(&ResponseRecord::flat(row), false)
    }

    /// Deletes the response and returns a tombstone entity mapped from
    /// the row's last known field values.
    pub async fn delete(&self, id: i32) -> Result<Response, Error> {
        let txn = self.db.begin().await?;

        let row = entity::prelude::Response::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| Error::EntityNotFound("Response not found".to_string()))?;

        row.clone().delete(&txn).await?;

        txn.commit().await?;

        self.map_record(&ResponseRecord::flat(row), false)
    }

    async fn load_relations(
        txn: &DatabaseTransaction,
        rows: Vec<entity::response::Model>,
    ) -> Result<Vec<ResponseRecord>, Error> {
        let users = rows.load_one(entity::prelude::User, txn).await?;
        let jobs = rows.load_one(entity::prelude::Job, txn).await?;

        Ok(rows
            .into_iter()
            .zip(users)
            .zip(jobs)
            .map(|((row, user), job)| ResponseRecord {
                row,
                user: Loaded::fetched(user.map(|user| Box::new(UserRecord::flat(user)))),
                job: Loaded::fetched(job.map(|job| Box::new(JobRecord::flat(job)))),
            })
            .collect())
    }

    fn map_record(
        &self,
        record: &ResponseRecord,
        include_relations: bool,
    ) -> Result<Response, Error> {
        self.mapper
            .map(Some(record), include_relations)
            .ok_or_else(|| {
                Error::InternalError("Mapper returned no entity for a present record".to_string())
            })
    }
}
