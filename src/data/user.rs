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
    model::{User, UserCreateDto, UserUpdateDto},
};

/// Exact-match filter for user queries; unset fields do not constrain.
#[derive(Clone, Debug, Default)]
pub struct UserFilter {
    pub id: Option<i32>,
    pub email: Option<String>,
    pub is_company: Option<bool>,
}

impl UserFilter {
    pub fn by_id(id: i32) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    pub fn by_email(email: &str) -> Self {
        Self {
            email: Some(email.to_string()),
            ..Default::default()
        }
    }

    fn condition(&self) -> Condition {
        let mut condition = Condition::all();

        if let Some(id) = self.id {
            condition = condition.add(entity::user::Column::Id.eq(id));
        }
        if let Some(email) = &self.email {
            condition = condition.add(entity::user::Column::Email.eq(email.clone()));
        }
        if let Some(is_company) = self.is_company {
            condition = condition.add(entity::user::Column::IsCompany.eq(is_company));
        }

        condition
    }
}

pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
    mapper: Arc<DynamicMapper<UserRecord, User>>,
}

impl<'a> UserRepository<'a> {
    /// Creates a new instance of [`UserRepository`]. The registry must
    /// already hold the user mapper.
    pub fn new(db: &'a DatabaseConnection, registry: &MapperRegistry) -> Result<Self, Error> {
        let mapper = registry
            .get_mapper::<UserRecord, User>()
            .ok_or(Error::MapperNotRegistered("user"))?;

        Ok(Self { db, mapper })
    }

    /// Creates a new user. Password hashing happens upstream; the
    /// repository stores the hash it is given.
    pub async fn create(
        &self,
        dto: &UserCreateDto,
        hashed_password: String,
    ) -> Result<User, Error> {
        let txn = self.db.begin().await?;

        let user = entity::user::ActiveModel {
            name: ActiveValue::Set(dto.name.clone()),
            email: ActiveValue::Set(dto.email.clone()),
            hashed_password: ActiveValue::Set(hashed_password),
            is_company: ActiveValue::Set(dto.is_company),
            ..Default::default()
        };

        let row = user.insert(&txn).await?;

        txn.commit().await?;

        self.map_record(&UserRecord::flat(row), false)
    }

    /// Retrieves the first user matching the filter.
    pub async fn retrieve(
        &self,
        filter: &UserFilter,
        include_relations: bool,
    ) -> Result<User, Error> {
        let txn = self.db.begin().await?;

        let row = entity::prelude::User::find()
            .filter(filter.condition())
            .one(&txn)
            .await?
            .ok_or_else(|| Error::EntityNotFound("User not found".to_string()))?;

        let record = if include_relations {
            Self::load_relations(&txn, vec![row])
                .await?
                .pop()
                .ok_or_else(|| {
                    Error::InternalError("Eager load dropped a fetched row".to_string())
                })?
        } else {
            UserRecord::flat(row)
        };

        txn.commit().await?;

        self.map_record(&record, include_relations)
    }

    /// Retrieves matching users in the storage engine's natural order.
    /// Zero matches yields an empty vec, not an error.
    pub async fn retrieve_many(
        &self,
        limit: u64,
        offset: u64,
        include_relations: bool,
        filter: &UserFilter,
    ) -> Result<Vec<User>, Error> {
        let txn = self.db.begin().await?;

        let rows = entity::prelude::User::find()
            .filter(filter.condition())
            .limit(limit)
            .offset(offset)
            .all(&txn)
            .await?;

        let records = if include_relations {
            Self::load_relations(&txn, rows).await?
        } else {
            rows.into_iter().map(UserRecord::flat).collect()
        };

        txn.commit().await?;

        records
            .iter()
            .map(|record| self.map_record(record, include_relations))
            .collect()
    }

    /// Applies the provided fields of the DTO; absent fields leave the
    /// stored values unchanged.
    pub async fn update(&self, id: i32, dto: &UserUpdateDto) -> Result<User, Error> {
        let txn = self.db.begin().await?;

        let row = entity::prelude::User::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| Error::EntityNotFound("User not found".to_string()))?;

        let mut user: entity::user::ActiveModel = row.clone().into();
        let mut changed = false;

        if let Some(name) = &dto.name {
            user.name = ActiveValue::Set(name.clone());
            changed = true;
        }
        if let Some(email) = &dto.email {
            user.email = ActiveValue::Set(email.clone());
            changed = true;
        }
        if let Some(is_company) = dto.is_company {
            user.is_company = ActiveValue::Set(is_company);
            changed = true;
        }

        let row = if changed { user.update(&txn).await? } else { row };

        txn.commit().await?;

        self.map_record(&UserRecord::flat(row), false)
    }

    /// Deletes the user and returns a tombstone entity mapped from the
    /// row's last known field values.
    pub async fn delete(&self, id: i32) -> Result<User, Error> {
        let txn = self.db.begin().await?;

        let row = entity::prelude::User::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| Error::EntityNotFound("User not found".to_string()))?;

        row.clone().delete(&txn).await?;

        txn.commit().await?;

        self.map_record(&UserRecord::flat(row), false)
    }

    async fn load_relations(
        txn: &DatabaseTransaction,
        rows: Vec<entity::user::Model>,
    ) -> Result<Vec<UserRecord>, Error> {
        let jobs = rows.load_many(entity::prelude::Job, txn).await?;
        let responses = rows.load_many(entity::prelude::Response, txn).await?;

        Ok(rows
            .into_iter()
            .zip(jobs)
            .zip(responses)
            .map(|((row, jobs), responses)| UserRecord {
                row,
                jobs: Loaded::Present(jobs.into_iter().map(JobRecord::flat).collect()),
                responses: Loaded::Present(
                    responses.into_iter().map(ResponseRecord::flat).collect(),
                ),
            })
            .collect())
    }

    fn map_record(&self, record: &UserRecord, include_relations: bool) -> Result<User, Error> {
        self.mapper
            .map(Some(record), include_relations)
            .ok_or_else(|| {
                Error::InternalError("Mapper returned no entity for a present record".to_string())
            })
    }
}
