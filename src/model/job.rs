use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::{Response, User};

/// A vacancy posted by a company user.
///
/// `salary_from <= salary_to` is validated by the service layer on create
/// and update; the repository stores whatever it is given.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub description: String,
    pub salary_from: Decimal,
    pub salary_to: Decimal,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    /// Owning user; populated only on request.
    #[serde(default)]
    pub user: Option<Box<User>>,
    /// Responses to this job; populated only on request.
    #[serde(default)]
    pub responses: Vec<Response>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JobCreateDto {
    pub title: String,
    pub description: String,
    pub salary_from: Decimal,
    pub salary_to: Decimal,
    /// Defaults to active when not provided.
    pub is_active: Option<bool>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct JobUpdateDto {
    pub title: Option<String>,
    pub description: Option<String>,
    pub salary_from: Option<Decimal>,
    pub salary_to: Option<Decimal>,
    pub is_active: Option<bool>,
}
