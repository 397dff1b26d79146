use serde::{Deserialize, Serialize};

use crate::model::{Job, Response};

/// A registered account: a company (posts jobs) or an employee (responds).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub hashed_password: String,
    pub is_company: bool,
    /// Jobs owned by this user; populated only on request.
    #[serde(default)]
    pub jobs: Vec<Job>,
    /// Responses submitted by this user; populated only on request.
    #[serde(default)]
    pub responses: Vec<Response>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserCreateDto {
    pub name: String,
    pub email: String,
    pub is_company: bool,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UserUpdateDto {
    pub name: Option<String>,
    pub email: Option<String>,
    pub is_company: Option<bool>,
}
