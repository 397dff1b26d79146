use serde::{Deserialize, Serialize};

use crate::model::{Job, User};

/// An application from an employee user to a job. At most one per
/// `(user_id, job_id)` pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub id: i32,
    pub user_id: i32,
    pub job_id: i32,
    pub message: Option<String>,
    /// Applicant; populated only on request.
    #[serde(default)]
    pub user: Option<Box<User>>,
    /// Target job; populated only on request.
    #[serde(default)]
    pub job: Option<Box<Job>>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ResponseCreateDto {
    pub message: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ResponseUpdateDto {
    pub message: Option<String>,
}
