//! Scalar projections and relationship rules for the three entity kinds.
//!
//! [`register_job_board_mappers`] is the single registration point; it
//! must run at startup before any repository is constructed.

use crate::{
    data::record::{JobRecord, ResponseRecord, UserRecord},
    mapper::{registry::MapperRegistry, rule, FromRecord, Loaded},
    model::{Job, Response, User},
};

impl FromRecord<UserRecord> for User {
    fn from_record(record: &UserRecord) -> Self {
        let row = &record.row;

        User {
            id: row.id,
            name: row.name.clone(),
            email: row.email.clone(),
            hashed_password: row.hashed_password.clone(),
            is_company: row.is_company,
            jobs: Vec::new(),
            responses: Vec::new(),
        }
    }
}

impl FromRecord<JobRecord> for Job {
    fn from_record(record: &JobRecord) -> Self {
        let row = &record.row;

        Job {
            id: row.id,
            user_id: row.user_id,
            title: row.title.clone(),
            description: row.description.clone(),
            salary_from: row.salary_from,
            salary_to: row.salary_to,
            is_active: row.is_active,
            created_at: row.created_at,
            user: None,
            responses: Vec::new(),
        }
    }
}

impl FromRecord<ResponseRecord> for Response {
    fn from_record(record: &ResponseRecord) -> Self {
        let row = &record.row;

        Response {
            id: row.id,
            user_id: row.user_id,
            job_id: row.job_id,
            message: row.message.clone(),
            user: None,
            job: None,
        }
    }
}

fn user_jobs(record: &UserRecord) -> &Loaded<Vec<JobRecord>> {
    &record.jobs
}

fn user_responses(record: &UserRecord) -> &Loaded<Vec<ResponseRecord>> {
    &record.responses
}

fn job_user(record: &JobRecord) -> &Loaded<Box<UserRecord>> {
    &record.user
}

fn job_responses(record: &JobRecord) -> &Loaded<Vec<ResponseRecord>> {
    &record.responses
}

fn response_user(record: &ResponseRecord) -> &Loaded<Box<UserRecord>> {
    &record.user
}

fn response_job(record: &ResponseRecord) -> &Loaded<Box<JobRecord>> {
    &record.job
}

/// Registers the mappers for User, Job, and Response.
///
/// Registration order does not matter: a rule referencing a pair that has
/// not been registered yet resolves to a rule-less placeholder, which is
/// all a depth-one related mapper ever uses.
pub fn register_job_board_mappers(registry: &mut MapperRegistry) {
    registry.register::<UserRecord, User>(vec![
        rule::has_many("jobs", user_jobs, |user: &mut User, jobs| user.jobs = jobs),
        rule::has_many("responses", user_responses, |user: &mut User, responses| {
            user.responses = responses
        }),
    ]);

    registry.register::<JobRecord, Job>(vec![
        rule::belongs_to("user", job_user, |job: &mut Job, user| job.user = user),
        rule::has_many("responses", job_responses, |job: &mut Job, responses| {
            job.responses = responses
        }),
    ]);

    registry.register::<ResponseRecord, Response>(vec![
        rule::belongs_to("user", response_user, |response: &mut Response, user| {
            response.user = user
        }),
        rule::belongs_to("job", response_job, |response: &mut Response, job| {
            response.job = job
        }),
    ]);
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use super::*;

    fn user_row(id: i32) -> entity::user::Model {
        entity::user::Model {
            id,
            name: "Acme".to_string(),
            email: format!("user{id}@example.com"),
            hashed_password: "hash".to_string(),
            is_company: true,
        }
    }

    fn job_row(id: i32, user_id: i32) -> entity::job::Model {
        entity::job::Model {
            id,
            user_id,
            title: "Backend Engineer".to_string(),
            description: "Builds backend services".to_string(),
            salary_from: Decimal::new(100_000, 0),
            salary_to: Decimal::new(150_000, 0),
            is_active: true,
            created_at: Utc::now().naive_utc(),
        }
    }

    fn response_row(id: i32, user_id: i32, job_id: i32) -> entity::response::Model {
        entity::response::Model {
            id,
            user_id,
            job_id,
            message: Some("hi".to_string()),
        }
    }

    fn registry() -> MapperRegistry {
        let mut registry = MapperRegistry::new();
        register_job_board_mappers(&mut registry);
        registry
    }

    /// Mapping an absent record yields an absent entity, no panic.
    #[test]
    fn absent_record_maps_to_none() {
        let registry = registry();
        let mapper = registry.get_mapper::<UserRecord, User>().unwrap();

        assert!(mapper.map(None, false).is_none());
        assert!(mapper.map(None, true).is_none());
    }

    /// Without relation inclusion the scalar fields are copied and the
    /// relation fields stay empty, even when the record has fetched data.
    #[test]
    fn flat_mapping_leaves_relations_empty() {
        let registry = registry();
        let mapper = registry.get_mapper::<UserRecord, User>().unwrap();

        let record = UserRecord {
            row: user_row(1),
            jobs: Loaded::Present(vec![JobRecord::flat(job_row(10, 1))]),
            responses: Loaded::Present(vec![]),
        };

        let user = mapper.map(Some(&record), false).unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(user.email, "user1@example.com");
        assert!(user.jobs.is_empty());
        assert!(user.responses.is_empty());
    }

    /// Relations map exactly one level deep: the job's user is populated,
    /// but that user's own jobs are not.
    #[test]
    fn relations_map_one_level_deep() {
        let registry = registry();
        let mapper = registry.get_mapper::<JobRecord, Job>().unwrap();

        let record = JobRecord {
            row: job_row(10, 1),
            user: Loaded::Present(Box::new(UserRecord::flat(user_row(1)))),
            responses: Loaded::Present(vec![ResponseRecord::flat(response_row(100, 2, 10))]),
        };

        let job = mapper.map(Some(&record), true).unwrap();

        let user = job.user.expect("owner should be populated");
        assert_eq!(user.id, 1);
        // Depth cap: the nested user record's relations were never fetched
        // and the related mapper must not touch them.
        assert!(user.jobs.is_empty());

        assert_eq!(job.responses.len(), 1);
        assert_eq!(job.responses[0].id, 100);
        assert!(job.responses[0].job.is_none());
    }

    /// A fetched-absent to-one relation maps to `None` without error.
    #[test]
    fn fetched_absent_relation_maps_to_none() {
        let registry = registry();
        let mapper = registry.get_mapper::<ResponseRecord, Response>().unwrap();

        let record = ResponseRecord {
            row: response_row(100, 2, 10),
            user: Loaded::Absent,
            job: Loaded::Absent,
        };

        let response = mapper.map(Some(&record), true).unwrap();

        assert!(response.user.is_none());
        assert!(response.job.is_none());
    }

    /// Requesting relations against a record whose slot was never fetched
    /// is a caller contract violation.
    #[test]
    #[should_panic(expected = "was not fetched")]
    fn not_fetched_relation_panics_when_requested() {
        let registry = registry();
        let mapper = registry.get_mapper::<JobRecord, Job>().unwrap();

        let record = JobRecord::flat(job_row(10, 1));

        let _ = mapper.map(Some(&record), true);
    }

    /// Registering in any order wires the cross-references: Job first
    /// creates placeholders for User and Response, and mapping still
    /// resolves its relations.
    #[test]
    fn registration_order_does_not_matter() {
        let mut registry = MapperRegistry::new();

        registry.register::<JobRecord, Job>(vec![
            rule::belongs_to("user", job_user, |job: &mut Job, user| job.user = user),
            rule::has_many("responses", job_responses, |job: &mut Job, responses| {
                job.responses = responses
            }),
        ]);
        registry.register::<ResponseRecord, Response>(vec![
            rule::belongs_to("user", response_user, |response: &mut Response, user| {
                response.user = user
            }),
            rule::belongs_to("job", response_job, |response: &mut Response, job| {
                response.job = job
            }),
        ]);
        registry.register::<UserRecord, User>(vec![
            rule::has_many("jobs", user_jobs, |user: &mut User, jobs| user.jobs = jobs),
            rule::has_many("responses", user_responses, |user: &mut User, responses| {
                user.responses = responses
            }),
        ]);

        let mapper = registry.get_mapper::<JobRecord, Job>().unwrap();
        let record = JobRecord {
            row: job_row(10, 1),
            user: Loaded::Present(Box::new(UserRecord::flat(user_row(1)))),
            responses: Loaded::Present(vec![]),
        };

        let job = mapper.map(Some(&record), true).unwrap();
        assert_eq!(job.user.expect("owner should be populated").id, 1);
    }

    /// Re-registering a pair replaces the registry entry: a lookup after
    /// the replacement maps relations, while mappers built against the
    /// earlier placeholder keep their flat behavior (they only ever run
    /// with relations disabled, where the two are identical).
    #[test]
    fn re_registration_replaces_registry_entry() {
        let mut registry = MapperRegistry::new();

        // Registering Job first creates a rule-less placeholder for User.
        registry.register::<JobRecord, Job>(vec![rule::belongs_to(
            "user",
            job_user,
            |job: &mut Job, user| job.user = user,
        )]);

        let placeholder = registry.get_mapper::<UserRecord, User>().unwrap();

        registry.register::<UserRecord, User>(vec![rule::has_many(
            "jobs",
            user_jobs,
            |user: &mut User, jobs| user.jobs = jobs,
        )]);

        let replacement = registry.get_mapper::<UserRecord, User>().unwrap();
        assert!(!std::sync::Arc::ptr_eq(&placeholder, &replacement));

        let record = UserRecord {
            row: user_row(1),
            jobs: Loaded::Present(vec![JobRecord::flat(job_row(10, 1))]),
            responses: Loaded::NotFetched,
        };

        let user = replacement.map(Some(&record), true).unwrap();
        assert_eq!(user.jobs.len(), 1);
    }
}
