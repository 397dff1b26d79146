//! Business-rule services.
//!
//! Services sit between the web layer and the repositories: they check
//! permissions and business rules (who may post, whether a job accepts
//! responses, salary-range sanity) and raise the domain errors the
//! repositories deliberately do not. The authenticated caller is passed
//! in explicitly as `actor`; resolving it from a session or token is the
//! web layer's job.

pub mod job;
pub mod response;
pub mod user;

pub use job::JobService;
pub use response::ResponseService;
pub use user::UserService;
