pub mod prelude;

pub mod job;
pub mod response;
pub mod user;
