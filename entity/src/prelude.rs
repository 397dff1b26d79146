pub use super::job::Entity as Job;
pub use super::response::Entity as Response;
pub use super::user::Entity as User;
