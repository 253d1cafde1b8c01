//! SurrealDB repository implementations.

mod application;
mod employee;
mod task;
mod user;

pub use application::SurrealApplicationRepository;
pub use employee::SurrealEmployeeRepository;
pub use task::SurrealTaskRepository;
pub use user::SurrealUserRepository;
