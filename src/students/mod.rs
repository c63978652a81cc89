//! Student records: storage, filtering, and CRUD rules.

pub mod filters;
mod service;
pub mod store;
pub mod types;

pub use filters::NameFilter;
pub use service::{StudentApi, StudentService};
pub use store::StudentStore;
pub use types::{SeedError, Student, StudentError, StudentPayload};
