pub mod manager;
pub mod models;
pub mod registry;
pub mod repository;
pub mod schema;

pub use manager::{DatabaseError, DatabaseManager};
pub use registry::{ModelKind, ModelRegistry};
pub use repository::Repository;
