pub mod auth;

pub use auth::{logout, me};
