pub mod auth;
pub mod home;

pub use auth::login;
pub use home::{health, index};
