pub mod password;
pub mod token;

use thiserror::Error;

pub use password::PasswordHasher;
pub use token::{Claims, IssuedToken, TokenService};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Username and password required")]
    MissingCredentials,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Missing Authorization header")]
    MissingToken,

    #[error("Authorization header must use Bearer token format")]
    MalformedHeader,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
}
