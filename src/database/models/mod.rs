//! Record types backing the `/api/{model}` routes.
//!
//! Each record declares two payload types next to its row struct:
//!
//! - `Create`: the full field map accepted on insert. Unknown keys are
//!   rejected and defaults are applied here.
//! - `Patch`: the whitelist of fields the generic update path may touch. Keys
//!   not listed are ignored, which keeps `id` and credential columns out of
//!   reach of a plain field overwrite.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgConnection};
use thiserror::Error;

use crate::auth::PasswordHasher;

pub mod admin;
pub mod customer;
pub mod expense;
pub mod job;
pub mod tech;
pub mod timecard;
pub mod user;

pub use admin::Admin;
pub use customer::Customer;
pub use expense::Expense;
pub use job::Job;
pub use tech::Tech;
pub use timecard::{AuxiliaryPayment, TimeCard};
pub use user::User;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error("Password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error("Password hashing task failed: {0}")]
    HashingTask(#[from] tokio::task::JoinError),
}

#[async_trait]
pub trait Model: Serialize + for<'r> FromRow<'r, PgRow> + Send + Sync + Unpin + 'static {
    /// Unquoted table name
    const TABLE: &'static str;

    type Create: DeserializeOwned + Send;
    type Patch: DeserializeOwned + Send;

    fn id(&self) -> i64;

    /// Derive stored values from a create payload before the write transaction opens
    async fn prepare_create(_new: &mut Self::Create, _hasher: &PasswordHasher) -> Result<(), ModelError> {
        Ok(())
    }

    /// Same as [`Model::prepare_create`] for update payloads
    async fn prepare_patch(_patch: &mut Self::Patch, _hasher: &PasswordHasher) -> Result<(), ModelError> {
        Ok(())
    }

    /// Insert a new row and return it with its assigned id
    async fn insert(conn: &mut PgConnection, new: Self::Create) -> Result<Self, ModelError>;

    /// Overwrite the fields named in `patch`, leaving the rest untouched
    fn apply(&mut self, patch: Self::Patch) -> Result<(), ModelError>;

    /// Write every updatable column back and return the stored row
    async fn save(&self, conn: &mut PgConnection) -> Result<Self, ModelError>;
}

/// Distinguish an absent key (`None`) from an explicit `null` (`Some(None)`).
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Assign every `Some` field of a patch onto the record.
macro_rules! patch_fields {
    ($record:expr, $patch:expr, [$($field:ident),* $(,)?]) => {
        $(
            if let Some(value) = $patch.$field {
                $record.$field = value;
            }
        )*
    };
}
pub(crate) use patch_fields;
