use serde_json::Value;
use sqlx::{PgPool, Postgres, Transaction};

use crate::auth::PasswordHasher;
use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::Model;

/// Generic CRUD over one record type at a time.
///
/// Every write runs in its own transaction. Any failure after `begin` rolls
/// the transaction back before the error is returned, and the transaction is
/// dropped (and therefore rolled back) on every other exit path too.
#[derive(Clone)]
pub struct Repository {
    pool: PgPool,
    hasher: PasswordHasher,
}

impl Repository {
    pub fn new(pool: PgPool, hasher: PasswordHasher) -> Self {
        Self { pool, hasher }
    }

    /// All rows in store order
    pub async fn select_all<M: Model>(&self) -> Result<Vec<M>, DatabaseError> {
        let sql = format!("SELECT * FROM {}", DatabaseManager::quote_identifier(M::TABLE));
        Ok(sqlx::query_as::<_, M>(&sql).fetch_all(&self.pool).await?)
    }

    pub async fn select_one<M: Model>(&self, id: i64) -> Result<Option<M>, DatabaseError> {
        let sql = format!("SELECT * FROM {} WHERE id = $1", DatabaseManager::quote_identifier(M::TABLE));
        Ok(sqlx::query_as::<_, M>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    pub async fn select_404<M: Model>(&self, id: i64) -> Result<M, DatabaseError> {
        self.select_one::<M>(id).await?.ok_or_else(|| not_found::<M>(id))
    }

    /// Build a record from a flat field map and insert it
    pub async fn create<M: Model>(&self, body: Value) -> Result<M, DatabaseError> {
        let mut new: M::Create = serde_json::from_value(field_map(body)?).map_err(DatabaseError::rejected)?;
        M::prepare_create(&mut new, &self.hasher).await.map_err(DatabaseError::rejected)?;

        let mut tx = self.pool.begin().await.map_err(DatabaseError::rejected)?;
        match M::insert(&mut *tx, new).await {
            Ok(record) => {
                tx.commit().await.map_err(DatabaseError::rejected)?;
                tracing::debug!(model = M::TABLE, id = record.id(), "Created record");
                Ok(record)
            }
            Err(e) => Err(rollback::<M>(tx, e.to_string()).await),
        }
    }

    /// Overwrite the whitelisted fields named in `body` on an existing row
    pub async fn update<M: Model>(&self, id: i64, body: Value) -> Result<M, DatabaseError> {
        let mut patch: M::Patch = serde_json::from_value(field_map(body)?).map_err(DatabaseError::rejected)?;
        M::prepare_patch(&mut patch, &self.hasher).await.map_err(DatabaseError::rejected)?;

        let mut tx = self.pool.begin().await.map_err(DatabaseError::rejected)?;

        let mut record = lock_row::<M>(&mut tx, id).await?.ok_or_else(|| not_found::<M>(id))?;

        if let Err(e) = record.apply(patch) {
            return Err(rollback::<M>(tx, e.to_string()).await);
        }

        match record.save(&mut *tx).await {
            Ok(saved) => {
                tx.commit().await.map_err(DatabaseError::rejected)?;
                tracing::debug!(model = M::TABLE, id, "Updated record");
                Ok(saved)
            }
            Err(e) => Err(rollback::<M>(tx, e.to_string()).await),
        }
    }

    /// Remove a row, returning its id
    pub async fn delete<M: Model>(&self, id: i64) -> Result<i64, DatabaseError> {
        let mut tx = self.pool.begin().await.map_err(DatabaseError::rejected)?;

        if lock_row::<M>(&mut tx, id).await?.is_none() {
            return Err(not_found::<M>(id));
        }

        let sql = format!("DELETE FROM {} WHERE id = $1", DatabaseManager::quote_identifier(M::TABLE));
        match sqlx::query(&sql).bind(id).execute(&mut *tx).await {
            Ok(_) => {
                tx.commit().await.map_err(DatabaseError::rejected)?;
                tracing::debug!(model = M::TABLE, id, "Deleted record");
                Ok(id)
            }
            Err(e) => Err(rollback::<M>(tx, e.to_string()).await),
        }
    }
}

/// Only a JSON object names its fields; struct deserializers would also fill
/// fields positionally from an array.
fn field_map(body: Value) -> Result<Value, DatabaseError> {
    if body.is_object() {
        Ok(body)
    } else {
        Err(DatabaseError::Rejected("request body must be a JSON object".to_string()))
    }
}

async fn lock_row<M: Model>(tx: &mut Transaction<'_, Postgres>, id: i64) -> Result<Option<M>, DatabaseError> {
    let sql = format!(
        "SELECT * FROM {} WHERE id = $1 FOR UPDATE",
        DatabaseManager::quote_identifier(M::TABLE)
    );
    sqlx::query_as::<_, M>(&sql)
        .bind(id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(DatabaseError::rejected)
}

fn not_found<M: Model>(id: i64) -> DatabaseError {
    DatabaseError::NotFound(format!("{} {} not found", M::TABLE, id))
}

async fn rollback<M: Model>(tx: Transaction<'_, Postgres>, message: String) -> DatabaseError {
    tracing::warn!(model = M::TABLE, error = %message, "Rolling back write");
    if let Err(e) = tx.rollback().await {
        tracing::error!(model = M::TABLE, "Rollback failed: {}", e);
    }
    DatabaseError::Rejected(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::customer::{CustomerPatch, NewCustomer};
    use serde_json::json;

    #[test]
    fn positional_bodies_are_rejected() {
        for body in [json!(["Acme", "HQ", 1, "a@b.c"]), json!([null, null, null, "x@y.z"]), json!("x"), json!(null)] {
            assert!(
                matches!(field_map(body.clone()), Err(DatabaseError::Rejected(ref m)) if m == "request body must be a JSON object"),
                "accepted {}",
                body
            );
        }
    }

    #[test]
    fn field_maps_still_parse() {
        let body = field_map(json!({"name": "Acme", "bill_to": "HQ", "phone": 1, "email": "a@b.c"})).unwrap();
        assert!(serde_json::from_value::<NewCustomer>(body).is_ok());

        let patch: CustomerPatch = serde_json::from_value(field_map(json!({"email": "x@y.z"})).unwrap()).unwrap();
        assert_eq!(patch.email.as_deref(), Some("x@y.z"));
        assert!(patch.name.is_none());
    }
}
