use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection};

use super::{nullable, patch_fields, Model, ModelError};

pub const DEFAULT_STATUS: &str = "pending";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: i64,
    pub customer_id: i64,
    pub description: String,
    /// e.g. "pending", "in_progress", "completed"
    pub status: String,
    pub go_to: String,
    pub contact: String,
    pub callback: String,
    pub details: String,
    pub notes: String,
    pub bonus_eligible: bool,
    pub bonus_amount: Option<f64>,
}

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewJob {
    pub customer_id: i64,
    pub description: String,
    #[serde(default = "default_status")]
    pub status: String,
    pub go_to: String,
    pub contact: String,
    pub callback: String,
    pub details: String,
    pub notes: String,
    #[serde(default)]
    pub bonus_eligible: bool,
    #[serde(default)]
    pub bonus_amount: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct JobPatch {
    pub customer_id: Option<i64>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub go_to: Option<String>,
    pub contact: Option<String>,
    pub callback: Option<String>,
    pub details: Option<String>,
    pub notes: Option<String>,
    pub bonus_eligible: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    pub bonus_amount: Option<Option<f64>>,
}

#[async_trait]
impl Model for Job {
    const TABLE: &'static str = "job";

    type Create = NewJob;
    type Patch = JobPatch;

    fn id(&self) -> i64 {
        self.id
    }

    async fn insert(conn: &mut PgConnection, new: NewJob) -> Result<Self, ModelError> {
        let row = sqlx::query_as::<_, Job>(
            "INSERT INTO job (customer_id, description, status, go_to, contact, callback,
                              details, notes, bonus_eligible, bonus_amount)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING *",
        )
        .bind(new.customer_id)
        .bind(new.description)
        .bind(new.status)
        .bind(new.go_to)
        .bind(new.contact)
        .bind(new.callback)
        .bind(new.details)
        .bind(new.notes)
        .bind(new.bonus_eligible)
        .bind(new.bonus_amount)
        .fetch_one(conn)
        .await?;
        Ok(row)
    }

    fn apply(&mut self, patch: JobPatch) -> Result<(), ModelError> {
        patch_fields!(
            self,
            patch,
            [customer_id, description, status, go_to, contact, callback, details, notes, bonus_eligible, bonus_amount]
        );
        Ok(())
    }

    async fn save(&self, conn: &mut PgConnection) -> Result<Self, ModelError> {
        let row = sqlx::query_as::<_, Job>(
            "UPDATE job
             SET customer_id = $1, description = $2, status = $3, go_to = $4, contact = $5,
                 callback = $6, details = $7, notes = $8, bonus_eligible = $9, bonus_amount = $10
             WHERE id = $11
             RETURNING *",
        )
        .bind(self.customer_id)
        .bind(&self.description)
        .bind(&self.status)
        .bind(&self.go_to)
        .bind(&self.contact)
        .bind(&self.callback)
        .bind(&self.details)
        .bind(&self.notes)
        .bind(self.bonus_eligible)
        .bind(self.bonus_amount)
        .bind(self.id)
        .fetch_one(conn)
        .await?;
        Ok(row)
    }
}
