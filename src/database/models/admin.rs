use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection};

use super::{patch_fields, Model, ModelError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Admin {
    pub id: i64,
    pub employee_id: i64,
    /// e.g. "senior", "junior"
    pub admin_level: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewAdmin {
    pub employee_id: i64,
    pub admin_level: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct AdminPatch {
    pub employee_id: Option<i64>,
    pub admin_level: Option<String>,
}

#[async_trait]
impl Model for Admin {
    const TABLE: &'static str = "admin";

    type Create = NewAdmin;
    type Patch = AdminPatch;

    fn id(&self) -> i64 {
        self.id
    }

    async fn insert(conn: &mut PgConnection, new: NewAdmin) -> Result<Self, ModelError> {
        let row = sqlx::query_as::<_, Admin>(
            "INSERT INTO admin (employee_id, admin_level) VALUES ($1, $2) RETURNING *",
        )
        .bind(new.employee_id)
        .bind(new.admin_level)
        .fetch_one(conn)
        .await?;
        Ok(row)
    }

    fn apply(&mut self, patch: AdminPatch) -> Result<(), ModelError> {
        patch_fields!(self, patch, [employee_id, admin_level]);
        Ok(())
    }

    async fn save(&self, conn: &mut PgConnection) -> Result<Self, ModelError> {
        let row = sqlx::query_as::<_, Admin>(
            "UPDATE admin SET employee_id = $1, admin_level = $2 WHERE id = $3 RETURNING *",
        )
        .bind(self.employee_id)
        .bind(&self.admin_level)
        .bind(self.id)
        .fetch_one(conn)
        .await?;
        Ok(row)
    }
}
