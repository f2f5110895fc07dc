use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection};

use super::{patch_fields, Model, ModelError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Expense {
    pub id: i64,
    pub timecard_id: i64,
    /// "expense", "health_insurance", "bonus", ...
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub amount: f64,
    pub description: String,
    pub date_incurred: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewExpense {
    pub timecard_id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    pub date_incurred: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExpensePatch {
    pub timecard_id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub date_incurred: Option<String>,
}

#[async_trait]
impl Model for Expense {
    const TABLE: &'static str = "expense";

    type Create = NewExpense;
    type Patch = ExpensePatch;

    fn id(&self) -> i64 {
        self.id
    }

    async fn insert(conn: &mut PgConnection, new: NewExpense) -> Result<Self, ModelError> {
        let row = sqlx::query_as::<_, Expense>(
            r#"INSERT INTO expense (timecard_id, "type", amount, description, date_incurred)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING *"#,
        )
        .bind(new.timecard_id)
        .bind(new.kind)
        .bind(new.amount)
        .bind(new.description)
        .bind(new.date_incurred)
        .fetch_one(conn)
        .await?;
        Ok(row)
    }

    fn apply(&mut self, patch: ExpensePatch) -> Result<(), ModelError> {
        patch_fields!(self, patch, [timecard_id, kind, amount, description, date_incurred]);
        Ok(())
    }

    async fn save(&self, conn: &mut PgConnection) -> Result<Self, ModelError> {
        let row = sqlx::query_as::<_, Expense>(
            r#"UPDATE expense
               SET timecard_id = $1, "type" = $2, amount = $3, description = $4, date_incurred = $5
               WHERE id = $6
               RETURNING *"#,
        )
        .bind(self.timecard_id)
        .bind(&self.kind)
        .bind(self.amount)
        .bind(&self.description)
        .bind(&self.date_incurred)
        .bind(self.id)
        .fetch_one(conn)
        .await?;
        Ok(row)
    }
}
