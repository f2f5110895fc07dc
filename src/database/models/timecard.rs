use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::{FromRow, PgConnection};

use super::{patch_fields, Model, ModelError};

/// An extra line on a timecard such as per diem or mileage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuxiliaryPayment {
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TimeCard {
    pub id: i64,
    pub employee_id: i64,
    pub job_id: i64,
    pub hours: f64,
    pub hourly_rate: f64,
    pub date: String,
    pub description: String,
    pub auxiliary_payments: Json<Vec<AuxiliaryPayment>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewTimeCard {
    pub employee_id: i64,
    pub job_id: i64,
    pub hours: f64,
    #[serde(default)]
    pub hourly_rate: f64,
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub auxiliary_payments: Vec<AuxiliaryPayment>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TimeCardPatch {
    pub employee_id: Option<i64>,
    pub job_id: Option<i64>,
    pub hours: Option<f64>,
    pub hourly_rate: Option<f64>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub auxiliary_payments: Option<Vec<AuxiliaryPayment>>,
}

#[async_trait]
impl Model for TimeCard {
    const TABLE: &'static str = "timecard";

    type Create = NewTimeCard;
    type Patch = TimeCardPatch;

    fn id(&self) -> i64 {
        self.id
    }

    async fn insert(conn: &mut PgConnection, new: NewTimeCard) -> Result<Self, ModelError> {
        let row = sqlx::query_as::<_, TimeCard>(
            "INSERT INTO timecard (employee_id, job_id, hours, hourly_rate, date, description, auxiliary_payments)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(new.employee_id)
        .bind(new.job_id)
        .bind(new.hours)
        .bind(new.hourly_rate)
        .bind(new.date)
        .bind(new.description)
        .bind(Json(new.auxiliary_payments))
        .fetch_one(conn)
        .await?;
        Ok(row)
    }

    fn apply(&mut self, patch: TimeCardPatch) -> Result<(), ModelError> {
        patch_fields!(self, patch, [employee_id, job_id, hours, hourly_rate, date, description]);
        if let Some(payments) = patch.auxiliary_payments {
            self.auxiliary_payments = Json(payments);
        }
        Ok(())
    }

    async fn save(&self, conn: &mut PgConnection) -> Result<Self, ModelError> {
        let row = sqlx::query_as::<_, TimeCard>(
            "UPDATE timecard
             SET employee_id = $1, job_id = $2, hours = $3, hourly_rate = $4, date = $5,
                 description = $6, auxiliary_payments = $7
             WHERE id = $8
             RETURNING *",
        )
        .bind(self.employee_id)
        .bind(self.job_id)
        .bind(self.hours)
        .bind(self.hourly_rate)
        .bind(&self.date)
        .bind(&self.description)
        .bind(&self.auxiliary_payments)
        .bind(self.id)
        .fetch_one(conn)
        .await?;
        Ok(row)
    }
}
