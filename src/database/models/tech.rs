use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::{FromRow, PgConnection};

use super::{Model, ModelError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Tech {
    pub id: i64,
    pub employee_id: i64,
    pub specializations: Json<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewTech {
    pub employee_id: i64,
    #[serde(default)]
    pub specializations: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TechPatch {
    pub employee_id: Option<i64>,
    pub specializations: Option<Vec<String>>,
}

#[async_trait]
impl Model for Tech {
    const TABLE: &'static str = "tech";

    type Create = NewTech;
    type Patch = TechPatch;

    fn id(&self) -> i64 {
        self.id
    }

    async fn insert(conn: &mut PgConnection, new: NewTech) -> Result<Self, ModelError> {
        let row = sqlx::query_as::<_, Tech>(
            "INSERT INTO tech (employee_id, specializations) VALUES ($1, $2) RETURNING *",
        )
        .bind(new.employee_id)
        .bind(Json(new.specializations))
        .fetch_one(conn)
        .await?;
        Ok(row)
    }

    fn apply(&mut self, patch: TechPatch) -> Result<(), ModelError> {
        if let Some(employee_id) = patch.employee_id {
            self.employee_id = employee_id;
        }
        if let Some(specializations) = patch.specializations {
            self.specializations = Json(specializations);
        }
        Ok(())
    }

    async fn save(&self, conn: &mut PgConnection) -> Result<Self, ModelError> {
        let row = sqlx::query_as::<_, Tech>(
            "UPDATE tech SET employee_id = $1, specializations = $2 WHERE id = $3 RETURNING *",
        )
        .bind(self.employee_id)
        .bind(&self.specializations)
        .bind(self.id)
        .fetch_one(conn)
        .await?;
        Ok(row)
    }
}
