use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection};

use super::{patch_fields, Model, ModelError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub bill_to: String,
    pub phone: i64,
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewCustomer {
    pub name: String,
    pub bill_to: String,
    pub phone: i64,
    pub email: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub bill_to: Option<String>,
    pub phone: Option<i64>,
    pub email: Option<String>,
}

#[async_trait]
impl Model for Customer {
    const TABLE: &'static str = "customer";

    type Create = NewCustomer;
    type Patch = CustomerPatch;

    fn id(&self) -> i64 {
        self.id
    }

    async fn insert(conn: &mut PgConnection, new: NewCustomer) -> Result<Self, ModelError> {
        let row = sqlx::query_as::<_, Customer>(
            "INSERT INTO customer (name, bill_to, phone, email)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(new.name)
        .bind(new.bill_to)
        .bind(new.phone)
        .bind(new.email)
        .fetch_one(conn)
        .await?;
        Ok(row)
    }

    fn apply(&mut self, patch: CustomerPatch) -> Result<(), ModelError> {
        patch_fields!(self, patch, [name, bill_to, phone, email]);
        Ok(())
    }

    async fn save(&self, conn: &mut PgConnection) -> Result<Self, ModelError> {
        let row = sqlx::query_as::<_, Customer>(
            "UPDATE customer SET name = $1, bill_to = $2, phone = $3, email = $4
             WHERE id = $5
             RETURNING *",
        )
        .bind(&self.name)
        .bind(&self.bill_to)
        .bind(self.phone)
        .bind(&self.email)
        .bind(self.id)
        .fetch_one(conn)
        .await?;
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Customer {
        Customer {
            id: 1,
            name: "Acme".to_string(),
            bill_to: "Acme HQ".to_string(),
            phone: 5551212,
            email: "ap@acme.test".to_string(),
        }
    }

    #[test]
    fn create_requires_every_field() {
        let err = serde_json::from_value::<NewCustomer>(json!({"name": "Acme"})).unwrap_err();
        assert!(err.to_string().contains("missing field"));
    }

    #[test]
    fn create_rejects_unknown_and_id_keys() {
        let body = json!({"id": 9, "name": "Acme", "bill_to": "HQ", "phone": 1, "email": "a@b.c"});
        let err = serde_json::from_value::<NewCustomer>(body).unwrap_err();
        assert!(err.to_string().contains("unknown field `id`"));
    }

    #[test]
    fn patch_touches_only_named_fields() {
        let mut customer = sample();
        let patch: CustomerPatch = serde_json::from_value(json!({"email": "billing@acme.test", "id": 99})).unwrap();
        customer.apply(patch).unwrap();

        assert_eq!(customer.id, 1);
        assert_eq!(customer.email, "billing@acme.test");
        assert_eq!(customer.name, "Acme");
        assert_eq!(customer.phone, 5551212);
    }

    #[test]
    fn patch_type_mismatch_is_an_error() {
        assert!(serde_json::from_value::<CustomerPatch>(json!({"phone": "not a number"})).is_err());
    }
}
