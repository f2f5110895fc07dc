use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::{FromRow, PgConnection, PgPool};

use super::{patch_fields, Model, ModelError};
use crate::auth::PasswordHasher;

/// An employee account. Also the identity behind bearer tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub phone: i64,
    /// Only ever written through [`PasswordHasher`]; never serialized.
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,
    pub companies: Json<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub phone: i64,
    /// Plaintext, replaced by `password_hash` in `prepare_create`.
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub companies: Vec<String>,
    #[serde(skip)]
    password_hash: Option<String>,
}

/// `password_hash` is not patchable; a body naming it is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone: Option<i64>,
    pub password: Option<String>,
    pub companies: Option<Vec<String>>,
    #[serde(skip)]
    password_hash: Option<String>,
}

/// Run bcrypt on the blocking pool
async fn hash_password(hasher: &PasswordHasher, password: String) -> Result<String, ModelError> {
    let hasher = *hasher;
    Ok(tokio::task::spawn_blocking(move || hasher.hash(&password)).await??)
}

impl User {
    pub fn verify_password(&self, password: &str, hasher: &PasswordHasher) -> bool {
        hasher.verify(password, self.password_hash.as_deref())
    }

    /// First user whose email or username equals `login`
    pub async fn find_by_login(pool: &PgPool, login: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"SELECT * FROM "user" WHERE email = $1 OR username = $1 ORDER BY id LIMIT 1"#,
        )
        .bind(login)
        .fetch_optional(pool)
        .await
    }
}

#[async_trait]
impl Model for User {
    const TABLE: &'static str = "user";

    type Create = NewUser;
    type Patch = UserPatch;

    fn id(&self) -> i64 {
        self.id
    }

    async fn prepare_create(new: &mut NewUser, hasher: &PasswordHasher) -> Result<(), ModelError> {
        if let Some(password) = new.password.take() {
            new.password_hash = Some(hash_password(hasher, password).await?);
        }
        Ok(())
    }

    async fn prepare_patch(patch: &mut UserPatch, hasher: &PasswordHasher) -> Result<(), ModelError> {
        if let Some(password) = patch.password.take() {
            patch.password_hash = Some(hash_password(hasher, password).await?);
        }
        Ok(())
    }

    async fn insert(conn: &mut PgConnection, new: NewUser) -> Result<Self, ModelError> {
        let row = sqlx::query_as::<_, User>(
            r#"INSERT INTO "user" (first_name, last_name, username, email, phone, password_hash, companies)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING *"#,
        )
        .bind(new.first_name)
        .bind(new.last_name)
        .bind(new.username)
        .bind(new.email)
        .bind(new.phone)
        .bind(new.password_hash)
        .bind(Json(new.companies))
        .fetch_one(conn)
        .await?;
        Ok(row)
    }

    fn apply(&mut self, patch: UserPatch) -> Result<(), ModelError> {
        patch_fields!(self, patch, [first_name, last_name, username, email, phone]);
        if let Some(companies) = patch.companies {
            self.companies = Json(companies);
        }
        if let Some(hash) = patch.password_hash {
            self.password_hash = Some(hash);
        }
        Ok(())
    }

    async fn save(&self, conn: &mut PgConnection) -> Result<Self, ModelError> {
        let row = sqlx::query_as::<_, User>(
            r#"UPDATE "user"
               SET first_name = $1, last_name = $2, username = $3, email = $4,
                   phone = $5, password_hash = $6, companies = $7
               WHERE id = $8
               RETURNING *"#,
        )
        .bind(&self.first_name)
        .bind(&self.last_name)
        .bind(&self.username)
        .bind(&self.email)
        .bind(self.phone)
        .bind(&self.password_hash)
        .bind(&self.companies)
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

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(4)
    }

    fn alice() -> User {
        User {
            id: 1,
            first_name: "Alice".to_string(),
            last_name: "Smith".to_string(),
            username: "alice".to_string(),
            email: "alice@x.com".to_string(),
            phone: 5550100,
            password_hash: None,
            companies: Json(vec![]),
        }
    }

    #[test]
    fn create_refuses_a_raw_hash() {
        let body = json!({
            "first_name": "A", "last_name": "S", "username": "a", "email": "a@x.com",
            "phone": 1, "password_hash": "$2b$04$forged"
        });
        let err = serde_json::from_value::<NewUser>(body).unwrap_err();
        assert!(err.to_string().contains("unknown field `password_hash`"));
    }

    fn with_password(mut user: User, password: &str) -> User {
        user.password_hash = Some(hasher().hash(password).unwrap());
        user
    }

    #[tokio::test]
    async fn create_hashes_the_plaintext_before_insert() {
        let mut new: NewUser = serde_json::from_value(json!({
            "first_name": "A", "last_name": "S", "username": "a", "email": "a@x.com",
            "phone": 1, "password": "secret"
        }))
        .unwrap();
        User::prepare_create(&mut new, &hasher()).await.unwrap();

        assert!(new.password.is_none());
        let hash = new.password_hash.as_deref().unwrap();
        assert_ne!(hash, "secret");
        assert!(hasher().verify("secret", Some(hash)));
    }

    #[tokio::test]
    async fn patch_ignores_password_hash() {
        let mut user = with_password(alice(), "secret");
        let before = user.password_hash.clone();

        let mut patch: UserPatch =
            serde_json::from_value(json!({"password_hash": "forged", "last_name": "Jones"})).unwrap();
        User::prepare_patch(&mut patch, &hasher()).await.unwrap();
        user.apply(patch).unwrap();

        assert_eq!(user.password_hash, before);
        assert_eq!(user.last_name, "Jones");
        assert!(user.verify_password("secret", &hasher()));
    }

    #[tokio::test]
    async fn patch_password_goes_through_the_hasher() {
        let mut user = with_password(alice(), "secret");
        let mut patch: UserPatch = serde_json::from_value(json!({"password": "new-secret"})).unwrap();
        User::prepare_patch(&mut patch, &hasher()).await.unwrap();
        user.apply(patch).unwrap();

        let hash = user.password_hash.as_deref().unwrap();
        assert_ne!(hash, "new-secret");
        assert!(user.verify_password("new-secret", &hasher()));
        assert!(!user.verify_password("secret", &hasher()));
    }

    #[test]
    fn user_without_hash_never_verifies() {
        assert!(!alice().verify_password("", &hasher()));
    }

    #[test]
    fn serialized_user_omits_hash() {
        let user = with_password(alice(), "secret");
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("password_hash").is_none());
        assert_eq!(value["email"], "alice@x.com");
        assert_eq!(value["companies"], json!([]));
    }
}
