use serde_json::json;
use sqlx::PgPool;

use crate::auth::{PasswordHasher, TokenService};
use crate::cli::{print_value, OutputFormat};
use crate::config::AppConfig;
use crate::database::models::User;
use crate::database::Repository;

pub async fn mint(config: &AppConfig, pool: &PgPool, user_id: i64, output_format: OutputFormat) -> anyhow::Result<()> {
    let repository = Repository::new(pool.clone(), PasswordHasher::new(config.security.bcrypt_cost));
    let user = repository.select_404::<User>(user_id).await?;

    let issued = TokenService::from_config(&config.security).issue(user.id, &user.email)?;

    print_value(
        &json!({
            "access_token": issued.token,
            "token_type": "bearer",
            "expires_in": issued.expires_in,
        }),
        output_format,
    )
}
