use clap::Args;
use serde_json::json;
use sqlx::PgPool;

use crate::auth::PasswordHasher;
use crate::cli::{print_value, OutputFormat};
use crate::config::AppConfig;
use crate::database::models::User;
use crate::database::Repository;

#[derive(Args, Debug)]
pub struct CreateUserArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: i64,
    #[arg(long)]
    pub password: String,
    #[arg(long = "company", help = "Company the user works for (repeatable)")]
    pub companies: Vec<String>,
}

pub async fn create(
    config: &AppConfig,
    pool: &PgPool,
    args: CreateUserArgs,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let repository = Repository::new(pool.clone(), PasswordHasher::new(config.security.bcrypt_cost));

    let body = json!({
        "first_name": args.first_name,
        "last_name": args.last_name,
        "username": args.username,
        "email": args.email,
        "phone": args.phone,
        "password": args.password,
        "companies": args.companies,
    });
    let user = repository.create::<User>(body).await?;
    tracing::info!(user_id = user.id, "Seeded user");

    print_value(&serde_json::to_value(&user)?, output_format)
}
