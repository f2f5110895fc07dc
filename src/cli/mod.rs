pub mod commands;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::database::DatabaseManager;

#[derive(Parser)]
#[command(name = "fieldops")]
#[command(about = "Field Ops CLI - database bootstrap and account seeding")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(name = "init-db", about = "Create any missing record tables")]
    InitDb,

    #[command(name = "create-user", about = "Seed a user account with a hashed password")]
    CreateUser(commands::user::CreateUserArgs),

    #[command(about = "Mint a bearer token for an existing user")]
    Token {
        #[arg(long, help = "User id to put in the token subject")]
        user_id: i64,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let config = AppConfig::from_env();
    config.validate()?;
    let pool = DatabaseManager::connect(&config).await?;

    let result = match cli.command {
        Commands::InitDb => commands::db::init(&pool, output_format).await,
        Commands::CreateUser(args) => commands::user::create(&config, &pool, args, output_format).await,
        Commands::Token { user_id } => commands::token::mint(&config, &pool, user_id, output_format).await,
    };

    pool.close().await;
    result
}

pub(crate) fn print_value(value: &serde_json::Value, output_format: OutputFormat) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => {
            if let Some(map) = value.as_object() {
                for (key, v) in map {
                    match v {
                        serde_json::Value::String(s) => println!("{}: {}", key, s),
                        other => println!("{}: {}", key, other),
                    }
                }
            } else {
                println!("{}", value);
            }
        }
    }
    Ok(())
}
