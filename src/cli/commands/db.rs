use serde_json::json;
use sqlx::PgPool;

use crate::cli::{print_value, OutputFormat};
use crate::database::schema;

pub async fn init(pool: &PgPool, output_format: OutputFormat) -> anyhow::Result<()> {
    schema::init_db(pool).await?;
    let tables: Vec<&str> = schema::table_names().collect();
    print_value(&json!({ "status": "ok", "tables": tables }), output_format)
}
