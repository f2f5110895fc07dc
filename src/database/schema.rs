// Table bootstrap. Idempotent: every statement is CREATE TABLE IF NOT EXISTS,
// ordered so referenced tables exist before their dependents.
use sqlx::PgPool;

use super::manager::DatabaseError;

const TABLES: &[(&str, &str)] = &[
    (
        "customer",
        r#"CREATE TABLE IF NOT EXISTS customer (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            bill_to TEXT NOT NULL,
            phone BIGINT NOT NULL,
            email TEXT NOT NULL
        )"#,
    ),
    (
        "user",
        r#"CREATE TABLE IF NOT EXISTS "user" (
            id BIGSERIAL PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            username TEXT NOT NULL,
            email TEXT NOT NULL,
            phone BIGINT NOT NULL,
            password_hash TEXT,
            companies JSONB NOT NULL DEFAULT '[]'::jsonb
        )"#,
    ),
    (
        "admin",
        r#"CREATE TABLE IF NOT EXISTS admin (
            id BIGSERIAL PRIMARY KEY,
            employee_id BIGINT NOT NULL REFERENCES "user"(id),
            admin_level TEXT NOT NULL
        )"#,
    ),
    (
        "tech",
        r#"CREATE TABLE IF NOT EXISTS tech (
            id BIGSERIAL PRIMARY KEY,
            employee_id BIGINT NOT NULL REFERENCES "user"(id),
            specializations JSONB NOT NULL DEFAULT '[]'::jsonb
        )"#,
    ),
    (
        "job",
        r#"CREATE TABLE IF NOT EXISTS job (
            id BIGSERIAL PRIMARY KEY,
            customer_id BIGINT NOT NULL REFERENCES customer(id),
            description TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending',
            go_to TEXT NOT NULL,
            contact TEXT NOT NULL,
            callback TEXT NOT NULL,
            details TEXT NOT NULL,
            notes TEXT NOT NULL,
            bonus_eligible BOOLEAN NOT NULL DEFAULT FALSE,
            bonus_amount DOUBLE PRECISION
        )"#,
    ),
    (
        "timecard",
        r#"CREATE TABLE IF NOT EXISTS timecard (
            id BIGSERIAL PRIMARY KEY,
            employee_id BIGINT NOT NULL REFERENCES "user"(id),
            job_id BIGINT NOT NULL REFERENCES job(id),
            hours DOUBLE PRECISION NOT NULL,
            hourly_rate DOUBLE PRECISION NOT NULL DEFAULT 0,
            date TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            auxiliary_payments JSONB NOT NULL DEFAULT '[]'::jsonb
        )"#,
    ),
    (
        "expense",
        r#"CREATE TABLE IF NOT EXISTS expense (
            id BIGSERIAL PRIMARY KEY,
            timecard_id BIGINT NOT NULL REFERENCES timecard(id),
            "type" TEXT NOT NULL,
            amount DOUBLE PRECISION NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            date_incurred TEXT NOT NULL
        )"#,
    ),
];

/// Create every record table that does not exist yet
pub async fn init_db(pool: &PgPool) -> Result<(), DatabaseError> {
    for (table, ddl) in TABLES {
        sqlx::query(ddl).execute(pool).await?;
        tracing::debug!("Ensured table '{}'", table);
    }
    tracing::info!("Schema ready ({} tables)", TABLES.len());
    Ok(())
}

/// Table names in creation order
pub fn table_names() -> impl Iterator<Item = &'static str> {
    TABLES.iter().map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::registry::ModelKind;

    #[test]
    fn every_model_has_a_table() {
        let tables: Vec<_> = table_names().collect();
        for kind in ModelKind::ALL {
            assert!(tables.contains(&kind.table()), "no DDL for {}", kind.table());
        }
    }

    #[test]
    fn referenced_tables_come_first() {
        let tables: Vec<_> = table_names().collect();
        let pos = |t: &str| tables.iter().position(|n| *n == t).unwrap();
        assert!(pos("user") < pos("admin"));
        assert!(pos("customer") < pos("job"));
        assert!(pos("job") < pos("timecard"));
        assert!(pos("timecard") < pos("expense"));
    }
}
