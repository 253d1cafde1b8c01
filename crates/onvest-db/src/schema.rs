//! Database schema management and migrations.
//!
//! Migrations are applied in order and recorded in the `_migration`
//! table so a restart never re-runs one.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

/// DDL for the migration bookkeeping table. Idempotent.
const MIGRATION_TABLE_DDL: &str = "\
    DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL; \
    DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int; \
    DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string; \
    DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime DEFAULT time::now();";

/// Initial schema: accounts, onboarding applications, review tasks,
/// and the employee roster.
const SCHEMA_V1: &str = "\
    DEFINE TABLE user SCHEMAFULL; \
    DEFINE FIELD username ON TABLE user TYPE string; \
    DEFINE FIELD password_hash ON TABLE user TYPE string; \
    DEFINE FIELD role ON TABLE user TYPE string ASSERT $value IN ['user', 'admin']; \
    DEFINE FIELD created_at ON TABLE user TYPE datetime DEFAULT time::now(); \
    DEFINE INDEX idx_user_username ON TABLE user COLUMNS username UNIQUE; \
    \
    DEFINE TABLE application SCHEMAFULL; \
    DEFINE FIELD user_id ON TABLE application TYPE string; \
    DEFINE FIELD full_name ON TABLE application TYPE string; \
    DEFINE FIELD govt_id_number ON TABLE application TYPE string; \
    DEFINE FIELD mobile ON TABLE application TYPE string; \
    DEFINE FIELD email ON TABLE application TYPE string; \
    DEFINE FIELD time_horizon ON TABLE application TYPE string; \
    DEFINE FIELD risk_tolerance ON TABLE application TYPE string; \
    DEFINE FIELD investments_owned ON TABLE application TYPE string; \
    DEFINE FIELD acceptable_annual_return ON TABLE application TYPE string; \
    DEFINE FIELD dob ON TABLE application TYPE string; \
    DEFINE FIELD nationality ON TABLE application TYPE string; \
    DEFINE FIELD address ON TABLE application TYPE string; \
    DEFINE FIELD client_type ON TABLE application TYPE string; \
    DEFINE FIELD contact_details ON TABLE application TYPE option<string>; \
    DEFINE FIELD govt_id_file_path ON TABLE application TYPE string; \
    DEFINE FIELD source_of_funds ON TABLE application TYPE string; \
    DEFINE FIELD occupation_details ON TABLE application TYPE string; \
    DEFINE FIELD income_proof_file_path ON TABLE application TYPE string; \
    DEFINE FIELD selected_funds ON TABLE application TYPE string; \
    DEFINE FIELD terms_accepted ON TABLE application TYPE bool; \
    DEFINE FIELD submission_date ON TABLE application TYPE datetime DEFAULT time::now(); \
    DEFINE FIELD status ON TABLE application TYPE string \
        ASSERT $value IN ['pending', 'approved', 'rejected']; \
    DEFINE INDEX idx_application_user ON TABLE application COLUMNS user_id; \
    DEFINE INDEX idx_application_status ON TABLE application COLUMNS status; \
    \
    DEFINE TABLE admin_task SCHEMAFULL; \
    DEFINE FIELD application_id ON TABLE admin_task TYPE string; \
    DEFINE FIELD assigned_to_employee_id ON TABLE admin_task TYPE option<string>; \
    DEFINE FIELD status ON TABLE admin_task TYPE string \
        ASSERT $value IN ['open', 'in_progress', 'completed']; \
    DEFINE FIELD created_at ON TABLE admin_task TYPE datetime DEFAULT time::now(); \
    DEFINE FIELD updated_at ON TABLE admin_task TYPE datetime DEFAULT time::now(); \
    DEFINE INDEX idx_admin_task_application ON TABLE admin_task COLUMNS application_id UNIQUE; \
    \
    DEFINE TABLE employee SCHEMAFULL; \
    DEFINE FIELD name ON TABLE employee TYPE string; \
    DEFINE FIELD position ON TABLE employee TYPE string;";

/// Seed the employee roster. Fixed ids so deployments and tests agree
/// on the same records.
const SCHEMA_V2: &str = "\
    CREATE type::record('employee', '7d9f2c4e-8b31-4d6a-9e5f-0c2a8d4b6e13') \
        SET name = 'Alice Smith', position = 'Onboarding Specialist'; \
    CREATE type::record('employee', '3a8e5d1c-2f74-40b9-8c6d-5e9a1f3b7d25') \
        SET name = 'Bob Johnson', position = 'Compliance Officer'; \
    CREATE type::record('employee', '9c4b7e2d-1a58-4c3f-b2e9-7d5f0a8c4e37') \
        SET name = 'Charlie Brown', position = 'Client Relations'; \
    CREATE type::record('employee', '5e2d8a4f-9c16-49e7-a3b8-2f7c4d9e0a49') \
        SET name = 'Diana Prince', position = 'Senior Analyst'; \
    CREATE type::record('employee', '1b6f4d8e-7a92-43c5-8d1f-9e3a5c7b2f61') \
        SET name = 'Ethan Hunt', position = 'Operations Manager';";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    ddl: &'static str,
}

static MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "initial_schema",
        ddl: SCHEMA_V1,
    },
    Migration {
        version: 2,
        name: "seed_employees",
        ddl: SCHEMA_V2,
    },
];

/// Run all pending migrations against the given database.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(format!("migration table setup failed: {e}")))?;

    let mut result = db
        .query("SELECT version, name FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let applied: Vec<MigrationRecord> = result
        .take(0)
        .map_err(|e| DbError::Migration(format!("could not read migration state: {e}")))?;
    let current_version = applied.first().map(|r| r.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }

        info!(
            "Applying migration v{}: {}",
            migration.version, migration.name
        );

        db.query(migration.ddl)
            .await?
            .check()
            .map_err(|e| DbError::Migration(format!("migration v{} failed: {e}", migration.version)))?;

        db.query("CREATE _migration SET version = $version, name = $name")
            .bind(("version", migration.version))
            .bind(("name", migration.name.to_string()))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "failed to record migration v{}: {e}",
                    migration.version
                ))
            })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_ordered() {
        let mut last = 0;
        for migration in MIGRATIONS {
            assert!(
                migration.version > last,
                "migration versions must be strictly increasing"
            );
            last = migration.version;
        }
    }

    #[test]
    fn schema_v1_defines_all_tables() {
        for table in ["user", "application", "admin_task", "employee"] {
            assert!(
                SCHEMA_V1.contains(&format!("DEFINE TABLE {table} SCHEMAFULL")),
                "missing table definition: {table}"
            );
        }
    }

    #[test]
    fn seed_covers_five_employees() {
        assert_eq!(SCHEMA_V2.matches("CREATE type::record('employee'").count(), 5);
    }
}
