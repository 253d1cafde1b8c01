//! Integration tests for schema initialization using in-memory SurrealDB.

use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

#[tokio::test]
async fn schema_migration_applies_successfully() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    onvest_db::run_migrations(&db).await.unwrap();

    let mut result = db.query("INFO FOR DB").await.unwrap();
    let info: Option<surrealdb_types::Value> = result.take(0).unwrap();
    let info = info.expect("INFO FOR DB should return a value");
    let info_str = format!("{:?}", info);

    assert!(info_str.contains("user"), "missing user table");
    assert!(info_str.contains("application"), "missing application table");
    assert!(info_str.contains("admin_task"), "missing admin_task table");
    assert!(info_str.contains("employee"), "missing employee table");

    // Verify migrations were recorded.
    assert!(info_str.contains("_migration"), "missing _migration table");
}

#[tokio::test]
async fn migration_is_idempotent() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    // Run twice — should not fail and should not re-apply.
    onvest_db::run_migrations(&db).await.unwrap();
    onvest_db::run_migrations(&db).await.unwrap();

    let mut result = db.query("SELECT * FROM _migration").await.unwrap();
    let records: Vec<surrealdb_types::Value> = result.take(0).unwrap();
    assert_eq!(records.len(), 2, "expected one record per migration");

    // The employee seed must not have run twice.
    let mut result = db.query("SELECT * FROM employee").await.unwrap();
    let employees: Vec<surrealdb_types::Value> = result.take(0).unwrap();
    assert_eq!(employees.len(), 5);
}

#[tokio::test]
async fn can_create_record_after_migration() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    onvest_db::run_migrations(&db).await.unwrap();

    db.query(
        "CREATE user SET \
         username = 'alice', \
         password_hash = 'hash', \
         role = 'user'",
    )
    .await
    .unwrap()
    .check()
    .unwrap();

    let mut result = db
        .query("SELECT * FROM user WHERE username = 'alice'")
        .await
        .unwrap();
    let records: Vec<surrealdb_types::Value> = result.take(0).unwrap();
    assert_eq!(records.len(), 1);
}

#[tokio::test]
async fn unique_index_prevents_duplicate_usernames() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    onvest_db::run_migrations(&db).await.unwrap();

    db.query(
        "CREATE user SET \
         username = 'alice', \
         password_hash = 'hash', \
         role = 'user'",
    )
    .await
    .unwrap()
    .check()
    .unwrap();

    let result = db
        .query(
            "CREATE user SET \
             username = 'alice', \
             password_hash = 'other-hash', \
             role = 'user'",
        )
        .await
        .unwrap()
        .check();

    assert!(result.is_err(), "duplicate username should be rejected");
}

#[tokio::test]
async fn status_constraint_rejects_unknown_values() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    onvest_db::run_migrations(&db).await.unwrap();

    let result = db
        .query(
            "CREATE admin_task SET \
             application_id = 'some-app', \
             assigned_to_employee_id = NONE, \
             status = 'archived'",
        )
        .await
        .unwrap()
        .check();

    assert!(result.is_err(), "unknown task status should be rejected");
}
