//! Integration tests for the seeded employee roster.

use onvest_core::error::OnvestError;
use onvest_core::repository::EmployeeRepository;
use onvest_db::repository::SurrealEmployeeRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

async fn setup() -> SurrealEmployeeRepository<Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    onvest_db::run_migrations(&db).await.unwrap();
    SurrealEmployeeRepository::new(db)
}

#[tokio::test]
async fn roster_is_seeded_and_ordered_by_name() {
    let repo = setup().await;

    let employees = repo.list().await.unwrap();
    let names: Vec<&str> = employees.iter().map(|e| e.name.as_str()).collect();

    assert_eq!(
        names,
        vec![
            "Alice Smith",
            "Bob Johnson",
            "Charlie Brown",
            "Diana Prince",
            "Ethan Hunt",
        ]
    );
    assert_eq!(employees[0].position, "Onboarding Specialist");
}

#[tokio::test]
async fn get_by_id_round_trips() {
    let repo = setup().await;

    let employees = repo.list().await.unwrap();
    let first = &employees[0];

    let fetched = repo.get_by_id(first.id).await.unwrap();
    assert_eq!(&fetched, first);
}

#[tokio::test]
async fn unknown_employee_not_found() {
    let repo = setup().await;

    let result = repo.get_by_id(Uuid::new_v4()).await;
    assert!(matches!(result, Err(OnvestError::NotFound { .. })));
}
