//! Integration tests for the task repository using in-memory SurrealDB.

use std::time::Duration;

use onvest_core::error::OnvestError;
use onvest_core::models::application::{CreateApplication, FundSelection};
use onvest_core::models::task::{AdminTask, TaskStatus, UpdateTask};
use onvest_core::repository::{ApplicationRepository, TaskRepository};
use onvest_db::repository::{SurrealApplicationRepository, SurrealTaskRepository};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

struct Fixture {
    applications: SurrealApplicationRepository<Db>,
    tasks: SurrealTaskRepository<Db>,
}

async fn setup() -> Fixture {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    onvest_db::run_migrations(&db).await.unwrap();
    Fixture {
        applications: SurrealApplicationRepository::new(db.clone()),
        tasks: SurrealTaskRepository::new(db),
    }
}

fn sample_application() -> CreateApplication {
    CreateApplication {
        user_id: Uuid::new_v4(),
        full_name: "Bob Example".to_string(),
        govt_id_number: "ID-9".to_string(),
        mobile: "+410000000".to_string(),
        email: "bob@example.com".to_string(),
        time_horizon: "10+ years".to_string(),
        risk_tolerance: "high".to_string(),
        investments_owned: vec!["realestate".to_string()],
        acceptable_annual_return: ">15%".to_string(),
        dob: "1985-01-15".to_string(),
        nationality: "German".to_string(),
        address: "Hauptstrasse 5, Berlin".to_string(),
        client_type: "individual".to_string(),
        contact_details: None,
        govt_id_file_path: "uploads/10-id.png".to_string(),
        source_of_funds: "inheritance".to_string(),
        occupation_details: "architect".to_string(),
        income_proof_file_path: "uploads/11-statement.pdf".to_string(),
        selected_funds: vec![FundSelection {
            id: 2,
            name: "Tech Growth Fund".to_string(),
            amount: 5000.0,
        }],
        terms_accepted: true,
    }
}

async fn create_task(fixture: &Fixture) -> AdminTask {
    let (_application, task) = fixture
        .applications
        .create_with_task(sample_application())
        .await
        .unwrap();
    task
}

#[tokio::test]
async fn get_by_application() {
    let fixture = setup().await;
    let task = create_task(&fixture).await;

    let found = fixture
        .tasks
        .get_by_application(task.application_id)
        .await
        .unwrap()
        .expect("task should exist");
    assert_eq!(found.id, task.id);
    assert_eq!(found.status, TaskStatus::Open);

    let missing = fixture.tasks.get_by_application(Uuid::new_v4()).await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn update_assigns_and_advances() {
    let fixture = setup().await;
    let task = create_task(&fixture).await;
    let employee_id = Uuid::new_v4();

    let updated = fixture
        .tasks
        .update(
            task.id,
            UpdateTask {
                assigned_to_employee_id: Some(employee_id),
                status: Some(TaskStatus::InProgress),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.assigned_to_employee_id, Some(employee_id));
    assert_eq!(updated.status, TaskStatus::InProgress);
}

#[tokio::test]
async fn partial_update_leaves_other_fields() {
    let fixture = setup().await;
    let task = create_task(&fixture).await;
    let employee_id = Uuid::new_v4();

    fixture
        .tasks
        .update(
            task.id,
            UpdateTask {
                assigned_to_employee_id: Some(employee_id),
                status: Some(TaskStatus::InProgress),
            },
        )
        .await
        .unwrap();

    // Status-only update must not clear the assignment.
    let updated = fixture
        .tasks
        .update(
            task.id,
            UpdateTask {
                status: Some(TaskStatus::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.assigned_to_employee_id, Some(employee_id));
    assert_eq!(updated.status, TaskStatus::Completed);
}

#[tokio::test]
async fn update_refreshes_updated_at() {
    let fixture = setup().await;
    let task = create_task(&fixture).await;

    tokio::time::sleep(Duration::from_millis(10)).await;

    let updated = fixture
        .tasks
        .update(
            task.id,
            UpdateTask {
                status: Some(TaskStatus::InProgress),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(updated.updated_at > task.updated_at);
    assert_eq!(updated.created_at, task.created_at);
}

#[tokio::test]
async fn update_unknown_task_not_found() {
    let fixture = setup().await;

    let result = fixture
        .tasks
        .update(
            Uuid::new_v4(),
            UpdateTask {
                status: Some(TaskStatus::Completed),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(OnvestError::NotFound { .. })));
}

#[tokio::test]
async fn list_by_status_filters() {
    let fixture = setup().await;
    let first = create_task(&fixture).await;
    let second = create_task(&fixture).await;

    fixture
        .tasks
        .update(
            first.id,
            UpdateTask {
                status: Some(TaskStatus::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let open = fixture.tasks.list_by_status(TaskStatus::Open).await.unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].id, second.id);

    let all = fixture.tasks.list().await.unwrap();
    assert_eq!(all.len(), 2);
}
